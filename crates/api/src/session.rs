//! Session lookup behind the bearer-token middleware.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use billhub_core::CustomerId;

/// Resolves a bearer token to the customer it was issued for.
pub trait SessionStore: Send + Sync {
    fn customer_for_token(&self, token: &str) -> Option<CustomerId>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn customer_for_token(&self, token: &str) -> Option<CustomerId> {
        (**self).customer_for_token(token)
    }
}

/// Token table held in memory. Used by the dev wiring and tests.
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<String, CustomerId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: impl Into<String>, customer: CustomerId) {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert(token.into(), customer);
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn customer_for_token(&self, token: &str) -> Option<CustomerId> {
        self.inner.read().ok()?.get(token).copied()
    }
}
