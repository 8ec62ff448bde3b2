//! Traits the portal services depend on.

use std::sync::Arc;

use billhub_core::{InvoiceId, PortalError};
use billhub_invoices::Invoice;
use thiserror::Error;

use crate::query::InvoiceQuery;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure talking to the invoice store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invoice store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed record from invoice store: {0}")]
    Malformed(String),
}

impl From<StoreError> for PortalError {
    fn from(err: StoreError) -> Self {
        PortalError::store(err.to_string())
    }
}

/// Failure producing a rendered report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("render failed: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<RenderError> for PortalError {
    fn from(err: RenderError) -> Self {
        PortalError::report_generation(err.message)
    }
}

/// Read access to invoice records, scoped per query.
pub trait InvoiceStore: Send + Sync {
    /// Ids matching `query`, newest invoice date first, id as tie-break,
    /// windowed by `offset` and `limit`.
    fn search(
        &self,
        query: &InvoiceQuery,
        offset: usize,
        limit: Option<usize>,
    ) -> StoreResult<Vec<InvoiceId>>;

    /// Total number of matches for `query`, ignoring any window.
    fn search_count(&self, query: &InvoiceQuery) -> StoreResult<usize>;

    /// Load full records for `ids`, preserving the given order.
    fn read(&self, ids: &[InvoiceId]) -> StoreResult<Vec<Invoice>>;
}

impl<S: InvoiceStore + ?Sized> InvoiceStore for Arc<S> {
    fn search(
        &self,
        query: &InvoiceQuery,
        offset: usize,
        limit: Option<usize>,
    ) -> StoreResult<Vec<InvoiceId>> {
        (**self).search(query, offset, limit)
    }

    fn search_count(&self, query: &InvoiceQuery) -> StoreResult<usize> {
        (**self).search_count(query)
    }

    fn read(&self, ids: &[InvoiceId]) -> StoreResult<Vec<Invoice>> {
        (**self).read(ids)
    }
}

/// Produces the printable document for one invoice.
pub trait ReportRenderer: Send + Sync {
    fn render(&self, invoice: InvoiceId) -> Result<Vec<u8>, RenderError>;
}

impl<R: ReportRenderer + ?Sized> ReportRenderer for Arc<R> {
    fn render(&self, invoice: InvoiceId) -> Result<Vec<u8>, RenderError> {
        (**self).render(invoice)
    }
}
