//! In-memory store and renderers used by tests and the dev wiring.

use std::collections::HashMap;
use std::sync::RwLock;

use billhub_core::InvoiceId;
use billhub_invoices::Invoice;

use crate::query::InvoiceQuery;
use crate::repository::{InvoiceStore, RenderError, ReportRenderer, StoreError, StoreResult};

/// Hash map of invoices behind a read-write lock.
#[derive(Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, invoice: Invoice) -> StoreResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("invoice store lock poisoned".to_string()))?;
        inner.insert(invoice.id, invoice);
        Ok(())
    }

    fn matching_sorted(&self, query: &InvoiceQuery) -> StoreResult<Vec<Invoice>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("invoice store lock poisoned".to_string()))?;
        let mut matches: Vec<Invoice> = inner
            .values()
            .filter(|invoice| query.matches(invoice))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        Ok(matches)
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn search(
        &self,
        query: &InvoiceQuery,
        offset: usize,
        limit: Option<usize>,
    ) -> StoreResult<Vec<InvoiceId>> {
        let matches = self.matching_sorted(query)?;
        let windowed = matches
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .map(|invoice| invoice.id)
            .collect();
        Ok(windowed)
    }

    fn search_count(&self, query: &InvoiceQuery) -> StoreResult<usize> {
        Ok(self.matching_sorted(query)?.len())
    }

    fn read(&self, ids: &[InvoiceId]) -> StoreResult<Vec<Invoice>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("invoice store lock poisoned".to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.get(id).cloned())
            .collect())
    }
}

/// Renderer that returns the same bytes for every invoice.
pub struct FixedReportRenderer {
    bytes: Vec<u8>,
}

impl FixedReportRenderer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ReportRenderer for FixedReportRenderer {
    fn render(&self, _invoice: InvoiceId) -> Result<Vec<u8>, RenderError> {
        Ok(self.bytes.clone())
    }
}

/// Renderer that always fails. Used to exercise the error path.
pub struct FailingReportRenderer {
    message: String,
}

impl FailingReportRenderer {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ReportRenderer for FailingReportRenderer {
    fn render(&self, _invoice: InvoiceId) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::new(self.message.clone()))
    }
}
