//! `billhub-store` — the narrow seam between the portal and the billing
//! backend: a query description, the `InvoiceStore`/`ReportRenderer`
//! traits, and in-memory implementations for development and tests.

pub mod memory;
pub mod query;
pub mod repository;

pub use memory::{FailingReportRenderer, FixedReportRenderer, InMemoryInvoiceStore};
pub use query::InvoiceQuery;
pub use repository::{InvoiceStore, RenderError, ReportRenderer, StoreError, StoreResult};
