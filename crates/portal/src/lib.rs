//! `billhub-portal` — the customer-facing invoice services.
//!
//! [`InvoiceQueryService`] lists a customer's invoices page by page;
//! [`InvoiceExportService`] loads one invoice and renders it as a PDF
//! download. Both are generic over the store seam so the API crate can
//! wire them to any backend.

pub mod config;
pub mod export;
pub mod page;
pub mod query;
pub mod report;
mod slug;

pub use config::{ConfigError, PortalConfig};
pub use export::InvoiceExportService;
pub use page::{Page, parse_page};
pub use query::InvoiceQueryService;
pub use report::{PDF_CONTENT_TYPE, ReportArtifact, SpooledReport};
