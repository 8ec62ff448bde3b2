//! `billhub-invoices` — the invoice read model served by the portal.

pub mod invoice;

pub use invoice::{Invoice, InvoiceKind, InvoiceState, UnknownState};
