//! `billhub-core` — identifiers and the portal error model.
//!
//! Everything here is pure: no IO, no framework types.

pub mod error;
pub mod id;

pub use error::{PortalError, PortalResult};
pub use id::{CustomerId, InvoiceId};
