//! Portal error model.

use thiserror::Error;

/// Result type used across the portal services.
pub type PortalResult<T> = Result<T, PortalError>;

/// Failure surfaced by a portal operation.
///
/// `NotFound` deliberately merges "no such invoice", "not the caller's
/// invoice", and "not in a printable state": a customer must not be able
/// to tell those apart and probe for other customers' records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// No authenticated customer on the request.
    #[error("unauthorized")]
    Unauthorized,

    /// The requested invoice is not visible to this customer.
    #[error("not found")]
    NotFound,

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The remote reporting facility failed to produce the document.
    #[error("report generation failed: {0}")]
    ReportGeneration(String),

    /// The round trip to the upstream invoice store failed.
    #[error("store error: {0}")]
    Store(String),
}

impl PortalError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn report_generation(msg: impl Into<String>) -> Self {
        Self::ReportGeneration(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
