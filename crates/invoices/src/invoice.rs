//! Invoice records as the portal reads them from the billing store.

use core::str::FromStr;

use billhub_core::{CustomerId, InvoiceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of an invoice in the billing system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceState {
    Draft,
    Validated,
    Posted,
    Paid,
    Cancelled,
}

impl InvoiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Validated => "validated",
            Self::Posted => "posted",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Raised when a state label from configuration or the wire is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown invoice state: {0}")]
pub struct UnknownState(pub String);

impl FromStr for InvoiceState {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "validated" => Ok(Self::Validated),
            "posted" => Ok(Self::Posted),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownState(other.to_string())),
        }
    }
}

/// Direction of the invoice: `Out` for customer invoices, `In` for
/// supplier ones. Carried as data; queries do not filter on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Out,
    In,
}

impl InvoiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Out => "out",
            Self::In => "in",
        }
    }
}

/// An invoice as projected for the customer portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub invoice_date: NaiveDate,
    pub create_date: DateTime<Utc>,
    pub state: InvoiceState,
    pub kind: InvoiceKind,
    pub party: CustomerId,
    /// Amounts in the smallest currency unit (e.g., cents).
    pub untaxed_amount: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
}

impl Invoice {
    /// Key for listing order: newest invoice date first, then newest id.
    /// Sort descending on this tuple.
    pub fn sort_key(&self) -> (NaiveDate, InvoiceId) {
        (self.invoice_date, self.id)
    }
}
