//! Query description handed to an [`InvoiceStore`](crate::InvoiceStore).
//!
//! The party is a required field, so every search is scoped to one
//! customer by construction. A remote store implementation would
//! translate this into its own filter triples; the in-memory store
//! evaluates [`InvoiceQuery::matches`] directly.

use billhub_core::{CustomerId, InvoiceId};
use billhub_invoices::{Invoice, InvoiceState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceQuery {
    party: CustomerId,
    id: Option<InvoiceId>,
    excluded_states: Vec<InvoiceState>,
    allowed_states: Option<Vec<InvoiceState>>,
}

impl InvoiceQuery {
    /// A query matching every invoice owned by `party`.
    pub fn for_party(party: CustomerId) -> Self {
        Self {
            party,
            id: None,
            excluded_states: Vec::new(),
            allowed_states: None,
        }
    }

    /// Narrow the query to a single invoice id.
    pub fn with_id(mut self, id: InvoiceId) -> Self {
        self.id = Some(id);
        self
    }

    /// Hide invoices in any of the given states.
    pub fn excluding_states(mut self, states: &[InvoiceState]) -> Self {
        self.excluded_states = states.to_vec();
        self
    }

    /// Keep only invoices in one of the given states.
    pub fn within_states(mut self, states: &[InvoiceState]) -> Self {
        self.allowed_states = Some(states.to_vec());
        self
    }

    pub fn party(&self) -> CustomerId {
        self.party
    }

    pub fn id(&self) -> Option<InvoiceId> {
        self.id
    }

    pub fn excluded_states(&self) -> &[InvoiceState] {
        &self.excluded_states
    }

    pub fn allowed_states(&self) -> Option<&[InvoiceState]> {
        self.allowed_states.as_deref()
    }

    /// Evaluate the query against one invoice record.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if invoice.party != self.party {
            return false;
        }
        if let Some(id) = self.id {
            if invoice.id != id {
                return false;
            }
        }
        if self.excluded_states.contains(&invoice.state) {
            return false;
        }
        if let Some(allowed) = &self.allowed_states {
            if !allowed.contains(&invoice.state) {
                return false;
            }
        }
        true
    }
}
