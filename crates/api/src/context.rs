use billhub_core::CustomerId;

/// Customer context for a request.
///
/// Inserted by the auth middleware; present on all invoice routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CustomerContext {
    customer_id: CustomerId,
}

impl CustomerContext {
    pub fn new(customer_id: CustomerId) -> Self {
        Self { customer_id }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }
}
