//! Paginated invoice listings for the signed-in customer.

use billhub_core::{CustomerId, PortalError, PortalResult};
use billhub_store::{InvoiceQuery, InvoiceStore};

use crate::config::PortalConfig;
use crate::page::{self, Page};

pub struct InvoiceQueryService<S> {
    store: S,
    config: PortalConfig,
}

impl<S: InvoiceStore> InvoiceQueryService<S> {
    pub fn new(store: S, config: PortalConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// List one page of the customer's invoices, newest first.
    ///
    /// `customer` is the identity from the session; `None` means the
    /// request carried no authenticated customer and is refused. Pages
    /// below 1 are clamped to 1; pages past the end come back empty
    /// with the total still filled in.
    pub fn list_invoices(
        &self,
        customer: Option<CustomerId>,
        page: usize,
    ) -> PortalResult<Page> {
        let customer = customer.ok_or(PortalError::Unauthorized)?;
        let page = page.max(1);
        let page_size = self.config.pagination_limit();

        let query = InvoiceQuery::for_party(customer)
            .excluding_states(self.config.excluded_states());

        let total = self.store.search_count(&query)?;
        let ids = self
            .store
            .search(&query, page::offset(page, page_size), Some(page_size))?;
        let items = self.store.read(&ids)?;

        tracing::debug!(
            customer = %customer,
            page,
            total,
            returned = items.len(),
            "listed invoices"
        );

        Ok(Page {
            items,
            total,
            page,
            page_size,
        })
    }
}
