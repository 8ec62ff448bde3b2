//! Single-invoice access and PDF export.

use billhub_core::{CustomerId, InvoiceId, PortalError, PortalResult};
use billhub_invoices::Invoice;
use billhub_store::{InvoiceQuery, InvoiceStore, ReportRenderer};

use crate::config::PortalConfig;
use crate::report::ReportArtifact;

pub struct InvoiceExportService<S, R> {
    store: S,
    renderer: R,
    config: PortalConfig,
}

impl<S: InvoiceStore, R: ReportRenderer> InvoiceExportService<S, R> {
    pub fn new(store: S, renderer: R, config: PortalConfig) -> Self {
        Self {
            store,
            renderer,
            config,
        }
    }

    /// Load one invoice belonging to `customer`.
    ///
    /// A missing invoice and another customer's invoice both come back
    /// as [`PortalError::NotFound`].
    pub fn get_invoice_detail(
        &self,
        customer: Option<CustomerId>,
        id: InvoiceId,
    ) -> PortalResult<Invoice> {
        let customer = customer.ok_or(PortalError::Unauthorized)?;
        let query = InvoiceQuery::for_party(customer).with_id(id);
        self.fetch_one(&query)
    }

    /// Render the invoice's PDF for download.
    ///
    /// Only invoices in a configured printable state qualify; an empty
    /// printable list lets any state through. Non-printable invoices
    /// answer [`PortalError::NotFound`], same as missing ones.
    pub fn print_invoice(
        &self,
        customer: Option<CustomerId>,
        id: InvoiceId,
    ) -> PortalResult<ReportArtifact> {
        let customer = customer.ok_or(PortalError::Unauthorized)?;
        let mut query = InvoiceQuery::for_party(customer).with_id(id);
        let printable = self.config.printable_states();
        if !printable.is_empty() {
            query = query.within_states(printable);
        }
        let invoice = self.fetch_one(&query)?;

        let bytes = self.renderer.render(invoice.id)?;
        let artifact = ReportArtifact::pdf(&invoice.number, bytes);

        tracing::info!(
            customer = %customer,
            invoice = %invoice.id,
            file_name = artifact.file_name(),
            size = artifact.bytes().len(),
            "rendered invoice report"
        );

        Ok(artifact)
    }

    fn fetch_one(&self, query: &InvoiceQuery) -> PortalResult<Invoice> {
        let ids = self.store.search(query, 0, Some(1))?;
        let mut invoices = self.store.read(&ids)?;
        invoices.pop().ok_or(PortalError::NotFound)
    }
}
