//! Pagination primitives.

use billhub_invoices::Invoice;

/// One page of a customer's invoice listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Invoice>,
    /// Matches across all pages, not just this one.
    pub total: usize,
    /// 1-based page number this page was built for.
    pub page: usize,
    pub page_size: usize,
}

impl Page {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }
}

/// Number of records to skip for a 1-based `page` of size `page_size`.
/// Saturates for huge page numbers; any offset past the result set
/// yields an empty page.
pub fn offset(page: usize, page_size: usize) -> usize {
    (page - 1).saturating_mul(page_size)
}

/// Parse a raw page parameter, falling back to page 1 for anything
/// that is absent, unparsable, or below 1.
pub fn parse_page(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}
