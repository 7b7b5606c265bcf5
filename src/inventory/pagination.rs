//! # Pagination
//!
//! Page arithmetic for paged list requests. Pages are 1-indexed and
//! clamped into range; sizes are never silently invented from bad input,
//! only from non-positive numbers.

use super::errors::{InventoryError, InventoryResult};

/// Page size used when the caller asks for zero or fewer records
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Parse a numeric query parameter; non-numeric input is an error
pub fn parse_int(name: &str, value: &str) -> InventoryResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| InventoryError::invalid_param(name, format!("'{}' is not an integer", value)))
}

/// Resolved page window over `total` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
    total: usize,
}

impl Paginator {
    /// Resolve a requested page against the record count.
    ///
    /// A page past the end lands on the last page; a page below one lands
    /// on the first.
    pub fn new(page: i64, per_page: i64, total: usize) -> Self {
        let per_page = if per_page <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            per_page as usize
        };

        let page_count = total.div_ceil(per_page);
        let page = if page > page_count as i64 {
            page_count as i64
        } else {
            page
        };
        let page = if page <= 0 { 1 } else { page as usize };

        Self {
            page,
            per_page,
            total,
        }
    }

    /// Current page, 1-indexed
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Total records across all pages
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// Records skipped before this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}
