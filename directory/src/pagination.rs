//! Page arithmetic over an in-memory collection. Page indices are 1-based.

use std::ops::Range;

/// Number of records shown per page.
pub const PAGE_SIZE: usize = 10;

/// Total number of pages for `len` records. Never less than one, so an empty
/// collection still has a (blank) first page.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    debug_assert!(page_size > 0, "page size must be positive");
    len.div_ceil(page_size).max(1)
}

/// Index range of `page` within a collection of `len` records, clipped to the
/// collection bounds. Pages past the end yield an empty range.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Pull `page` back into `1..=total_pages`.
pub fn repair_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
