use std::ops::RangeInclusive;

use crate::models::{AggregatedResult, Pagination, PAGE_SIZE};

/// Deepest page the upstream search API will serve at our page size.
pub const MAX_PAGE: u32 = 10;
/// Only the first 100 ranked results are ever shown.
pub const MAX_TOTAL: u64 = 100;
/// Page buttons shown on either side of the current page.
const WINDOW_RADIUS: u32 = 2;

/// Clamp the reported total to [`MAX_TOTAL`].
pub fn cap(result: AggregatedResult) -> AggregatedResult {
    AggregatedResult {
        total_count: result.total_count.min(MAX_TOTAL),
        ..result
    }
}

/// Clamp a client-supplied page number into `1..=MAX_PAGE`.
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, MAX_PAGE as i64) as u32
}

/// Number of pages the client can navigate for a (capped) total.
pub fn total_pages(total: u64) -> u32 {
    let pages = total.div_ceil(PAGE_SIZE as u64);
    pages.clamp(1, MAX_PAGE as u64) as u32
}

/// Page buttons to render: at most five consecutive pages centered on the
/// current one, never leaving `1..=total_pages`.
pub fn page_window(page: i64, total: u64) -> RangeInclusive<u32> {
    let last = total_pages(total);
    let page = clamp_page(page).min(last);
    let start = page.saturating_sub(WINDOW_RADIUS).max(1);
    let end = (page + WINDOW_RADIUS).min(last);
    start..=end
}

/// Navigation block for a single-page response with a (capped) total.
pub fn pagination(page: i64, total: u64) -> Pagination {
    Pagination {
        page: clamp_page(page),
        total_pages: total_pages(total),
        window: page_window(page, total).collect(),
    }
}
