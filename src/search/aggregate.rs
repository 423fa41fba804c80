use crate::error::SearchError;
use crate::models::{AggregatedResult, FetchMode, SearchRequest, PAGE_SIZE};
use crate::search::query::build_query;
use crate::search::rank::process;
use crate::search::window::{cap, clamp_page};
use crate::upstream::PageSource;

/// Pages merged in fetch-all mode. Bounded to respect the upstream rate limit.
pub const MAX_FETCH_ALL_PAGES: u32 = 5;

/// Full pipeline for one client request: build the query, aggregate, cap.
pub async fn search(
    source: &dyn PageSource,
    req: &SearchRequest,
) -> Result<AggregatedResult, SearchError> {
    let query = build_query(req);
    let result = aggregate(source, &query, req.mode).await?;
    Ok(cap(result))
}

/// Fetch one page or the first [`MAX_FETCH_ALL_PAGES`] pages and merge them
/// into a deduplicated, star-ranked result.
///
/// Single-page mode reports the upstream's total unmodified. Fetch-all mode
/// reports the deduplicated count, and any failing page aborts the whole
/// aggregation.
pub async fn aggregate(
    source: &dyn PageSource,
    query: &str,
    mode: FetchMode,
) -> Result<AggregatedResult, SearchError> {
    match mode {
        FetchMode::SinglePage { page } => {
            let page = clamp_page(page);
            let raw = source.fetch_page(query, page).await?;
            let items = process(&raw.items);
            tracing::info!(
                "Search {query:?} page {page}: {} items of {} total",
                items.len(),
                raw.total_count
            );
            Ok(AggregatedResult {
                items,
                total_count: raw.total_count,
            })
        }
        FetchMode::All => {
            let mut records = Vec::new();
            for page in 1..=MAX_FETCH_ALL_PAGES {
                let raw = source.fetch_page(query, page).await.inspect_err(|e| {
                    tracing::warn!("Aborting fetch-all for {query:?} at page {page}: {e}");
                })?;
                let fetched = raw.items.len();
                records.extend(raw.items);
                if fetched < PAGE_SIZE as usize {
                    break;
                }
            }

            let items = process(&records);
            tracing::info!(
                "Search {query:?} fetch-all: {} unique of {} fetched",
                items.len(),
                records.len()
            );
            Ok(AggregatedResult {
                total_count: items.len() as u64,
                items,
            })
        }
    }
}
