//! Upstream repository-search backends.

pub mod github;

use async_trait::async_trait;

use crate::error::SearchError;
use crate::models::RawPage;

/// A paginated, star-sorted repository search.
///
/// Implementations issue exactly one request per call and return a
/// classified [`SearchError`] on failure. A 2xx answer with an unusable body
/// is an empty page, not an error.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<RawPage, SearchError>;
}
