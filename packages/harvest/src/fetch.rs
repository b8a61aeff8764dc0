//! Page-fetching seam.
//!
//! Fetching is a collaborator behind a trait so the pipeline never cares
//! where HTML comes from: plain HTTP, a rendering API for
//! JavaScript-populated pages, or canned fixtures in tests. Implementations
//! live in [`crate::fetchers`].

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::types::page::FetchedPage;

/// Fetches one page of HTML.
///
/// Implementations:
/// - `HttpFetcher` - plain HTTP GET via reqwest
/// - `MockFetcher` - canned URL→HTML map for tests and dry runs
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single URL.
    ///
    /// A failure here is per-page: the pipeline logs it, records the
    /// page as skipped, and continues with the rest of the batch.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
