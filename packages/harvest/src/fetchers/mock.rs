//! Mock fetcher for testing.
//!
//! Canned URL→HTML responses plus failure injection and call recording.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::fetch::PageFetcher;
use crate::types::page::FetchedPage;

/// Mock fetcher serving pre-configured pages.
///
/// # Example
///
/// ```rust
/// use harvest::fetchers::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.com", "<html></html>")
///     .with_failure("https://example.com/down");
/// ```
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page (builder pattern).
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add_page(url, html);
        self
    }

    /// Register a URL that always fails (builder pattern).
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(url.into());
        self
    }

    /// Register a page.
    pub fn add_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), html.into());
    }

    /// URLs fetched so far, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches performed.
    pub fn fetch_call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if self.failures.read().unwrap().contains(url) {
            return Err(FetchError::Http(
                format!("injected failure for {url}").into(),
            ));
        }

        let pages = self.pages.read().unwrap();
        match pages.get(url) {
            Some(html) => Ok(FetchedPage::new(url, html.clone())),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_pages() {
        let mock = MockFetcher::new().with_page("https://example.com/a", "<html>A</html>");

        let page = mock.fetch("https://example.com/a").await.unwrap();
        assert_eq!(page.url, "https://example.com/a");
        assert_eq!(page.html, "<html>A</html>");
    }

    #[tokio::test]
    async fn test_mock_missing_page_is_not_found() {
        let mock = MockFetcher::new();
        let err = mock.fetch("https://example.com/missing").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_mock_failure_injection_and_call_tracking() {
        let mock = MockFetcher::new()
            .with_page("https://example.com/ok", "ok")
            .with_failure("https://example.com/down");

        assert!(mock.fetch("https://example.com/down").await.is_err());
        assert!(mock.fetch("https://example.com/ok").await.is_ok());

        assert_eq!(mock.fetch_call_count(), 2);
        assert_eq!(
            mock.fetch_calls(),
            vec![
                "https://example.com/down".to_string(),
                "https://example.com/ok".to_string(),
            ]
        );
    }
}
