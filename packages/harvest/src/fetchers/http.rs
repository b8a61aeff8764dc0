//! HTTP fetcher built on reqwest.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::fetch::PageFetcher;
use crate::types::page::FetchedPage;

/// Browser-like User-Agent to avoid trivial bot blocks.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches pages over plain HTTP.
///
/// Suitable for server-rendered pages. Pages populated client-side need a
/// rendering fetcher behind the same [`PageFetcher`] seam; the optional
/// settle delay here is a bounded wait between requests, not a readiness
/// check.
pub struct HttpFetcher {
    client: reqwest::Client,
    settle: Option<Duration>,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with default settings (30s timeout, browser UA).
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(DEFAULT_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            settle: None,
        }
    }

    /// Use a custom reqwest client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sleep this long after each fetch (politeness / settle delay).
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = Some(settle);
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Final URL after redirects, not the one we asked for
        let final_url = response.url().to_string();

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        if let Some(settle) = self.settle {
            tokio::time::sleep(settle).await;
        }

        debug!(url = %final_url, bytes = html.len(), "HTTP fetch completed");
        Ok(FetchedPage::new(final_url, html).with_fetched_at(Utc::now()))
    }

    fn name(&self) -> &str {
        "http"
    }
}
