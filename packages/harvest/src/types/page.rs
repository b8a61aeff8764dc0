//! Fetched page content and discovered links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw HTML for one fetched page, before any extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL the page was fetched from (after redirects)
    pub url: String,

    /// Raw HTML body
    pub html: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a page fetched now.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Set the fetched timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Check if this page has any content.
    pub fn has_content(&self) -> bool {
        !self.html.trim().is_empty()
    }
}

/// A per-city page discovered on the directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityLink {
    /// City name as it appears in the anchor text
    pub name: String,

    /// Absolute URL of the city page
    pub url: String,
}

impl CityLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
