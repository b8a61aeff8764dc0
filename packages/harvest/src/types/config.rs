//! Configuration for the harvest pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for one harvest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Directory page listing per-city links.
    pub directory_url: String,

    /// CSS selector for city anchors on the directory page.
    ///
    /// Default: `table a[href]`; directory sites commonly lay out the
    /// city index as a table of links.
    pub link_selector: String,

    /// Maximum concurrent city-page fetches.
    ///
    /// Pages are isolated from each other and row order is not a
    /// contract, so bounded parallelism is safe. Default: 4.
    pub concurrency: usize,

    /// Cap on the number of city pages visited (None = all).
    pub max_cities: Option<usize>,

    /// Separator joining key paths during flattening. Default: `_`.
    pub separator: String,
}

impl HarvestConfig {
    /// Create a config for a directory URL with default settings.
    pub fn new(directory_url: impl Into<String>) -> Self {
        Self {
            directory_url: directory_url.into(),
            link_selector: "table a[href]".to_string(),
            concurrency: 4,
            max_cities: None,
            separator: "_".to_string(),
        }
    }

    /// Set the city-link selector.
    pub fn with_link_selector(mut self, selector: impl Into<String>) -> Self {
        self.link_selector = selector.into();
        self
    }

    /// Set the fetch concurrency.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Cap the number of city pages visited.
    pub fn with_max_cities(mut self, max: usize) -> Self {
        self.max_cities = Some(max);
        self
    }

    /// Set the flattening separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}
