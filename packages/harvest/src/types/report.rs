//! Harvest run output: retained rows plus the failure channels.

use serde::{Deserialize, Serialize};

use crate::types::record::FlatRecord;

/// One JSON-LD block that failed to parse.
///
/// Failures are collected, never silently dropped, so a run can report
/// how many blocks were rejected and where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Page the block was found on
    pub url: String,

    /// Parse error message
    pub error: String,

    /// Leading fragment of the offending block, for diagnostics
    pub snippet: String,
}

/// Max snippet length carried with a parse failure.
const SNIPPET_LEN: usize = 120;

impl ParseFailure {
    /// Record a failure, keeping a bounded snippet of the block text.
    pub fn new(url: impl Into<String>, error: impl ToString, block: &str) -> Self {
        let snippet = match block.char_indices().nth(SNIPPET_LEN) {
            Some((idx, _)) => &block[..idx],
            None => block,
        };
        Self {
            url: url.into(),
            error: error.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

/// A city page that could not be fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: String,
    pub error: String,
}

/// The result of a full harvest run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestReport {
    /// Entity rows that survived the filter
    pub rows: Vec<FlatRecord>,

    /// JSON-LD blocks that failed parsing
    pub parse_failures: Vec<ParseFailure>,

    /// City pages skipped because fetching failed
    pub failed_pages: Vec<FailedPage>,

    /// Number of city pages successfully fetched
    pub pages_fetched: usize,

    /// Number of flattened records dropped as site-metadata noise
    pub noise_dropped: usize,
}

impl HarvestReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another report into this one.
    pub fn absorb(&mut self, other: HarvestReport) {
        self.rows.extend(other.rows);
        self.parse_failures.extend(other.parse_failures);
        self.failed_pages.extend(other.failed_pages);
        self.pages_fetched += other.pages_fetched;
        self.noise_dropped += other.noise_dropped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failure_snippet_bounded() {
        let long_block = "x".repeat(500);
        let failure = ParseFailure::new("https://example.com", "bad json", &long_block);
        assert_eq!(failure.snippet.chars().count(), SNIPPET_LEN);
    }

    #[test]
    fn test_parse_failure_short_block() {
        let failure = ParseFailure::new("https://example.com", "bad json", "{oops");
        assert_eq!(failure.snippet, "{oops");
    }
}
