//! Typed errors for the harvest library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during a harvest run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Fetching a page failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Flattening a record failed
    #[error("normalize failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// CSV export failed
    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    /// Configuration error
    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Errors that can occur while fetching pages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// No page available for the URL (mock or cache miss)
    #[error("page not found: {url}")]
    NotFound { url: String },
}

/// Errors that can occur while flattening a nested record.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Nesting exceeds the recursion bound.
    ///
    /// JSON input is acyclic by construction, so this only fires on
    /// pathologically deep documents or hand-built cyclic values.
    #[error("nesting deeper than {limit} levels at key: {key}")]
    DepthExceeded { key: String, limit: usize },
}

/// Errors that can occur during CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A record carries a key outside the fixed column list.
    ///
    /// Under a fixed column policy this must be surfaced, never
    /// silently dropped.
    #[error("record key {key:?} not in fixed column list")]
    ColumnMismatch { key: String },

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Output I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
