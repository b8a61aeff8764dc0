//! Structured-data harvesting pipeline for directory websites.
//!
//! Fetches a directory page, follows per-city links restricted to a
//! reference list of place names, extracts embedded JSON-LD blocks from
//! each city page, flattens every parsed record into a single-level
//! mapping, filters out site-metadata noise, and exports the surviving
//! rows as CSV.
//!
//! # Design
//!
//! - Fetching sits behind the [`fetch::PageFetcher`] seam so HTTP,
//!   rendering backends, and test fixtures are interchangeable.
//! - Per-page failures are isolated: one bad city page or malformed
//!   block never aborts a run; both land in the [`types::report`]
//!   failure channels.
//! - Flattening is last-write-wins on key collisions, and array
//!   elements that are not objects are dropped. Both behaviors are
//!   documented policy, tested as regressions.
//!
//! # Usage
//!
//! ```rust,ignore
//! use harvest::{Harvester, HarvestConfig, HttpFetcher, PlaceIndex};
//!
//! let places = PlaceIndex::from_file("places_mn.txt")?;
//! let config = HarvestConfig::new("https://www.foodpantries.org/st/minnesota");
//! let harvester = Harvester::new(HttpFetcher::new(), config);
//! let report = harvester.run(&places).await?;
//! harvest::export::write_csv_file("pantries.csv", &report.rows, &Default::default())?;
//! ```
//!
//! # Modules
//!
//! - [`normalize`] - Nested-record flattening (the core)
//! - [`filter`] - Entity filter separating listings from site metadata
//! - [`jsonld`] - JSON-LD block extraction and parsing
//! - [`discovery`] - Directory-link discovery and place-list filtering
//! - [`fetch`] / [`fetchers`] - Page-fetching seam and implementations
//! - [`pipeline`] - Orchestration
//! - [`export`] - Column policy and CSV writing

pub mod discovery;
pub mod error;
pub mod export;
pub mod fetch;
pub mod fetchers;
pub mod filter;
pub mod jsonld;
pub mod normalize;
pub mod pipeline;
pub mod types;

// Re-export core types at crate root
pub use error::{ExportError, FetchError, HarvestError, NormalizeError, Result};
pub use types::{
    config::HarvestConfig,
    page::{CityLink, FetchedPage},
    record::{FlatRecord, NestedRecord},
    report::{FailedPage, HarvestReport, ParseFailure},
};

// Re-export pipeline components
pub use discovery::{extract_city_links, filter_links, PlaceIndex};
pub use export::{column_union, dated_filename, write_csv, write_csv_file, ColumnPolicy};
pub use filter::EntityFilter;
pub use jsonld::{extract_blocks, parse_blocks};
pub use normalize::{flatten, flatten_with, DEFAULT_SEPARATOR, MAX_DEPTH};
pub use pipeline::Harvester;

// Re-export fetchers
pub use fetch::PageFetcher;
pub use fetchers::{HttpFetcher, MockFetcher};
