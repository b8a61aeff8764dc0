//! Fetcher implementations.

pub mod http;
pub mod mock;

pub use http::HttpFetcher;
pub use mock::MockFetcher;
