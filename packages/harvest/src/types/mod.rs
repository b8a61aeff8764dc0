//! Data types for the harvest pipeline.

pub mod config;
pub mod page;
pub mod record;
pub mod report;
