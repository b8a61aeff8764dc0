//! Harvest pipeline orchestration.
//!
//! One run: fetch the directory page, discover city links, restrict them
//! to the reference place list, fetch city pages with bounded concurrency,
//! extract and parse JSON-LD blocks, flatten each record, filter noise,
//! and accumulate everything into a [`HarvestReport`].
//!
//! Failure isolation: a city page that cannot be fetched, or a block that
//! cannot be parsed, never aborts the batch. Only the directory fetch
//! itself is fatal - without it there is no run.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::discovery::{extract_city_links, filter_links, PlaceIndex};
use crate::error::{NormalizeError, Result};
use crate::fetch::PageFetcher;
use crate::filter::EntityFilter;
use crate::jsonld::{extract_blocks, parse_blocks};
use crate::normalize::flatten_with;
use crate::types::config::HarvestConfig;
use crate::types::page::CityLink;
use crate::types::report::{FailedPage, HarvestReport, ParseFailure};

/// Runs the harvest pipeline against a [`PageFetcher`].
pub struct Harvester<F: PageFetcher> {
    fetcher: F,
    config: HarvestConfig,
    filter: EntityFilter,
}

impl<F: PageFetcher> Harvester<F> {
    /// Create a harvester with the default entity filter.
    pub fn new(fetcher: F, config: HarvestConfig) -> Self {
        Self {
            fetcher,
            config,
            filter: EntityFilter::default(),
        }
    }

    /// Use a custom entity filter.
    pub fn with_filter(mut self, filter: EntityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Run the full pipeline.
    ///
    /// Row order in the report is not a contract: city pages are fetched
    /// concurrently and merged as they complete.
    pub async fn run(&self, places: &PlaceIndex) -> Result<HarvestReport> {
        info!(
            url = %self.config.directory_url,
            fetcher = self.fetcher.name(),
            "harvest starting"
        );

        let directory = self.fetcher.fetch(&self.config.directory_url).await?;
        let discovered = extract_city_links(
            &self.config.directory_url,
            &directory.html,
            &self.config.link_selector,
        )?;
        let discovered_count = discovered.len();

        let mut links = filter_links(discovered, places);
        if let Some(max) = self.config.max_cities {
            links.truncate(max);
        }

        info!(
            discovered = discovered_count,
            visiting = links.len(),
            "city links discovered"
        );

        let city_reports: Vec<HarvestReport> = stream::iter(links)
            .map(|link| self.harvest_city(link))
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        let mut report = HarvestReport::new();
        for city_report in city_reports {
            report.absorb(city_report);
        }

        info!(
            rows = report.rows.len(),
            parse_failures = report.parse_failures.len(),
            failed_pages = report.failed_pages.len(),
            noise_dropped = report.noise_dropped,
            "harvest completed"
        );

        Ok(report)
    }

    /// Harvest one city page. Never fails: problems land in the report.
    async fn harvest_city(&self, link: CityLink) -> HarvestReport {
        let mut report = HarvestReport::new();

        let page = match self.fetcher.fetch(&link.url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(city = %link.name, url = %link.url, error = %e, "city page skipped");
                report.failed_pages.push(FailedPage {
                    url: link.url,
                    error: e.to_string(),
                });
                return report;
            }
        };
        report.pages_fetched = 1;

        if !page.has_content() {
            warn!(city = %link.name, url = %page.url, "empty page body, nothing to extract");
            return report;
        }

        let blocks = extract_blocks(&page.html);
        let (records, failures) = parse_blocks(&page.url, &blocks);
        report.parse_failures = failures;

        for record in &records {
            match flatten_with(record, "", &self.config.separator) {
                Ok(flat) => {
                    if self.filter.is_entity(&flat) {
                        report.rows.push(flat);
                    } else {
                        report.noise_dropped += 1;
                    }
                }
                // Absurdly deep block: treat like any other bad block
                // so one document cannot sink the batch.
                Err(e @ NormalizeError::DepthExceeded { .. }) => {
                    warn!(url = %page.url, error = %e, "record too deep, skipped");
                    let source = serde_json::to_string(record).unwrap_or_default();
                    report
                        .parse_failures
                        .push(ParseFailure::new(&page.url, e, &source));
                }
            }
        }

        report
    }
}
