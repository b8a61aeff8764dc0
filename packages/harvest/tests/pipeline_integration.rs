//! End-to-end pipeline tests against canned pages.

use harvest::{
    ColumnPolicy, EntityFilter, HarvestConfig, Harvester, MockFetcher, PlaceIndex,
};

const DIRECTORY_URL: &str = "https://example.org/st/minnesota";

const DIRECTORY: &str = r#"
    <html><body>
    <table>
      <tr><td><a href="/mn/minneapolis">Minneapolis</a></td></tr>
      <tr><td><a href="/mn/duluth">Duluth</a></td></tr>
    </table>
    </body></html>
"#;

/// One parseable entity block and one malformed block.
const MINNEAPOLIS: &str = r#"
    <html><body>
    <script type="application/ld+json">
      {"@type": "LocalBusiness", "name": "North Side Pantry",
       "address": {"streetAddress": "1 Main St", "addressLocality": "Minneapolis"}}
    </script>
    <script type="application/ld+json">
      {"name": "Broken Pantry", "address":
    </script>
    </body></html>
"#;

/// No structured-data blocks at all.
const DULUTH: &str = "<html><body><p>Nothing embedded here.</p></body></html>";

fn fixture() -> MockFetcher {
    MockFetcher::new()
        .with_page(DIRECTORY_URL, DIRECTORY)
        .with_page("https://example.org/mn/minneapolis", MINNEAPOLIS)
        .with_page("https://example.org/mn/duluth", DULUTH)
}

fn places() -> PlaceIndex {
    PlaceIndex::new(["Minneapolis", "Duluth"])
}

#[tokio::test]
async fn one_good_block_one_malformed_block_one_row_one_failure() {
    let harvester = Harvester::new(fixture(), HarvestConfig::new(DIRECTORY_URL));
    let report = harvester.run(&places()).await.unwrap();

    assert_eq!(report.rows.len(), 1, "exactly one retained row");
    assert_eq!(report.parse_failures.len(), 1, "exactly one parse failure");
    assert_eq!(report.pages_fetched, 2);
    assert!(report.failed_pages.is_empty());

    let row = &report.rows[0];
    assert_eq!(row.get_str("name"), Some("North Side Pantry"));
    // Nested address flattened with the default separator.
    assert_eq!(row.get_str("address_streetAddress"), Some("1 Main St"));
    assert_eq!(row.get_str("address_addressLocality"), Some("Minneapolis"));

    let failure = &report.parse_failures[0];
    assert_eq!(failure.url, "https://example.org/mn/minneapolis");
    assert!(failure.snippet.contains("Broken Pantry"));
}

#[tokio::test]
async fn report_rows_export_as_csv() {
    let harvester = Harvester::new(fixture(), HarvestConfig::new(DIRECTORY_URL));
    let report = harvester.run(&places()).await.unwrap();

    let mut out = Vec::new();
    let written = harvest::write_csv(&mut out, &report.rows, &ColumnPolicy::Union).unwrap();
    assert_eq!(written, 1);

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("name"));
    assert!(header.contains("address_streetAddress"));
    assert_eq!(lines.next().unwrap().matches("North Side Pantry").count(), 1);
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn site_metadata_blocks_are_filtered_not_errors() {
    let with_noise = r#"
        <html><body>
        <script type="application/ld+json">{"name": "FoodPantries.org"}</script>
        <script type="application/ld+json">
          {"name": "South Side Pantry", "telephone": "555-0100"}
        </script>
        </body></html>
    "#;

    let mock = MockFetcher::new()
        .with_page(DIRECTORY_URL, DIRECTORY)
        .with_page("https://example.org/mn/minneapolis", with_noise)
        .with_page("https://example.org/mn/duluth", DULUTH);

    let harvester = Harvester::new(mock, HarvestConfig::new(DIRECTORY_URL));
    let report = harvester.run(&places()).await.unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.noise_dropped, 1);
    assert!(report.parse_failures.is_empty());
}

#[tokio::test]
async fn custom_filter_and_alias_resolution() {
    let directory = r#"
        <table><tr><td><a href="/mn/st-paul">St. Paul</a></td></tr></table>
    "#;
    let st_paul = r#"
        <script type="application/ld+json">{"name": "Capitol Pantry"}</script>
    "#;

    let mock = MockFetcher::new()
        .with_page(DIRECTORY_URL, directory)
        .with_page("https://example.org/mn/st-paul", st_paul);

    // Reference list spells the city out; the directory abbreviates.
    let places = PlaceIndex::new(["Saint Paul"]).with_alias("St. Paul", "Saint Paul");

    let harvester = Harvester::new(mock, HarvestConfig::new(DIRECTORY_URL))
        .with_filter(EntityFilter::new().with_placeholder("Some Other Site"));
    let report = harvester.run(&places).await.unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].get_str("name"), Some("Capitol Pantry"));
}
