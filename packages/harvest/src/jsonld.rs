//! Embedded structured-data extraction.
//!
//! City pages carry zero or more `<script type="application/ld+json">`
//! blocks whose text is a JSON document describing an entity. Blocks that
//! fail to parse, or whose top level is not an object, are routed to the
//! failure channel rather than dropped.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::types::record::NestedRecord;
use crate::types::report::ParseFailure;

/// Extract the text content of every JSON-LD script block in a page.
pub fn extract_blocks(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector");

    document
        .select(&selector)
        .map(|el| el.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect()
}

/// Parse extracted blocks into nested records.
///
/// Returns the successfully parsed records and the failures, each failure
/// tagged with the page URL and a bounded snippet of the block.
pub fn parse_blocks(url: &str, blocks: &[String]) -> (Vec<NestedRecord>, Vec<ParseFailure>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for block in blocks {
        match serde_json::from_str::<Value>(block) {
            Ok(Value::Object(map)) => records.push(map),
            Ok(other) => {
                debug!(url = %url, "JSON-LD block with non-object top level");
                failures.push(ParseFailure::new(
                    url,
                    format!("top-level JSON is not an object (got {})", kind(&other)),
                    block,
                ));
            }
            Err(e) => {
                debug!(url = %url, error = %e, "JSON-LD block failed to parse");
                failures.push(ParseFailure::new(url, e, block));
            }
        }
    }

    (records, failures)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = r#"
        <html><head>
        <script type="application/ld+json">{"@type": "Organization", "name": "A"}</script>
        <script type="text/javascript">var x = 1;</script>
        </head><body>
        <script type="application/ld+json">{"name": "B"}</script>
        <script type="application/ld+json">   </script>
        </body></html>
    "#;

    #[test]
    fn test_extract_blocks_selects_only_jsonld() {
        let blocks = extract_blocks(PAGE);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("Organization"));
        assert!(blocks[1].contains("\"B\""));
    }

    #[test]
    fn test_extract_blocks_empty_page() {
        assert!(extract_blocks("<html><body>No scripts</body></html>").is_empty());
    }

    #[test]
    fn test_parse_blocks_routes_failures() {
        let blocks = vec![
            r#"{"name": "Good"}"#.to_string(),
            r#"{"name": broken"#.to_string(),
            r#"[1, 2, 3]"#.to_string(),
        ];

        let (records, failures) = parse_blocks("https://example.com/city", &blocks);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some(&json!("Good")));

        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.url == "https://example.com/city"));
        assert!(failures[1].error.contains("not an object"));
    }
}
