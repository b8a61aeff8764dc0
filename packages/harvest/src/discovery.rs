//! Directory-page link discovery and reference-list filtering.
//!
//! The directory page lays out per-city links in a table. Discovered
//! links are restricted to a reference list of valid place names sourced
//! from a second site; known misspellings are reconciled through an
//! explicit alias map, never fuzzy matching.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::error::HarvestError;
use crate::types::page::CityLink;

/// Extract city links from a directory page.
///
/// `selector` is a CSS selector for the anchors (configurable because a
/// bad selector is a config error, not a code change). Relative hrefs are
/// resolved against `base_url`; anchor text becomes the city name.
pub fn extract_city_links(
    base_url: &str,
    html: &str,
    selector: &str,
) -> Result<Vec<CityLink>, HarvestError> {
    let base = Url::parse(base_url).map_err(|e| HarvestError::Config {
        reason: format!("invalid directory URL {base_url}: {e}"),
    })?;
    let selector = scraper::Selector::parse(selector).map_err(|e| HarvestError::Config {
        reason: format!("invalid link selector: {e}"),
    })?;

    let document = scraper::Html::parse_document(html);
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for el in document.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let name = el.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }

        match base.join(href) {
            Ok(resolved) => {
                let url = resolved.to_string();
                if seen.insert(url.clone()) {
                    links.push(CityLink::new(name, url));
                }
            }
            Err(e) => debug!(href = %href, error = %e, "unresolvable href skipped"),
        }
    }

    Ok(links)
}

/// Reference list of valid place names, with an explicit alias map.
#[derive(Debug, Clone, Default)]
pub struct PlaceIndex {
    names: HashSet<String>,
    aliases: HashMap<String, String>,
}

/// Case-fold and collapse internal whitespace for membership checks.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl PlaceIndex {
    /// Build an index from place names.
    pub fn new(names: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            names: names.into_iter().map(|n| normalize_name(n.as_ref())).collect(),
            aliases: HashMap::new(),
        }
    }

    /// Register a known misspelling or alternate spelling.
    pub fn with_alias(mut self, alias: impl AsRef<str>, canonical: impl AsRef<str>) -> Self {
        self.aliases
            .insert(normalize_name(alias.as_ref()), normalize_name(canonical.as_ref()));
        self
    }

    /// Load place names from a newline-delimited reader.
    ///
    /// Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut names = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            names.insert(normalize_name(trimmed));
        }
        Ok(Self {
            names,
            aliases: HashMap::new(),
        })
    }

    /// Load place names from a file.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Load aliases from a reader of `alias = canonical` lines.
    pub fn load_aliases<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match trimmed.split_once('=') {
                Some((alias, canonical)) => {
                    self.aliases
                        .insert(normalize_name(alias), normalize_name(canonical));
                }
                None => warn!(line = %trimmed, "alias line without '=' skipped"),
            }
        }
        Ok(())
    }

    /// Load aliases from a file.
    pub fn load_aliases_from_file(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.load_aliases(BufReader::new(File::open(path)?))
    }

    /// Whether a name (directly or via alias) is in the reference list.
    pub fn contains(&self, name: &str) -> bool {
        let normalized = normalize_name(name);
        if self.names.contains(&normalized) {
            return true;
        }
        self.aliases
            .get(&normalized)
            .is_some_and(|canonical| self.names.contains(canonical))
    }

    /// Number of place names in the reference list.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the reference list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Keep only links whose city name passes the reference list.
pub fn filter_links(links: Vec<CityLink>, index: &PlaceIndex) -> Vec<CityLink> {
    links
        .into_iter()
        .filter(|link| {
            let keep = index.contains(&link.name);
            if !keep {
                debug!(city = %link.name, "not in reference list, skipped");
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DIRECTORY: &str = r##"
        <html><body>
        <table>
          <tr><td><a href="/mn/minneapolis">Minneapolis</a></td></tr>
          <tr><td><a href="/mn/st-paul">St. Paul</a></td></tr>
          <tr><td><a href="https://example.org/mn/duluth">Duluth</a></td></tr>
          <tr><td><a href="#top">Back to top</a></td></tr>
          <tr><td><a href="mailto:info@example.org">Contact</a></td></tr>
          <tr><td><a href="/mn/minneapolis">Minneapolis</a></td></tr>
        </table>
        <a href="/about">About</a>
        </body></html>
    "##;

    #[test]
    fn test_extract_city_links_from_table() {
        let links =
            extract_city_links("https://example.org/mn", DIRECTORY, "table a[href]").unwrap();

        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Minneapolis", "St. Paul", "Duluth"]);
        assert_eq!(links[0].url, "https://example.org/mn/minneapolis");
        assert_eq!(links[1].url, "https://example.org/mn/st-paul");
    }

    #[test]
    fn test_extract_city_links_bad_selector_is_config_error() {
        let err = extract_city_links("https://example.org", DIRECTORY, "[[[").unwrap_err();
        assert!(matches!(err, HarvestError::Config { .. }));
    }

    #[test]
    fn test_place_index_membership_is_case_insensitive() {
        let index = PlaceIndex::new(["Minneapolis", "Duluth"]);

        assert!(index.contains("minneapolis"));
        assert!(index.contains("  DULUTH  "));
        assert!(!index.contains("St. Paul"));
    }

    #[test]
    fn test_alias_resolution_no_fuzzy_matching() {
        let index = PlaceIndex::new(["Saint Paul"]).with_alias("St. Paul", "Saint Paul");

        assert!(index.contains("St. Paul"));
        assert!(index.contains("Saint  Paul"));
        // Near misses stay out: no fuzzy matching.
        assert!(!index.contains("Sant Paul"));
    }

    #[test]
    fn test_from_reader_skips_comments() {
        let input = Cursor::new("# header\nMinneapolis\n\nDuluth\n");
        let index = PlaceIndex::from_reader(input).unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.contains("Minneapolis"));
    }

    #[test]
    fn test_load_aliases() {
        let mut index = PlaceIndex::new(["Saint Paul"]);
        index
            .load_aliases(Cursor::new("# aliases\nSt. Paul = Saint Paul\nbad line\n"))
            .unwrap();

        assert!(index.contains("St. Paul"));
    }

    #[test]
    fn test_filter_links() {
        let links = vec![
            CityLink::new("Minneapolis", "https://example.org/mn/minneapolis"),
            CityLink::new("Nowhere", "https://example.org/mn/nowhere"),
        ];
        let index = PlaceIndex::new(["Minneapolis"]);

        let kept = filter_links(links, &index);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Minneapolis");
    }
}
