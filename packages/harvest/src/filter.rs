//! Entity filter: separates genuine listing records from site-wide
//! JSON-LD noise (organization/breadcrumb metadata) that shares the same
//! format.
//!
//! The placeholder list encodes knowledge about one specific source site,
//! so it is injectable rather than hard-coded: point the filter at a
//! different site's noise values to reuse it.

use crate::types::record::FlatRecord;

/// Identifying key a real listing must carry.
const NAME_KEY: &str = "name";

/// Predicate distinguishing listing entities from site metadata.
#[derive(Debug, Clone)]
pub struct EntityFilter {
    placeholders: Vec<String>,
}

impl Default for EntityFilter {
    /// Filter configured for the reference directory site: its display
    /// name and root URL both leak into per-city pages as JSON-LD
    /// organization metadata.
    fn default() -> Self {
        Self {
            placeholders: vec![
                "FoodPantries.org".to_string(),
                "https://www.foodpantries.org/".to_string(),
            ],
        }
    }
}

impl EntityFilter {
    /// Filter with no placeholder values (only the name check applies).
    pub fn new() -> Self {
        Self {
            placeholders: Vec::new(),
        }
    }

    /// Add a placeholder `name` value to reject.
    pub fn with_placeholder(mut self, value: impl Into<String>) -> Self {
        self.placeholders.push(value.into());
        self
    }

    /// Replace the placeholder list.
    pub fn with_placeholders(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.placeholders = values.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a flattened record is a real listing entity.
    ///
    /// False when the record has no `name` key, when the name is an
    /// empty string, or when it equals one of the placeholder values.
    pub fn is_entity(&self, record: &FlatRecord) -> bool {
        let Some(value) = record.get(NAME_KEY) else {
            return false;
        };

        match value.as_str() {
            Some(name) => {
                !name.trim().is_empty() && !self.placeholders.iter().any(|p| p == name)
            }
            // Non-string names (numbers, booleans) are not placeholders.
            None => !value.is_null(),
        }
    }
}
