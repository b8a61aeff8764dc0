//! Nested and flat record types.
//!
//! A nested record is the parsed form of one JSON-LD block: a JSON object
//! whose values may be objects, arrays, or scalars. Flattening collapses it
//! into a [`FlatRecord`], a single-level mapping from joined key paths to
//! scalar values, suitable for tabular export.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed structured-data block: the top-level JSON object of one
/// embedded `<script type="application/ld+json">` document.
///
/// Callers parse JSON before flattening; a non-object top-level document
/// is rejected at the parse boundary, not here.
pub type NestedRecord = serde_json::Map<String, Value>;

/// A single-level mapping from joined key paths to scalar values.
///
/// Keys are insertion-ordered so repeated runs produce identical column
/// orderings. Every value is scalar (null, bool, number, or string) by
/// construction - the normalizer only ever emits leaves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRecord {
    fields: IndexMap<String, Value>,
}

impl FlatRecord {
    /// Create an empty flat record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a scalar value. On a duplicate key the new value replaces
    /// the old one (last write wins) while keeping the key's original
    /// position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Whether the record contains a key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render one field as a CSV cell.
    ///
    /// Missing keys and JSON nulls render as the empty string; strings
    /// render bare (no quotes); numbers and booleans use their display
    /// form.
    pub fn cell(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(Value::Number(n)) => n.to_string(),
            // The normalizer never emits these; render as JSON if one
            // ever arrives through manual construction.
            Some(other) => other.to_string(),
        }
    }
}

impl FromIterator<(String, Value)> for FlatRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FlatRecord {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
