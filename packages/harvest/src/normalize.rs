//! Structured-record normalizer.
//!
//! Collapses a nested JSON-LD record into a [`FlatRecord`] by joining key
//! paths with a separator. The dispatch is an exhaustive match on value
//! shape: objects recurse, arrays recurse into their object elements, and
//! scalars are emitted as leaves.
//!
//! # Merge policy
//!
//! Array elements contribute under the *same* joined key (no index is
//! injected), so sibling elements can produce colliding keys. Collisions
//! resolve last-write-wins in traversal order. This is the documented
//! policy, not an accident.
//!
//! # Dropped shapes
//!
//! Array elements that are scalars or nested arrays contribute nothing.
//! Documented and regression-tested rather than silently changed.

use serde_json::Value;

use crate::error::NormalizeError;
use crate::types::record::{FlatRecord, NestedRecord};

/// Recursion bound. JSON input is acyclic, so this only trips on
/// pathologically deep documents.
pub const MAX_DEPTH: usize = 64;

/// Default key-path separator.
pub const DEFAULT_SEPARATOR: &str = "_";

/// Flatten a nested record using the default separator and no prefix.
pub fn flatten(record: &NestedRecord) -> Result<FlatRecord, NormalizeError> {
    flatten_with(record, "", DEFAULT_SEPARATOR)
}

/// Flatten a nested record with an explicit prefix and separator.
pub fn flatten_with(
    record: &NestedRecord,
    prefix: &str,
    separator: &str,
) -> Result<FlatRecord, NormalizeError> {
    let mut out = FlatRecord::new();
    flatten_into(record, prefix, separator, 0, &mut out)?;
    Ok(out)
}

fn flatten_into(
    record: &NestedRecord,
    prefix: &str,
    separator: &str,
    depth: usize,
    out: &mut FlatRecord,
) -> Result<(), NormalizeError> {
    if depth > MAX_DEPTH {
        return Err(NormalizeError::DepthExceeded {
            key: prefix.to_string(),
            limit: MAX_DEPTH,
        });
    }

    for (key, value) in record {
        let new_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };

        match value {
            Value::Object(inner) => {
                flatten_into(inner, &new_key, separator, depth + 1, out)?;
            }
            Value::Array(items) => {
                // Object elements share the parent's key prefix; later
                // elements win collisions. Scalar and nested-array
                // elements are dropped.
                for item in items {
                    if let Value::Object(inner) = item {
                        flatten_into(inner, &new_key, separator, depth + 1, out)?;
                    }
                }
            }
            scalar => out.insert(new_key, scalar.clone()),
        }
    }

    Ok(())
}
