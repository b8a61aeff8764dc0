//! Column-set policy and CSV export.
//!
//! Flat records are heterogeneous: the output schema is whatever keys the
//! retained records carry. The active default is the dynamic union of
//! observed keys in first-seen order. A fixed, hand-curated column list is
//! available as an explicit policy; with it, a record key outside the list
//! is an error, never silent loss.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::ExportError;
use crate::types::record::FlatRecord;

/// How output columns are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnPolicy {
    /// Union of keys observed across all retained records, in first-seen
    /// order. The default.
    Union,

    /// A fixed column list decided ahead of time. Any record key outside
    /// the list fails the export with [`ExportError::ColumnMismatch`].
    Fixed(Vec<String>),
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        Self::Union
    }
}

/// Union of keys across records, in first-seen order.
pub fn column_union(rows: &[FlatRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut columns = Vec::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key.to_string()) {
                columns.push(key.to_string());
            }
        }
    }
    columns
}

/// Resolve the effective column list for a set of rows.
///
/// Under [`ColumnPolicy::Fixed`], every record key must appear in the
/// list; the first stray key aborts the export.
pub fn resolve_columns(
    rows: &[FlatRecord],
    policy: &ColumnPolicy,
) -> Result<Vec<String>, ExportError> {
    match policy {
        ColumnPolicy::Union => Ok(column_union(rows)),
        ColumnPolicy::Fixed(columns) => {
            for row in rows {
                for key in row.keys() {
                    if !columns.iter().any(|c| c == key) {
                        return Err(ExportError::ColumnMismatch {
                            key: key.to_string(),
                        });
                    }
                }
            }
            Ok(columns.clone())
        }
    }
}

/// Write rows as CSV: a header row, then one row per record.
///
/// Output is UTF-8 with no blank lines between records. Keys missing
/// from a record serialize as empty cells. Returns the number of data
/// rows written.
pub fn write_csv<W: Write>(
    writer: W,
    rows: &[FlatRecord],
    policy: &ColumnPolicy,
) -> Result<usize, ExportError> {
    let columns = resolve_columns(rows, policy)?;
    if columns.is_empty() {
        // Nothing observed and nothing declared; a zero-field record is
        // not writable CSV.
        return Ok(0);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;

    for row in rows {
        let cells: Vec<String> = columns.iter().map(|c| row.cell(c)).collect();
        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush()?;
    Ok(rows.len())
}

/// Write rows to a CSV file at `path`.
pub fn write_csv_file(
    path: impl AsRef<Path>,
    rows: &[FlatRecord],
    policy: &ColumnPolicy,
) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let written = write_csv(file, rows, policy)?;
    info!(path = %path.display(), rows = written, "CSV written");
    Ok(written)
}

/// Deterministic output filename carrying the run date:
/// `{stem}_{YYYY-MM-DD}.csv`.
pub fn dated_filename(stem: &str, date: NaiveDate) -> String {
    format!("{stem}_{}.csv", date.format("%Y-%m-%d"))
}
