//! Ingestion glue for the CLI: reading a source CSV file into raw rows.
//!
//! The core pipeline consumes already-parsed rows; this module is the
//! external collaborator that produces them for file-based runs. Every
//! cell is delivered as a string scalar and the schema mapper owns all
//! further coercion.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::schema::RawRow;

/// Reads one source batch CSV into raw rows keyed by the file's own
/// header names.
pub fn read_batch(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening source batch {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = RawRow::with_capacity(headers.len());
        for (column, value) in headers.iter().zip(record.iter()) {
            row.insert(column.to_string(), Value::String(value.to_string()));
        }
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Read source batch");
    Ok(rows)
}
