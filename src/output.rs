//! Exporter glue: summary table serialization.
//!
//! The core's contract with the exporter is the table's logical column
//! order and 2-decimal rounding; the CSV/JSON plumbing here is glue.

use anyhow::Result;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::summary::table::SummaryTable;

/// Writes one summary table as `<dir>/<view name>.csv`, header first.
pub fn write_table(dir: &Path, table: &SummaryTable) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.csv", table.name));
    debug!(path = %path.display(), rows = table.rows.len(), "Writing summary table");

    let mut writer = WriterBuilder::new().from_path(&path)?;
    writer.write_record(&table.columns)?;

    for row in &table.rows {
        let mut fields: Vec<String> = row.key.clone();
        fields.extend(row.values.iter().map(|cell| cell.to_string()));
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    Ok(path)
}

/// Logs a summary table as pretty-printed JSON.
pub fn print_json(table: &SummaryTable) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}
