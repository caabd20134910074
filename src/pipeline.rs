//! The fixed five-stage pipeline: map, derive, merge, validate.
//!
//! Control flow is strictly linear per record; validation is the sole
//! rejection point for well-formed records. Malformed rows fail at the
//! schema-mapping boundary and are handled per [`ErrorPolicy`].

use crate::derive::derive;
use crate::error::HarmonizeError;
use crate::merge::merge;
use crate::record::TripRecord;
use crate::schema::{RawRow, SchemaId};
use crate::validate::{ExclusionRule, filter};
use tracing::{info, warn};

/// How a per-record mapping failure is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Drop the offending row with a warning and keep going. A single
    /// malformed row should not abort an entire analysis batch.
    #[default]
    SkipAndLog,
    /// Abort the whole run on the first malformed row, for
    /// data-quality-gated runs.
    Strict,
}

/// One named source batch of already-parsed raw rows.
pub struct SourceBatch {
    pub schema: SchemaId,
    pub rows: Vec<RawRow>,
}

/// Runs the full pipeline: per-batch mapping and derivation, merge,
/// then validity filtering. Returns the cleaned record set.
///
/// # Errors
///
/// Under [`ErrorPolicy::Strict`], the first mapping failure aborts the
/// run. Under [`ErrorPolicy::SkipAndLog`] this function cannot fail.
pub fn harmonize(
    batches: Vec<SourceBatch>,
    rules: &[ExclusionRule],
    policy: ErrorPolicy,
) -> Result<Vec<TripRecord>, HarmonizeError> {
    let mut mapped_batches = Vec::with_capacity(batches.len());

    for batch in batches {
        let schema = batch.schema.schema();
        let total = batch.rows.len();
        let mut mapped = Vec::with_capacity(total);
        let mut skipped = 0usize;

        for (index, row) in batch.rows.iter().enumerate() {
            match schema.map_row(row).map(|record| derive(&record)) {
                Ok(record) => mapped.push(record),
                Err(err) => match policy {
                    ErrorPolicy::Strict => return Err(err),
                    ErrorPolicy::SkipAndLog => {
                        skipped += 1;
                        warn!(
                            schema = batch.schema.as_str(),
                            row = index,
                            error = %err,
                            "Skipping malformed row"
                        );
                    }
                },
            }
        }

        info!(
            schema = batch.schema.as_str(),
            total,
            mapped = mapped.len(),
            skipped,
            "Mapped source batch"
        );
        mapped_batches.push(mapped);
    }

    let unified = merge(mapped_batches);
    let cleaned = filter(unified, rules);

    info!(cleaned = cleaned.len(), "Pipeline complete");
    Ok(cleaned)
}
