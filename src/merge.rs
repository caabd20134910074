//! Concatenation of mapped record batches into one unified sequence.

use crate::record::TripRecord;

/// Merges already-mapped batches by straight concatenation.
///
/// No deduplication and no reordering: source periods are disjoint in
/// time, so ingestion order is acceptable and the output length always
/// equals the sum of the input lengths.
pub fn merge(batches: Vec<Vec<TripRecord>>) -> Vec<TripRecord> {
    let total = batches.iter().map(Vec::len).sum();
    let mut unified = Vec::with_capacity(total);
    for batch in batches {
        unified.extend(batch);
    }
    unified
}
