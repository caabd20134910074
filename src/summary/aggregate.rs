//! Generic group-by/reduce engine.
//!
//! Records are partitioned by a caller-supplied key function; each
//! group's ride lengths are fully materialized so the median is exact,
//! then the requested reducers run per group. Output order is the key
//! type's `Ord`, which the key types pin to the domain ordering (rider
//! class lexicographic, weekday Sunday-first, month and hour numeric).

use crate::record::TripRecord;
use crate::summary::table::Cell;
use crate::summary::utility::{mean, median, round2};
use std::collections::HashMap;
use std::hash::Hash;

/// A reducer over a group's ride lengths. `Count` counts records; the
/// rest reduce `ride_length_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Count,
    Mean,
    Median,
    Min,
    Max,
}

impl Statistic {
    /// Column name in the output table.
    pub fn column_name(&self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Min => "min",
            Statistic::Max => "max",
        }
    }

    fn compute(&self, lengths: &[f64]) -> Cell {
        match self {
            Statistic::Count => Cell::Count(lengths.len() as u64),
            Statistic::Mean => Cell::Number(round2(mean(lengths))),
            Statistic::Median => Cell::Number(round2(median(lengths))),
            Statistic::Min => Cell::Number(round2(lengths.iter().copied().fold(f64::INFINITY, f64::min))),
            Statistic::Max => Cell::Number(round2(lengths.iter().copied().fold(f64::NEG_INFINITY, f64::max))),
        }
    }
}

/// One group of the aggregation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<K> {
    pub key: K,
    /// One cell per requested statistic, in request order.
    pub cells: Vec<Cell>,
}

impl<K> Group<K> {
    /// The group's record count, when `Statistic::Count` was requested.
    pub fn count(&self) -> u64 {
        self.cells
            .iter()
            .find_map(|cell| match cell {
                Cell::Count(n) => Some(*n),
                Cell::Number(_) => None,
            })
            .unwrap_or(0)
    }
}

/// Groups `records` by `key_fn` and applies `stats` to each group's ride
/// lengths, returning groups sorted by key.
///
/// Records are expected to carry derived fields; an underived record
/// contributes a 0.0 length.
pub fn aggregate<K, F>(records: &[TripRecord], key_fn: F, stats: &[Statistic]) -> Vec<Group<K>>
where
    K: Ord + Eq + Hash,
    F: Fn(&TripRecord) -> K,
{
    let mut lengths_by_key: HashMap<K, Vec<f64>> = HashMap::new();

    for record in records {
        debug_assert!(record.derived.is_some());
        let length = record
            .derived
            .as_ref()
            .map(|d| d.ride_length_minutes)
            .unwrap_or(0.0);
        lengths_by_key.entry(key_fn(record)).or_default().push(length);
    }

    let mut groups: Vec<Group<K>> = lengths_by_key
        .into_iter()
        .map(|(key, lengths)| Group {
            key,
            cells: stats.iter().map(|s| s.compute(&lengths)).collect(),
        })
        .collect();

    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}
