//! Validity filtering of derived records.
//!
//! Rules are exclusion predicates: a record survives iff no rule matches.
//! Exclusion is a set union, so rule order never changes the result.

use crate::record::TripRecord;
use std::collections::HashSet;
use tracing::debug;

/// Placeholder station used for equipment checks during the legacy
/// collection period; rides starting there are not customer trips.
pub const PLACEHOLDER_STATION: &str = "HQ QR";

/// One exclusion predicate. A matching record is dropped.
pub enum ExclusionRule {
    /// Drops rides whose derived length is below zero.
    NegativeRideLength,
    /// Drops rides starting at any of the listed station names.
    BlacklistedStartStation(HashSet<String>),
    /// Deployment-specific predicate; returns `true` to exclude.
    Custom {
        name: &'static str,
        predicate: Box<dyn Fn(&TripRecord) -> bool + Send + Sync>,
    },
}

impl ExclusionRule {
    pub fn name(&self) -> &str {
        match self {
            ExclusionRule::NegativeRideLength => "negative_ride_length",
            ExclusionRule::BlacklistedStartStation(_) => "blacklisted_start_station",
            ExclusionRule::Custom { name, .. } => name,
        }
    }

    /// Whether this rule excludes `record`.
    pub fn excludes(&self, record: &TripRecord) -> bool {
        match self {
            ExclusionRule::NegativeRideLength => record
                .derived
                .as_ref()
                .is_some_and(|d| d.ride_length_minutes < 0.0),
            ExclusionRule::BlacklistedStartStation(stations) => {
                stations.contains(&record.start_station_name)
            }
            ExclusionRule::Custom { predicate, .. } => predicate(record),
        }
    }
}

/// The default rule set: negative ride lengths and the known placeholder
/// test station.
pub fn default_rules() -> Vec<ExclusionRule> {
    let mut blacklist = HashSet::new();
    blacklist.insert(PLACEHOLDER_STATION.to_string());

    vec![
        ExclusionRule::NegativeRideLength,
        ExclusionRule::BlacklistedStartStation(blacklist),
    ]
}

/// Applies the exclusion rules, returning the cleaned record set.
pub fn filter(records: Vec<TripRecord>, rules: &[ExclusionRule]) -> Vec<TripRecord> {
    let before = records.len();

    let cleaned: Vec<TripRecord> = records
        .into_iter()
        .filter(|record| !rules.iter().any(|rule| rule.excludes(record)))
        .collect();

    debug!(
        before,
        after = cleaned.len(),
        dropped = before - cleaned.len(),
        "Applied exclusion rules"
    );

    cleaned
}
