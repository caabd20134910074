//! Derivation of temporal and duration fields from the canonical
//! timestamps.
//!
//! Derivation carries no filtering policy: a ride whose end precedes its
//! start still derives a (negative) length and passes through, so the
//! validation stage stays the single point of policy for what counts as
//! a usable ride.

use crate::record::{DerivedFields, TripRecord, Weekday};
use crate::summary::utility::round2;
use chrono::Datelike;

/// Returns a copy of `record` with its derived fields populated.
///
/// Calendar fields come from `started_at` under the timestamp's own
/// calendar; no timezone conversion is performed. `ride_length_minutes`
/// is `ended_at - started_at` in minutes, rounded to 2 decimal places,
/// and may be negative. Idempotent for unchanged timestamps.
pub fn derive(record: &TripRecord) -> TripRecord {
    let started = record.started_at;
    let seconds = record.ended_at.signed_duration_since(started).num_seconds();

    let derived = DerivedFields {
        date: started.date(),
        year: started.year(),
        month: started.month(),
        day: started.day(),
        weekday: Weekday::from(started.weekday()),
        ride_length_minutes: round2(seconds as f64 / 60.0),
    };

    TripRecord {
        derived: Some(derived),
        ..record.clone()
    }
}
