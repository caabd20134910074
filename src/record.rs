//! Canonical trip record types shared by every pipeline stage.
//!
//! All source schemas are mapped into [`TripRecord`]; derived temporal
//! fields live in [`DerivedFields`] and are populated only by the
//! derivation stage, never by a schema mapper.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rider class, the central analytical dimension.
///
/// Declaration order gives the canonical lexicographic output order:
/// `casual` before `member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberCasual {
    Casual,
    Member,
}

impl MemberCasual {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberCasual::Casual => "casual",
            MemberCasual::Member => "member",
        }
    }
}

impl fmt::Display for MemberCasual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of week with a fixed Sunday-first ordering.
///
/// `chrono::Weekday` orders Monday-first, and host locales vary; summary
/// tables must always sort Sunday < Monday < ... < Saturday, so the order
/// is pinned here by declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

/// Fields computed from the canonical timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// Calendar date of `started_at`.
    pub date: NaiveDate,
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// 1-31.
    pub day: u32,
    pub weekday: Weekday,
    /// `ended_at - started_at` in minutes, rounded to 2 decimal places.
    /// May be negative until the validation stage drops such records.
    pub ride_length_minutes: f64,
}

/// One bicycle rental event in the canonical schema.
///
/// `ride_id` is opaque and not required to be unique across sources.
/// Station fields may be empty strings. Timestamps carry no timezone;
/// they are taken as already being in the analysis's reference timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_name: String,
    pub start_station_id: String,
    pub end_station_name: String,
    pub end_station_id: String,
    pub member_casual: MemberCasual,
    /// Populated by the derivation stage only.
    pub derived: Option<DerivedFields>,
}
