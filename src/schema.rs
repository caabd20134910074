//! Schema mapping: translating raw rows from a named source layout into
//! canonical [`TripRecord`]s.
//!
//! Each known source schema carries a static field-mapping table and a
//! recode table for its rider-class vocabulary. Columns a source has
//! beyond the canonical set (geolocation, demographics, a precomputed
//! trip duration) are dropped at this boundary; the precomputed duration
//! in particular is never trusted and is always recomputed from the
//! timestamps so every source measures duration the same way.

use crate::error::HarmonizeError;
use crate::record::{MemberCasual, TripRecord};
use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::HashMap;

/// A raw row as delivered by an ingestion collaborator: column name to
/// scalar value.
pub type RawRow = HashMap<String, Value>;

/// Timestamp layouts accepted from source batches, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Identifier of a known source schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    /// The current collection period's layout (`ride_id`, `started_at`, ...).
    Current,
    /// The earlier collection period's layout (`trip_id`, `start_time`,
    /// `usertype`, ...).
    Legacy,
}

impl SchemaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaId::Current => "current",
            SchemaId::Legacy => "legacy",
        }
    }

    pub fn parse(name: &str) -> Option<SchemaId> {
        match name.trim().to_lowercase().as_str() {
            "current" => Some(SchemaId::Current),
            "legacy" => Some(SchemaId::Legacy),
            _ => None,
        }
    }

    /// The static mapping tables for this schema.
    pub fn schema(&self) -> &'static SourceSchema {
        match self {
            SchemaId::Current => &CURRENT,
            SchemaId::Legacy => &LEGACY,
        }
    }
}

/// Source column names feeding each canonical field.
struct FieldMap {
    ride_id: &'static str,
    /// `None` when the source period predates equipment discriminators.
    rideable_type: Option<&'static str>,
    started_at: &'static str,
    ended_at: &'static str,
    start_station_name: &'static str,
    start_station_id: &'static str,
    end_station_name: &'static str,
    end_station_id: &'static str,
    member_casual: &'static str,
}

/// Static mapping and recode tables for one known source layout.
pub struct SourceSchema {
    id: SchemaId,
    fields: FieldMap,
    /// Source rider-class vocabulary to the canonical pair.
    rider_class: &'static [(&'static str, MemberCasual)],
    /// Canonical `rideable_type` used when the source has no such column.
    default_rideable_type: &'static str,
}

static CURRENT: SourceSchema = SourceSchema {
    id: SchemaId::Current,
    fields: FieldMap {
        ride_id: "ride_id",
        rideable_type: Some("rideable_type"),
        started_at: "started_at",
        ended_at: "ended_at",
        start_station_name: "start_station_name",
        start_station_id: "start_station_id",
        end_station_name: "end_station_name",
        end_station_id: "end_station_id",
        member_casual: "member_casual",
    },
    rider_class: &[
        ("member", MemberCasual::Member),
        ("casual", MemberCasual::Casual),
    ],
    default_rideable_type: "docked_bike",
};

static LEGACY: SourceSchema = SourceSchema {
    id: SchemaId::Legacy,
    fields: FieldMap {
        ride_id: "trip_id",
        rideable_type: None,
        started_at: "start_time",
        ended_at: "end_time",
        start_station_name: "from_station_name",
        start_station_id: "from_station_id",
        end_station_name: "to_station_name",
        end_station_id: "to_station_id",
        member_casual: "usertype",
    },
    rider_class: &[
        ("Subscriber", MemberCasual::Member),
        ("Customer", MemberCasual::Casual),
    ],
    default_rideable_type: "docked_bike",
};

impl SourceSchema {
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// Maps one raw row into the canonical schema.
    ///
    /// Identifier-like columns that are numeric in one source and textual
    /// in another are coerced to strings here so the merged dataset is
    /// type-uniform. Derived fields are left unset.
    ///
    /// # Errors
    ///
    /// [`HarmonizeError::SchemaMismatch`] when a required canonical field
    /// has no source column or fails coercion, naming the missing column;
    /// [`HarmonizeError::InvalidTimestamp`] when either timestamp column
    /// is absent or unparsable.
    pub fn map_row(&self, row: &RawRow) -> Result<TripRecord, HarmonizeError> {
        let rideable_type = match self.fields.rideable_type {
            Some(column) => self.string_field(row, column, "rideable_type")?,
            None => self.default_rideable_type.to_string(),
        };

        Ok(TripRecord {
            ride_id: self.string_field(row, self.fields.ride_id, "ride_id")?,
            rideable_type,
            started_at: self.timestamp_field(row, self.fields.started_at)?,
            ended_at: self.timestamp_field(row, self.fields.ended_at)?,
            start_station_name: self.string_field(
                row,
                self.fields.start_station_name,
                "start_station_name",
            )?,
            start_station_id: self.string_field(
                row,
                self.fields.start_station_id,
                "start_station_id",
            )?,
            end_station_name: self.string_field(
                row,
                self.fields.end_station_name,
                "end_station_name",
            )?,
            end_station_id: self.string_field(row, self.fields.end_station_id, "end_station_id")?,
            member_casual: self.rider_class_field(row)?,
            derived: None,
        })
    }

    fn string_field(
        &self,
        row: &RawRow,
        column: &'static str,
        field: &'static str,
    ) -> Result<String, HarmonizeError> {
        let value = row
            .get(column)
            .ok_or_else(|| HarmonizeError::SchemaMismatch {
                schema: self.id.as_str(),
                field,
                detail: format!("missing source column `{column}`"),
            })?;

        coerce_string(value).ok_or_else(|| HarmonizeError::SchemaMismatch {
            schema: self.id.as_str(),
            field,
            detail: format!("value `{value}` in `{column}` is not a scalar identifier"),
        })
    }

    fn timestamp_field(
        &self,
        row: &RawRow,
        column: &'static str,
    ) -> Result<NaiveDateTime, HarmonizeError> {
        let invalid = |value: String| HarmonizeError::InvalidTimestamp {
            schema: self.id.as_str(),
            column,
            value,
        };

        let text = match row.get(column) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(other) => return Err(invalid(other.to_string())),
            None => return Err(invalid("<absent>".to_string())),
        };

        TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
            .ok_or_else(|| invalid(text))
    }

    fn rider_class_field(&self, row: &RawRow) -> Result<MemberCasual, HarmonizeError> {
        let raw = self.string_field(row, self.fields.member_casual, "member_casual")?;

        self.rider_class
            .iter()
            .find(|(label, _)| *label == raw)
            .map(|(_, class)| *class)
            .ok_or_else(|| HarmonizeError::SchemaMismatch {
                schema: self.id.as_str(),
                field: "member_casual",
                detail: format!("unrecognized rider class `{raw}`"),
            })
    }
}

/// Canonical string form of a scalar cell.
///
/// Integer-valued numbers print without a fractional part so ids that are
/// numeric in one source concatenate uniformly with textual ids from
/// another. Arrays and objects are not scalars and fail coercion.
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 {
                        format!("{}", f as i64)
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
