//! Error types for the harmonization pipeline.
//!
//! Only the schema-mapping boundary can fail on a per-record basis:
//! [`HarmonizeError::SchemaMismatch`] when a required canonical field has
//! no usable source, [`HarmonizeError::InvalidTimestamp`] when a timestamp
//! column is missing or unparsable. Merging, validation, and aggregation
//! operate on already-canonical records and cannot fail.
//!
//! Negative or nonsensical ride durations are never errors; they are
//! ordinary data excluded by the validation stage.

use thiserror::Error;

/// Per-record failure while mapping a raw row into the canonical schema.
#[derive(Debug, Error)]
pub enum HarmonizeError {
    /// A required canonical field has no source column for the given
    /// schema, or its value failed coercion.
    #[error("schema `{schema}`: no usable value for `{field}`: {detail}")]
    SchemaMismatch {
        schema: &'static str,
        field: &'static str,
        detail: String,
    },

    /// `started_at` or `ended_at` is missing or unparsable.
    #[error("schema `{schema}`: invalid timestamp in `{column}`: `{value}`")]
    InvalidTimestamp {
        schema: &'static str,
        column: &'static str,
        value: String,
    },
}
