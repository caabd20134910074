//! The table shape handed to the exporter.
//!
//! Column order is part of the core's contract: group key columns first,
//! statistic columns last, numeric statistics rounded to 2 decimal
//! places. Serialization format and storage are the exporter's problem.

use serde::Serialize;
use std::fmt;

/// One statistic cell. Counts stay integral; every other statistic is a
/// 2-decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Count(u64),
    Number(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Count(n) => write!(f, "{n}"),
            Cell::Number(v) => write!(f, "{v:.2}"),
        }
    }
}

/// One output row: group key values followed by statistic values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: Vec<String>,
    pub values: Vec<Cell>,
}

/// A finished summary view in its deterministic output order.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    /// Stable view name, used by the exporter as a file stem.
    pub name: &'static str,
    /// Key columns first, statistic columns last.
    pub columns: Vec<&'static str>,
    pub rows: Vec<SummaryRow>,
}
