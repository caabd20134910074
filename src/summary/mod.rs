//! Grouped summary statistics over the cleaned trip set.
//!
//! This module holds the generic group-by/reduce engine, the summary
//! table shape handed to the exporter, and the five canonical reporting
//! views (ride-length stats by rider class, weekday, month, hour, and
//! top stations).

pub mod aggregate;
pub mod table;
pub mod utility;
pub mod views;
