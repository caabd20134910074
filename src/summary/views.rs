//! The five canonical reporting views.
//!
//! Every view partitions primarily by rider class (`casual` before
//! `member`); the secondary dimension uses its domain ordering: weekday
//! Sunday-first, month and hour-of-day numeric ascending, and stations
//! by descending ride count with an ascending name tie-break.

use crate::record::{MemberCasual, TripRecord};
use crate::summary::aggregate::{Group, Statistic, aggregate};
use crate::summary::table::{SummaryRow, SummaryTable};
use chrono::Timelike;

/// Stations reported per rider class in the top-station view.
pub const DEFAULT_TOP_STATIONS: usize = 10;

const RIDE_LENGTH_STATS: &[Statistic] = &[
    Statistic::Count,
    Statistic::Mean,
    Statistic::Median,
    Statistic::Min,
    Statistic::Max,
];

/// Ride-length descriptive statistics by rider class.
pub fn ride_length_by_rider_class(records: &[TripRecord]) -> SummaryTable {
    let groups = aggregate(records, |r| r.member_casual, RIDE_LENGTH_STATS);

    SummaryTable {
        name: "ride_length_by_rider_class",
        columns: with_stat_columns(vec!["member_casual"], RIDE_LENGTH_STATS),
        rows: groups
            .into_iter()
            .map(|g| SummaryRow {
                key: vec![g.key.to_string()],
                values: g.cells,
            })
            .collect(),
    }
}

/// Ride count and average duration by rider class and weekday
/// (Sunday-first).
pub fn rides_by_weekday(records: &[TripRecord]) -> SummaryTable {
    let stats = &[Statistic::Count, Statistic::Mean];
    let groups = aggregate(
        records,
        |r| (r.member_casual, r.derived.as_ref().map(|d| d.weekday)),
        stats,
    );

    SummaryTable {
        name: "rides_by_weekday",
        columns: with_stat_columns(vec!["member_casual", "weekday"], stats),
        rows: groups
            .into_iter()
            .map(|g| SummaryRow {
                key: vec![
                    g.key.0.to_string(),
                    g.key.1.map(|w| w.to_string()).unwrap_or_default(),
                ],
                values: g.cells,
            })
            .collect(),
    }
}

/// Ride count by rider class and calendar month (1-12 ascending).
pub fn rides_by_month(records: &[TripRecord]) -> SummaryTable {
    let stats = &[Statistic::Count];
    let groups = aggregate(
        records,
        |r| (r.member_casual, r.derived.as_ref().map_or(0, |d| d.month)),
        stats,
    );

    SummaryTable {
        name: "rides_by_month",
        columns: with_stat_columns(vec!["member_casual", "month"], stats),
        rows: groups
            .into_iter()
            .map(|g| SummaryRow {
                key: vec![g.key.0.to_string(), g.key.1.to_string()],
                values: g.cells,
            })
            .collect(),
    }
}

/// Ride count by rider class and start hour of day (0-23 ascending).
pub fn rides_by_hour(records: &[TripRecord]) -> SummaryTable {
    let stats = &[Statistic::Count];
    let groups = aggregate(
        records,
        |r| (r.member_casual, r.started_at.hour()),
        stats,
    );

    SummaryTable {
        name: "rides_by_hour",
        columns: with_stat_columns(vec!["member_casual", "hour"], stats),
        rows: groups
            .into_iter()
            .map(|g| SummaryRow {
                key: vec![g.key.0.to_string(), g.key.1.to_string()],
                values: g.cells,
            })
            .collect(),
    }
}

/// Top `n` start stations by ride count per rider class, count
/// descending, ties broken by ascending station name.
pub fn top_stations(records: &[TripRecord], n: usize) -> SummaryTable {
    let stats = &[Statistic::Count];
    let groups = aggregate(
        records,
        |r| (r.member_casual, r.start_station_name.clone()),
        stats,
    );

    let mut rows = Vec::new();
    for class in [MemberCasual::Casual, MemberCasual::Member] {
        let mut partition: Vec<&Group<(MemberCasual, String)>> =
            groups.iter().filter(|g| g.key.0 == class).collect();

        partition.sort_by(|a, b| {
            b.count()
                .cmp(&a.count())
                .then_with(|| a.key.1.cmp(&b.key.1))
        });

        rows.extend(partition.into_iter().take(n).map(|g| SummaryRow {
            key: vec![g.key.0.to_string(), g.key.1.clone()],
            values: g.cells.clone(),
        }));
    }

    SummaryTable {
        name: "top_start_stations",
        columns: with_stat_columns(vec!["member_casual", "start_station_name"], stats),
        rows,
    }
}

/// All five canonical views, in reporting order.
pub fn all_views(records: &[TripRecord], top_n: usize) -> Vec<SummaryTable> {
    vec![
        ride_length_by_rider_class(records),
        rides_by_weekday(records),
        rides_by_month(records),
        rides_by_hour(records),
        top_stations(records, top_n),
    ]
}

fn with_stat_columns(mut columns: Vec<&'static str>, stats: &[Statistic]) -> Vec<&'static str> {
    columns.extend(stats.iter().map(Statistic::column_name));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive;
    use crate::record::MemberCasual;
    use crate::summary::table::Cell;
    use chrono::NaiveDate;

    fn trip(member_casual: MemberCasual, station: &str, day: u32, hour: u32) -> TripRecord {
        let started_at = NaiveDate::from_ymd_opt(2019, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        derive(&TripRecord {
            ride_id: "1".to_string(),
            rideable_type: "docked_bike".to_string(),
            started_at,
            ended_at: started_at + chrono::Duration::minutes(20),
            start_station_name: station.to_string(),
            start_station_id: "1".to_string(),
            end_station_name: String::new(),
            end_station_id: String::new(),
            member_casual,
            derived: None,
        })
    }

    #[test]
    fn test_ride_length_view_columns() {
        let records = vec![trip(MemberCasual::Member, "A", 1, 9)];
        let table = ride_length_by_rider_class(&records);

        assert_eq!(
            table.columns,
            vec!["member_casual", "count", "mean", "median", "min", "max"]
        );
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].key, vec!["member"]);
    }

    #[test]
    fn test_hour_view_orders_numerically() {
        let records = vec![
            trip(MemberCasual::Casual, "A", 1, 17),
            trip(MemberCasual::Casual, "A", 1, 8),
            trip(MemberCasual::Casual, "A", 1, 0),
        ];

        let table = rides_by_hour(&records);
        let hours: Vec<&str> = table.rows.iter().map(|r| r.key[1].as_str()).collect();
        assert_eq!(hours, vec!["0", "8", "17"]);
    }

    #[test]
    fn test_month_view_counts() {
        let records = vec![
            trip(MemberCasual::Casual, "A", 1, 9),
            trip(MemberCasual::Member, "A", 1, 9),
            trip(MemberCasual::Member, "A", 2, 9),
        ];

        let table = rides_by_month(&records);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, vec!["casual", "7"]);
        assert_eq!(table.rows[0].values, vec![Cell::Count(1)]);
        assert_eq!(table.rows[1].key, vec!["member", "7"]);
        assert_eq!(table.rows[1].values, vec![Cell::Count(2)]);
    }

    #[test]
    fn test_top_stations_truncates_and_breaks_ties_by_name() {
        let mut records = Vec::new();
        // 15 distinct casual stations: station_00 gets 16 rides,
        // station_01 gets 15, ... station_14 gets 2; plus two tied
        // stations to exercise the name tie-break.
        for i in 0..15 {
            for _ in 0..(16 - i) {
                records.push(trip(MemberCasual::Casual, &format!("station_{i:02}"), 1, 9));
            }
        }
        records.push(trip(MemberCasual::Casual, "zzz_tied", 1, 9));
        records.push(trip(MemberCasual::Casual, "aaa_tied", 1, 9));

        let table = top_stations(&records, 10);
        assert_eq!(table.rows.len(), 10);

        let counts: Vec<u64> = table
            .rows
            .iter()
            .map(|r| match r.values[0] {
                Cell::Count(n) => n,
                Cell::Number(_) => 0,
            })
            .collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);

        assert_eq!(table.rows[0].key[1], "station_00");
        assert_eq!(table.rows[9].key[1], "station_09");
    }

    #[test]
    fn test_top_stations_partitions_by_rider_class() {
        let records = vec![
            trip(MemberCasual::Casual, "A", 1, 9),
            trip(MemberCasual::Member, "B", 1, 9),
            trip(MemberCasual::Member, "B", 1, 9),
            trip(MemberCasual::Member, "A", 1, 9),
        ];

        let table = top_stations(&records, 10);
        assert_eq!(table.rows.len(), 3);
        // casual partition first, then member partition by count desc
        assert_eq!(table.rows[0].key, vec!["casual", "A"]);
        assert_eq!(table.rows[1].key, vec!["member", "B"]);
        assert_eq!(table.rows[2].key, vec!["member", "A"]);
    }

    #[test]
    fn test_tie_break_is_ascending_name() {
        let records = vec![
            trip(MemberCasual::Casual, "zzz", 1, 9),
            trip(MemberCasual::Casual, "aaa", 1, 9),
        ];

        let table = top_stations(&records, 10);
        assert_eq!(table.rows[0].key[1], "aaa");
        assert_eq!(table.rows[1].key[1], "zzz");
    }

    #[test]
    fn test_all_views_returns_five_tables() {
        let records = vec![trip(MemberCasual::Member, "A", 1, 9)];
        let tables = all_views(&records, DEFAULT_TOP_STATIONS);

        let names: Vec<&str> = tables.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "ride_length_by_rider_class",
                "rides_by_weekday",
                "rides_by_month",
                "rides_by_hour",
                "top_start_stations",
            ]
        );
    }
}
