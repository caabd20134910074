use serde_json::{Value, json};
use trip_harmonizer::pipeline::{ErrorPolicy, SourceBatch, harmonize};
use trip_harmonizer::record::MemberCasual;
use trip_harmonizer::schema::{RawRow, SchemaId};
use trip_harmonizer::summary::table::Cell;
use trip_harmonizer::summary::views::{DEFAULT_TOP_STATIONS, all_views};
use trip_harmonizer::validate::{PLACEHOLDER_STATION, default_rules};

fn row(pairs: &[(&str, Value)]) -> RawRow {
    pairs
        .iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect()
}

fn legacy_row(trip_id: u64, usertype: &str, start: &str, end: &str, station: &str) -> RawRow {
    row(&[
        ("trip_id", json!(trip_id)),
        ("start_time", json!(start)),
        ("end_time", json!(end)),
        ("bikeid", json!(2167)),
        ("tripduration", json!(390.0)),
        ("from_station_id", json!(199)),
        ("from_station_name", json!(station)),
        ("to_station_id", json!(84)),
        ("to_station_name", json!("Milwaukee Ave & Grand Ave")),
        ("usertype", json!(usertype)),
        ("gender", json!("Female")),
        ("birthyear", json!(1992)),
    ])
}

fn current_row(ride_id: &str, member_casual: &str, start: &str, end: &str, station: &str) -> RawRow {
    row(&[
        ("ride_id", json!(ride_id)),
        ("rideable_type", json!("electric_bike")),
        ("started_at", json!(start)),
        ("ended_at", json!(end)),
        ("start_station_name", json!(station)),
        ("start_station_id", json!("KA1504000135")),
        ("end_station_name", json!("Wells St & Concord Ln")),
        ("end_station_id", json!("TA1308000050")),
        ("member_casual", json!(member_casual)),
    ])
}

fn sample_batches() -> Vec<SourceBatch> {
    let legacy = vec![
        // 2019-01-01 is a Tuesday; 12.5 minute ride
        legacy_row(1, "Subscriber", "2019-01-01 10:00:00", "2019-01-01 10:12:30", "Clark St & Elm St"),
        legacy_row(2, "Customer", "2019-01-02 18:00:00", "2019-01-02 18:45:00", "Clark St & Elm St"),
        // end before start: derived, then excluded by validation
        legacy_row(3, "Subscriber", "2019-01-03 09:30:00", "2019-01-03 09:00:00", "Clark St & Elm St"),
        // placeholder test station: excluded by validation
        legacy_row(4, "Customer", "2019-01-04 12:00:00", "2019-01-04 12:20:00", PLACEHOLDER_STATION),
    ];

    let current = vec![
        current_row("C1", "member", "2020-02-03 08:00:00", "2020-02-03 08:10:00", "Clark St & Elm St"),
        current_row("C2", "casual", "2020-02-08 14:00:00", "2020-02-08 15:00:00", "Theater on the Lake"),
        current_row("C3", "member", "2020-03-01 08:00:00", "2020-03-01 08:05:00", "Theater on the Lake"),
    ];

    vec![
        SourceBatch { schema: SchemaId::Legacy, rows: legacy },
        SourceBatch { schema: SchemaId::Current, rows: current },
    ]
}

#[test]
fn test_full_pipeline_cleaned_set_invariants() {
    let cleaned = harmonize(sample_batches(), &default_rules(), ErrorPolicy::Strict).unwrap();

    // 7 input rows, 2 removed by validation
    assert_eq!(cleaned.len(), 5);

    for record in &cleaned {
        let derived = record.derived.as_ref().expect("cleaned records are derived");
        assert!(derived.ride_length_minutes >= 0.0);
        assert_ne!(record.start_station_name, PLACEHOLDER_STATION);
    }
}

#[test]
fn test_full_pipeline_recodes_legacy_rider_classes() {
    let cleaned = harmonize(sample_batches(), &default_rules(), ErrorPolicy::Strict).unwrap();

    let first = cleaned.iter().find(|r| r.ride_id == "1").unwrap();
    assert_eq!(first.member_casual, MemberCasual::Member);
    assert_eq!(first.rideable_type, "docked_bike");
    assert_eq!(first.derived.as_ref().unwrap().ride_length_minutes, 12.5);
    assert_eq!(first.derived.as_ref().unwrap().weekday.as_str(), "Tuesday");

    let second = cleaned.iter().find(|r| r.ride_id == "2").unwrap();
    assert_eq!(second.member_casual, MemberCasual::Casual);
}

#[test]
fn test_full_pipeline_summary_views() {
    let cleaned = harmonize(sample_batches(), &default_rules(), ErrorPolicy::Strict).unwrap();
    let tables = all_views(&cleaned, DEFAULT_TOP_STATIONS);
    assert_eq!(tables.len(), 5);

    // view (a): per-class counts sum to the cleaned set size
    let by_class = &tables[0];
    let total: u64 = by_class
        .rows
        .iter()
        .map(|row| match row.values[0] {
            Cell::Count(n) => n,
            Cell::Number(_) => 0,
        })
        .sum();
    assert_eq!(total, cleaned.len() as u64);

    // rider classes appear casual-first
    let classes: Vec<&str> = by_class.rows.iter().map(|r| r.key[0].as_str()).collect();
    assert_eq!(classes, vec!["casual", "member"]);

    // view (c): months ascend within each class partition
    let by_month = &tables[2];
    assert_eq!(by_month.columns, vec!["member_casual", "month", "count"]);
    let member_months: Vec<&str> = by_month
        .rows
        .iter()
        .filter(|r| r.key[0] == "member")
        .map(|r| r.key[1].as_str())
        .collect();
    assert_eq!(member_months, vec!["1", "2", "3"]);

    // view (e): station counts are partitioned by class and capped
    let stations = &tables[4];
    assert_eq!(stations.name, "top_start_stations");
    assert!(stations.rows.len() <= 2 * DEFAULT_TOP_STATIONS);
}

#[test]
fn test_skip_and_log_still_produces_summaries() {
    let mut batches = sample_batches();
    batches[0].rows.push(row(&[("trip_id", json!(99))])); // malformed

    let cleaned = harmonize(batches, &default_rules(), ErrorPolicy::SkipAndLog).unwrap();
    assert_eq!(cleaned.len(), 5);
}
