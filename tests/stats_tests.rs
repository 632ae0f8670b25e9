//! Integration tests for the statistics aggregate
//!
//! Covers the properties every report relies on:
//! - ingestion order does not change any total
//! - every level sums up to its parent
//! - rows come out in calendar order with totals after details
//! - rendering twice gives the same rows

use chrono::{Duration, FixedOffset, TimeZone};
use flightstat::{Flight, FlightStat, ReportRow, RowKind, StatOptions};

fn flight(y: i32, m: u32, d: u32, minutes: i64, glider: &str) -> Flight {
    let utc = FixedOffset::east_opt(0).unwrap();
    Flight::at(
        utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap(),
        Duration::minutes(minutes),
    )
    .with_glider(glider)
}

fn season() -> Vec<Flight> {
    vec![
        flight(2017, 3, 9, 42, "Alpha 6"),
        flight(2016, 10, 1, 11, ""),
        flight(2016, 12, 7, 16, "Mentor 4"),
        flight(2018, 1, 2, 5, ""),
        flight(2016, 10, 5, 12, "Alpha 6"),
        flight(2017, 3, 9, 8, "Mentor 4"),
        flight(2016, 11, 6, 14, ""),
        flight(2017, 7, 30, 95, "Alpha 6"),
        flight(2016, 11, 2, 13, "Alpha 6"),
        flight(2016, 12, 3, 15, ""),
    ]
}

fn permutations(flights: &[Flight]) -> Vec<Vec<Flight>> {
    let mut result = Vec::new();
    for shift in 0..flights.len() {
        let mut rotated = flights.to_vec();
        rotated.rotate_left(shift);
        result.push(rotated.clone());
        rotated.reverse();
        result.push(rotated);
    }
    result
}

#[test]
fn test_ingestion_order_does_not_matter() {
    let flights = season();
    let reference = FlightStat::build(&flights, StatOptions::default());

    for permutation in permutations(&flights) {
        let stat = FlightStat::build(&permutation, StatOptions::default());
        assert_eq!(stat.flights(), reference.flights());
        assert_eq!(stat.airtime(), reference.airtime());

        let rows: Vec<(String, usize, f64)> = stat
            .render()
            .iter()
            .map(|r| (r.label.clone(), r.flights, r.minutes))
            .collect();
        let expected: Vec<(String, usize, f64)> = reference
            .render()
            .iter()
            .map(|r| (r.label.clone(), r.flights, r.minutes))
            .collect();
        assert_eq!(rows, expected);
    }
}

#[test]
fn test_sum_invariant_at_every_level() {
    let stat = FlightStat::build(&season(), StatOptions::default());

    let mut year_flights = 0;
    let mut year_airtime = Duration::zero();
    for year in stat.years() {
        let mut month_flights = 0;
        let mut month_airtime = Duration::zero();
        for month in year.months() {
            let day_flights: usize = month.days().map(|d| d.flights).sum();
            let day_airtime = month.days().fold(Duration::zero(), |acc, d| acc + d.airtime);
            assert_eq!(day_flights, month.flights);
            assert_eq!(day_airtime, month.airtime);

            month_flights += month.flights;
            month_airtime = month_airtime + month.airtime;
        }
        assert_eq!(month_flights, year.flights);
        assert_eq!(month_airtime, year.airtime);

        year_flights += year.flights;
        year_airtime = year_airtime + year.airtime;
    }
    assert_eq!(year_flights, stat.flights());
    assert_eq!(year_airtime, stat.airtime());

    let glider_flights: usize = stat.gliders().map(|g| g.flights).sum();
    let glider_airtime = stat
        .gliders()
        .fold(Duration::zero(), |acc, g| acc + g.airtime);
    assert_eq!(glider_flights, stat.flights());
    assert_eq!(glider_airtime, stat.airtime());
}

#[test]
fn test_render_order() {
    let stat = FlightStat::build(&season(), StatOptions::with_default_glider("Default"));
    let rows = stat.render();
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();

    assert_eq!(
        labels,
        vec![
            "01.10.2016",
            "05.10.2016",
            "Total October 2016",
            "02.11.2016",
            "06.11.2016",
            "Total November 2016",
            "03.12.2016",
            "07.12.2016",
            "Total December 2016",
            "Total 2016",
            "09.03.2017",
            "Total March 2017",
            "30.07.2017",
            "Total July 2017",
            "Total 2017",
            "02.01.2018",
            "Total January 2018",
            "Total 2018",
            "Total",
            "Glider",
            "Alpha 6",
            "Default",
            "Mentor 4",
        ]
    );

    // two flights on the same day collapse into one day row
    let march = rows
        .iter()
        .find(|r| r.kind == RowKind::Day(chrono::NaiveDate::from_ymd_opt(2017, 3, 9).unwrap()))
        .unwrap();
    assert_eq!(march.flights, 2);
    assert_eq!(march.minutes, 50.0);
}

#[test]
fn test_totals_follow_their_details() {
    let stat = FlightStat::build(&season(), StatOptions::default());
    let rows = stat.render();

    let totals: Vec<&ReportRow> = rows.iter().filter(|r| r.kind == RowKind::Total).collect();
    assert_eq!(totals.len(), 1);

    let mut pending_days = 0;
    let mut pending_months = 0;
    for row in &rows {
        match row.kind {
            RowKind::Day(_) => pending_days += row.flights,
            RowKind::MonthTotal { .. } => {
                assert_eq!(pending_days, row.flights);
                pending_days = 0;
                pending_months += row.flights;
            }
            RowKind::YearTotal(_) => {
                assert_eq!(pending_days, 0);
                assert_eq!(pending_months, row.flights);
                pending_months = 0;
            }
            _ => {}
        }
    }
}

#[test]
fn test_glider_rows_sorted_by_name() {
    let flights = vec![
        flight(2016, 10, 1, 10, "Zeno"),
        flight(2016, 10, 1, 10, "Alpha 6"),
        flight(2016, 10, 1, 10, "mentor"),
        flight(2016, 10, 1, 10, "Buzz Z5"),
    ];
    let stat = FlightStat::build(&flights, StatOptions::default());
    let names: Vec<String> = stat
        .render()
        .into_iter()
        .filter(|r| r.kind == RowKind::Glider)
        .map(|r| r.label)
        .collect();
    assert_eq!(names, vec!["Alpha 6", "Buzz Z5", "Zeno", "mentor"]);
}

#[test]
fn test_render_is_idempotent() {
    let stat = FlightStat::build(&season(), StatOptions::default());
    assert_eq!(stat.render(), stat.render());
}

#[test]
fn test_sharded_merge_equals_full_build() {
    let flights = season();
    let mut merged = FlightStat::new(StatOptions::default());
    for shard in flights.chunks(3) {
        merged.merge(FlightStat::build(shard, StatOptions::default()));
    }
    let full = FlightStat::build(&flights, StatOptions::default());

    assert_eq!(merged.flights(), full.flights());
    assert_eq!(merged.airtime(), full.airtime());
    let merged_rows: Vec<(String, usize)> =
        merged.render().into_iter().map(|r| (r.label, r.flights)).collect();
    let full_rows: Vec<(String, usize)> =
        full.render().into_iter().map(|r| (r.label, r.flights)).collect();
    assert_eq!(merged_rows, full_rows);
}
