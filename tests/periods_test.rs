// ABOUTME: Integration tests for calendar period arithmetic and activity grouping
// ABOUTME: Covers week boundaries, trailing periods, range filtering, ISO week keys, and labels
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{at, init_test_logging, simple_activity};
use stride_intelligence::PeriodCalculator;
use stride_tracker::models::{DateRange, Grouping, PeriodType};

#[test]
fn test_week_range_is_inclusive_monday_to_sunday() {
    init_test_logging();
    let range = PeriodCalculator::period_range(PeriodType::Week, at(2024, 3, 6, 12));
    assert_eq!(range.start, at(2024, 3, 4, 0));
    assert!(range.contains(at(2024, 3, 10, 23) + Duration::minutes(59)));
    assert!(!range.contains(at(2024, 3, 11, 0)));
}

#[test]
fn test_trailing_periods_are_oldest_first_and_contiguous() {
    let months = PeriodCalculator::trailing_periods(PeriodType::Month, at(2024, 3, 15, 0), 4);
    let starts: Vec<String> = months
        .iter()
        .map(|range| range.start.date_naive().to_string())
        .collect();
    assert_eq!(starts, ["2023-12-01", "2024-01-01", "2024-02-01", "2024-03-01"]);

    for pair in months.windows(2) {
        assert_eq!(pair[0].end + Duration::milliseconds(1), pair[1].start);
    }
}

#[test]
fn test_filter_by_range_keeps_boundary_activities() {
    let activities = vec![
        simple_activity("before", "Running", at(2024, 3, 3, 23), 600.0, 2000.0),
        simple_activity("start", "Running", at(2024, 3, 4, 0), 600.0, 2000.0),
        simple_activity("after", "Running", at(2024, 3, 11, 0), 600.0, 2000.0),
    ];
    let week = PeriodCalculator::week_range(at(2024, 3, 6, 0));
    let inside: Vec<&str> = PeriodCalculator::filter_by_range(&activities, week)
        .into_iter()
        .map(|activity| activity.id())
        .collect();
    assert_eq!(inside, ["start"]);
}

#[test]
fn test_group_keys_use_iso_week_year() {
    let activities = vec![
        simple_activity("a", "Running", at(2024, 12, 30, 7), 1800.0, 5000.0),
        simple_activity("b", "Running", at(2025, 1, 2, 7), 1800.0, 5000.0),
        simple_activity("c", "Running", at(2025, 1, 6, 7), 1800.0, 5000.0),
    ];
    let weeks = PeriodCalculator::group_by(Grouping::Week, &activities);
    assert_eq!(weeks["2025-W1"].len(), 2);
    assert_eq!(weeks["2025-W2"].len(), 1);

    let months = PeriodCalculator::group_by(Grouping::Month, &activities);
    assert_eq!(months.keys().collect::<Vec<_>>(), ["2024-12", "2025-01"]);
}

#[test]
fn test_period_labels() {
    let date = at(2024, 5, 15, 0);
    let month = PeriodCalculator::month_range(date);
    assert_eq!(PeriodCalculator::period_label(PeriodType::Month, month), "2024-05");
    assert_eq!(
        PeriodCalculator::period_label(PeriodType::Year, PeriodCalculator::year_range(date)),
        "2024"
    );

    let custom = DateRange::new(at(2024, 5, 1, 0), at(2024, 5, 20, 0));
    assert_eq!(
        PeriodCalculator::period_label(PeriodType::Custom, custom),
        "2024-05-01 to 2024-05-20"
    );
}
