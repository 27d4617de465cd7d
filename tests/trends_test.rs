// ABOUTME: Integration tests for period comparisons and evolution series
// ABOUTME: Covers the zero-baseline convention, heart rate changes, and trend direction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{at, heart_rate_run, init_test_logging, simple_activity};
use stride_intelligence::TrendAggregator;
use stride_tracker::models::{EvolutionMetricKind, PeriodType, TrendDirection};

#[test]
fn test_growth_from_empty_previous_period_is_one_hundred_percent() {
    init_test_logging();
    let activities = vec![
        simple_activity("a", "Running", at(2024, 3, 5, 7), 1800.0, 6000.0),
        simple_activity("b", "Running", at(2024, 3, 7, 7), 2400.0, 8000.0),
    ];
    let comparison = TrendAggregator::compare(&activities, PeriodType::Week, at(2024, 3, 6, 12));

    assert_eq!(comparison.current.activity_count, 2);
    assert_eq!(comparison.previous.activity_count, 0);
    assert!((comparison.changes.distance - 100.0).abs() < f64::EPSILON);
    assert!((comparison.changes.activities - 100.0).abs() < f64::EPSILON);
    assert!(comparison.changes.average_heart_rate.is_none());
    assert_eq!(comparison.previous_range.start, at(2024, 2, 26, 0));
}

#[test]
fn test_month_over_month_decline() {
    let activities = vec![
        simple_activity("feb", "Cycling", at(2024, 2, 10, 7), 3600.0, 40000.0),
        simple_activity("mar", "Cycling", at(2024, 3, 10, 7), 3600.0, 30000.0),
    ];
    let comparison = TrendAggregator::compare(&activities, PeriodType::Month, at(2024, 3, 15, 0));
    assert!((comparison.changes.distance + 25.0).abs() < 1e-9);
    assert!(comparison.changes.time.abs() < f64::EPSILON);
}

#[test]
fn test_heart_rate_change_requires_both_periods() {
    let activities = vec![
        heart_rate_run("w9", at(2024, 2, 28, 7), &[140, 140, 140]),
        heart_rate_run("w10", at(2024, 3, 6, 7), &[154, 154, 154]),
    ];
    let comparison = TrendAggregator::compare(&activities, PeriodType::Week, at(2024, 3, 6, 12));
    assert!((comparison.changes.average_heart_rate.unwrap() - 10.0).abs() < 1e-9);
}

#[test]
fn test_weekly_distance_evolution_trends_up() {
    let activities: Vec<_> = (0..4)
        .map(|week| {
            let distance = 5000.0 + f64::from(week) * 2000.0;
            simple_activity(
                &format!("w{week}"),
                "Running",
                at(2024, 3, 4 + week * 7, 7),
                1800.0,
                distance,
            )
        })
        .collect();

    let series = TrendAggregator::default().evolution(
        &activities,
        EvolutionMetricKind::Distance,
        PeriodType::Week,
        at(2024, 3, 27, 0),
        4,
    );

    let values: Vec<f64> = series.points.iter().map(|p| p.value.unwrap()).collect();
    assert_eq!(values, [5.0, 7.0, 9.0, 11.0]);
    assert_eq!(series.trend, TrendDirection::Up);
    // first half mean 6, second half mean 10
    assert!((series.change_percent - 200.0 / 3.0).abs() < 1e-9);
    assert!((series.average - 8.0).abs() < f64::EPSILON);
    assert_eq!(series.points[0].label, "2024-W10");
}
