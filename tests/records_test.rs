// ABOUTME: Integration tests for personal record detection and current-record queries
// ABOUTME: Covers monotonic detection, inverted time comparison, elevation and calorie passes, and history queries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{altitude_run, at, init_test_logging, simple_activity};
use stride_intelligence::records::{current_records, history_for_triple};
use stride_intelligence::{detect_records, latest_by_triple, RecordDetector};
use stride_tracker::models::{
    ActivityBuilder, PersonalRecord, RecordCategory, RecordTriple, RecordType,
};

fn find(
    records: &[PersonalRecord],
    record_type: RecordType,
    category: RecordCategory,
) -> Option<&PersonalRecord> {
    records
        .iter()
        .find(|r| r.record_type == record_type && r.category == category)
}

#[test]
fn test_longer_run_beats_distance_record() {
    init_test_logging();
    let first = simple_activity("r1", "Running", at(2024, 4, 1, 7), 1500.0, 5000.0);
    let existing = detect_records(&first, &[], at(2024, 4, 1, 9));
    let distance = find(&existing, RecordType::Distance, RecordCategory::Longest).unwrap();
    assert!((distance.value - 5000.0).abs() < f64::EPSILON);

    let longer = simple_activity("r2", "Running", at(2024, 4, 3, 7), 2600.0, 8000.0);
    let new_records = detect_records(&longer, &existing, at(2024, 4, 3, 9));

    assert_eq!(new_records.len(), 1);
    let record = &new_records[0];
    assert_eq!(record.record_type, RecordType::Distance);
    assert_eq!(record.category, RecordCategory::Longest);
    assert!((record.value - 8000.0).abs() < f64::EPSILON);
    assert_eq!(record.improvement, Some(3000.0));
    assert_eq!(record.previous_value, Some(5000.0));
    assert_eq!(record.previous_activity_id.as_deref(), Some("r1"));
    assert_eq!(record.unit, "m");
}

#[test]
fn test_detection_is_monotonic() {
    let activity = simple_activity("r1", "Running", at(2024, 4, 1, 7), 3000.0, 10000.0);
    let first = detect_records(&activity, &[], at(2024, 4, 1, 9));
    assert!(!first.is_empty());

    let second = detect_records(&activity, &first, at(2024, 4, 1, 10));
    assert!(second.is_empty());
}

#[test]
fn test_time_records_are_lower_is_better() {
    let prior = simple_activity("slow", "Running", at(2024, 4, 1, 7), 1200.0, 5000.0);
    let existing = detect_records(&prior, &[], at(2024, 4, 1, 9));

    let faster = simple_activity("fast", "Running", at(2024, 4, 8, 7), 1100.0, 4900.0);
    let detections = RecordDetector::detect(&faster, &existing);
    let time = detections
        .iter()
        .find(|d| d.record_type == RecordType::Time && d.category == RecordCategory::FiveKm)
        .unwrap();
    assert!((time.improvement - 100.0).abs() < f64::EPSILON);

    let slower = simple_activity("slower", "Running", at(2024, 4, 9, 7), 1300.0, 4900.0);
    assert!(RecordDetector::detect(&slower, &existing)
        .iter()
        .all(|d| d.record_type != RecordType::Time));
}

#[test]
fn test_ten_km_speed_record() {
    let activity = simple_activity("tk", "Running", at(2024, 4, 1, 7), 2500.0, 10000.0);
    let records = detect_records(&activity, &[], at(2024, 4, 1, 9));
    let speed = find(&records, RecordType::Speed, RecordCategory::TenKm).unwrap();
    assert!((speed.value - 4.0).abs() < f64::EPSILON);
    assert_eq!(speed.unit, "m/s");
}

#[test]
fn test_equal_value_is_not_a_record() {
    let first = simple_activity("a", "Running", at(2024, 4, 1, 7), 1500.0, 6000.0);
    let existing = detect_records(&first, &[], at(2024, 4, 1, 9));
    let same = simple_activity("b", "Running", at(2024, 4, 2, 7), 1500.0, 6000.0);
    assert!(detect_records(&same, &existing, at(2024, 4, 2, 9)).is_empty());
}

#[test]
fn test_current_records_follow_latest_activity_date() {
    let detected_at = at(2024, 5, 1, 0);
    let mut history = detect_records(
        &simple_activity("a", "Running", at(2024, 4, 1, 7), 1500.0, 5000.0),
        &[],
        detected_at,
    );
    let next = detect_records(
        &simple_activity("b", "Running", at(2024, 4, 10, 7), 2400.0, 7000.0),
        &history,
        detected_at + Duration::minutes(1),
    );
    history.extend(next);
    history.extend(detect_records(
        &simple_activity("c", "Cycling", at(2024, 4, 11, 7), 3600.0, 30000.0),
        &history,
        detected_at + Duration::minutes(2),
    ));

    let triple = RecordTriple::new(RecordType::Distance, RecordCategory::Longest, "Running");
    assert_eq!(latest_by_triple(&history)[&triple].activity_id, "b");

    let running = current_records(&history, Some("Running"));
    assert!(running.iter().all(|r| r.sport == "Running"));
    assert!(running
        .iter()
        .any(|r| r.activity_id == "b" && r.record_type == RecordType::Distance));

    let timeline = history_for_triple(&history, &triple);
    let ids: Vec<&str> = timeline.iter().map(|r| r.activity_id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn test_elevation_record_uses_derived_gain() {
    // gain 10 + 25 = 35
    let hilly = altitude_run("hill", at(2024, 6, 1, 7), &[100.0, 110.0, 105.0, 130.0]);
    let existing = detect_records(&hilly, &[], at(2024, 6, 1, 9));
    let elevation = find(&existing, RecordType::Elevation, RecordCategory::Highest).unwrap();
    assert!((elevation.value - 35.0).abs() < f64::EPSILON);
    assert_eq!(elevation.unit, "m");

    let gentler = altitude_run("gentle", at(2024, 6, 2, 7), &[100.0, 120.0, 115.0]);
    let none = detect_records(&gentler, &existing, at(2024, 6, 2, 9));
    assert!(find(&none, RecordType::Elevation, RecordCategory::Highest).is_none());

    let steeper = altitude_run("steep", at(2024, 6, 3, 7), &[100.0, 150.0]);
    let beaten = detect_records(&steeper, &existing, at(2024, 6, 3, 9));
    let record = find(&beaten, RecordType::Elevation, RecordCategory::Highest).unwrap();
    assert_eq!(record.improvement, Some(15.0));
    assert_eq!(record.previous_activity_id.as_deref(), Some("hill"));
}

#[test]
fn test_no_elevation_gain_skips_elevation_pass() {
    let flat = altitude_run("flat", at(2024, 6, 4, 7), &[100.0, 100.0, 95.0]);
    let records = detect_records(&flat, &[], at(2024, 6, 4, 9));
    assert!(records.iter().all(|r| r.record_type != RecordType::Elevation));

    let bare = simple_activity("bare", "Running", at(2024, 6, 4, 12), 1800.0, 5000.0);
    assert!(detect_records(&bare, &[], at(2024, 6, 4, 13))
        .iter()
        .all(|r| r.record_type != RecordType::Elevation));
}

#[test]
fn test_calories_record_shares_longest_bucket() {
    let start = at(2024, 6, 5, 7);
    let first = ActivityBuilder::new("c1", "Running", start, 1800.0, 5000.0)
        .calories(400.0)
        .build();
    let existing = detect_records(&first, &[], at(2024, 6, 5, 9));
    let calories = find(&existing, RecordType::Calories, RecordCategory::Longest).unwrap();
    assert!((calories.value - 400.0).abs() < f64::EPSILON);
    assert_eq!(calories.unit, "kcal");
    assert_eq!(calories.id, "c1-calories-longest");

    // same distance bucket, separate triple from the distance record
    let bigger = ActivityBuilder::new("c2", "Running", at(2024, 6, 6, 7), 1800.0, 5000.0)
        .calories(520.0)
        .build();
    let new_records = detect_records(&bigger, &existing, at(2024, 6, 6, 9));
    assert_eq!(new_records.len(), 1);
    assert_eq!(new_records[0].record_type, RecordType::Calories);
    assert_eq!(new_records[0].improvement, Some(120.0));
}

#[test]
fn test_missing_calories_skips_calorie_pass() {
    let activity = simple_activity("nc", "Running", at(2024, 6, 7, 7), 1800.0, 5000.0);
    let records = detect_records(&activity, &[], at(2024, 6, 7, 9));
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.record_type != RecordType::Calories));
}
