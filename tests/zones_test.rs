// ABOUTME: Integration tests for heart rate zone boundaries and time-in-zone classification
// ABOUTME: Covers zone boundaries, lap-bounded intervals, zone gaps, the training-type decision list, and efficiency
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    altitude_run, at, heart_rate_run, init_test_logging, multi_lap_run, repeat, simple_activity,
};
use stride_intelligence::zones::zone_for_heart_rate;
use stride_intelligence::{calculate_zones, ZoneClassifier};
use stride_tracker::models::{TrainingType, ZoneMethod, ZonePercentages, ZoneSettings};

#[test]
fn test_age_thirty_zone_three_boundaries() {
    init_test_logging();
    let settings = ZoneSettings::from_age(30).unwrap();
    assert_eq!(settings.max_heart_rate, 190);

    let zones = calculate_zones(&settings).unwrap();
    let zone3 = &zones[2];
    assert_eq!(zone3.zone, 3);
    assert_eq!((zone3.min_heart_rate, zone3.max_heart_rate), (133, 152));
    assert_eq!(zones[4].max_heart_rate, 190);
}

#[test]
fn test_karvonen_uses_heart_rate_reserve() {
    let settings = ZoneSettings::karvonen(190, 60).unwrap();
    assert_eq!(settings.method, ZoneMethod::Karvonen);

    let zones = calculate_zones(&settings).unwrap();
    // 60 + 130 * 0.5 = 125, 60 + 130 * 0.6 = 138
    assert_eq!((zones[0].min_heart_rate, zones[0].max_heart_rate), (125, 138));
    assert_eq!(zones[4].max_heart_rate, 190);
}

#[test]
fn test_invalid_settings_are_rejected() {
    assert!(ZoneSettings::from_age(0).is_err());
    assert!(ZoneSettings::from_age(121).is_err());
    assert!(ZoneSettings::karvonen(180, 180).is_err());
    assert!(ZoneSettings::manual(190, Vec::new()).is_err());
}

#[test]
fn test_out_of_range_heart_rates_clamp() {
    let zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
    assert_eq!(zone_for_heart_rate(&zones, 60), Some(1));
    assert_eq!(zone_for_heart_rate(&zones, 210), Some(5));
    assert_eq!(zone_for_heart_rate(&zones, 140), Some(3));
}

#[test]
fn test_endurance_session_classification() {
    // seven minutes at 120 (Z2), three at 140 (Z3); the last sample closes the interval
    let mut heart_rates = repeat(120, 7);
    heart_rates.extend(repeat(140, 4));
    let activity = heart_rate_run("endurance", at(2024, 5, 1, 7), &heart_rates);

    let analysis = ZoneClassifier::analyze(&ZoneSettings::from_age(30).unwrap(), &activity).unwrap();

    assert_eq!(analysis.percentages.zone2, 70);
    assert_eq!(analysis.percentages.zone3, 30);
    assert_eq!(analysis.dominant_zone, Some(2));
    assert_eq!(analysis.training_type, TrainingType::Endurance);
    // ideal {Z2:70, Z3:20, Z1:10}: deviations 0, 10, 10
    assert_eq!(analysis.efficiency, 93);
    assert_eq!(analysis.breakdown.len(), 5);
    assert!((analysis.breakdown[1].minutes - 7.0).abs() < f64::EPSILON);
    assert!(!analysis.recommendations.is_empty());
}

#[test]
fn test_activity_without_heart_rate_is_unknown() {
    let activity = altitude_run("no-hr", at(2024, 5, 2, 7), &[100.0, 104.0, 108.0, 103.0, 101.0]);
    let analysis = ZoneClassifier::analyze(&ZoneSettings::default(), &activity).unwrap();

    assert!((analysis.distribution.unknown - 240.0).abs() < f64::EPSILON);
    assert_eq!(analysis.percentages.unknown, 100);
    assert_eq!(analysis.training_type, TrainingType::Unknown);
    assert_eq!(analysis.efficiency, 50);
    assert!(analysis.dominant_zone.is_none());
}

#[test]
fn test_activity_without_intervals_falls_through_to_mixed() {
    // no laps at all: every bucket is zero, and unknown 0 < 50 matches the mixed rule
    let activity = simple_activity("bare", "Running", at(2024, 5, 2, 9), 1800.0, 5000.0);
    let analysis = ZoneClassifier::analyze(&ZoneSettings::default(), &activity).unwrap();

    assert_eq!(analysis.percentages, ZonePercentages::default());
    assert_eq!(analysis.training_type, TrainingType::Mixed);
    assert!(analysis.dominant_zone.is_none());
    // ideal 20% per zone, all five off by 20
    assert_eq!(analysis.efficiency, 80);
    assert_eq!(
        ZoneClassifier::training_type(&ZonePercentages::default()),
        TrainingType::Mixed
    );
}

#[test]
fn test_intervals_never_bridge_laps() {
    // the 60 s gap between the laps' last and first samples belongs to neither lap
    let activity = multi_lap_run("laps", at(2024, 5, 5, 7), &[&[120, 120, 120], &[185, 185, 185]]);
    let zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
    let distribution = ZoneClassifier::distribution(&zones, &activity);

    assert!((distribution.zone2 - 120.0).abs() < f64::EPSILON);
    assert!((distribution.zone5 - 120.0).abs() < f64::EPSILON);
    assert!((distribution.total() - 240.0).abs() < f64::EPSILON);
}

#[test]
fn test_manual_zone_gap_counts_as_unknown() {
    let mut zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
    // Z2 ends at 133, Z3 now starts at 140: 135 falls between them
    zones[2].min_heart_rate = 140;
    let settings = ZoneSettings::manual(190, zones).unwrap();
    let activity = heart_rate_run("gap", at(2024, 5, 6, 7), &[120, 120, 135, 135, 135]);

    let analysis = ZoneClassifier::analyze(&settings, &activity).unwrap();

    assert!((analysis.distribution.zone2 - 120.0).abs() < f64::EPSILON);
    assert!(analysis.distribution.zone3.abs() < f64::EPSILON);
    assert!((analysis.distribution.unknown - 120.0).abs() < f64::EPSILON);
    assert_eq!(analysis.percentages.zone2, 50);
    assert_eq!(analysis.percentages.unknown, 50);
    // unknown is not below 50, so nothing in the list matches
    assert_eq!(analysis.training_type, TrainingType::Unknown);
}

#[test]
fn test_percentages_sum_to_about_one_hundred() {
    let heart_rates = [100, 120, 140, 160, 180, 100, 120, 140, 160, 180, 175];
    let activity = heart_rate_run("spread", at(2024, 5, 3, 7), &heart_rates);
    let zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
    let distribution = ZoneClassifier::distribution(&zones, &activity);
    let sum = ZoneClassifier::percentages(&distribution).sum();
    assert!((99..=101).contains(&sum), "sum was {sum}");
}

#[test]
fn test_recovery_rule_wins_over_endurance() {
    let percentages = ZonePercentages {
        zone1: 46,
        zone2: 45,
        zone3: 30,
        zone4: 0,
        zone5: 0,
        unknown: 0,
    };
    assert_eq!(
        ZoneClassifier::training_type(&percentages),
        TrainingType::Recovery
    );
}

#[test]
fn test_dominant_zone_tie_goes_to_lowest_zone() {
    let mut heart_rates = repeat(160, 3);
    heart_rates.extend(repeat(120, 3));
    heart_rates.push(120);
    let activity = heart_rate_run("tie", at(2024, 5, 4, 7), &heart_rates);
    let zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
    let distribution = ZoneClassifier::distribution(&zones, &activity);
    assert_eq!(ZoneClassifier::dominant_zone(&distribution), Some(2));
}
