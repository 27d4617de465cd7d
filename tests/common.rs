// ABOUTME: Shared test utilities and fixture builders for integration tests
// ABOUTME: Provides quiet logging setup, timestamps, and activity fixtures with and without trackpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_wrap,
    clippy::unwrap_used
)]
//! Shared test utilities for `stride_tracker`

use std::sync::Once;

use chrono::{DateTime, Duration, TimeZone, Utc};
use stride_tracker::models::{Activity, ActivityBuilder, Lap, Trackpoint};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; default WARN keeps output quiet
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// UTC timestamp at the top of an hour
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// Activity without laps or trackpoints
pub fn simple_activity(
    id: &str,
    sport: &str,
    start: DateTime<Utc>,
    seconds: f64,
    meters: f64,
) -> Activity {
    ActivityBuilder::new(id, sport, start, seconds, meters).build()
}

/// Running activity with one lap of heart-rate-only trackpoints, one sample per minute
pub fn heart_rate_run(id: &str, start: DateTime<Utc>, heart_rates: &[u32]) -> Activity {
    let trackpoints: Vec<Trackpoint> = heart_rates
        .iter()
        .enumerate()
        .map(|(minute, &hr)| {
            Trackpoint::at(start + Duration::minutes(minute as i64)).with_heart_rate(hr)
        })
        .collect();
    let seconds = (heart_rates.len().saturating_sub(1) * 60) as f64;
    let lap = Lap::new(start, seconds, 5000.0).with_trackpoints(trackpoints);
    ActivityBuilder::new(id, "Running", start, seconds, 5000.0)
        .lap(lap)
        .build()
}

/// Running activity with one lap per heart-rate slice, one sample per minute, laps back to back
pub fn multi_lap_run(id: &str, start: DateTime<Utc>, laps: &[&[u32]]) -> Activity {
    let mut lap_start = start;
    let mut built = Vec::with_capacity(laps.len());
    for heart_rates in laps {
        let trackpoints: Vec<Trackpoint> = heart_rates
            .iter()
            .enumerate()
            .map(|(minute, &hr)| {
                Trackpoint::at(lap_start + Duration::minutes(minute as i64)).with_heart_rate(hr)
            })
            .collect();
        let seconds = (heart_rates.len() * 60) as f64;
        built.push(Lap::new(lap_start, seconds, 1000.0).with_trackpoints(trackpoints));
        lap_start += Duration::seconds(seconds as i64);
    }
    let total = (lap_start - start).num_seconds() as f64;
    let distance = 1000.0 * laps.len() as f64;
    ActivityBuilder::new(id, "Running", start, total, distance)
        .laps(built)
        .build()
}

/// Running activity with one lap of altitude-only trackpoints, one sample per minute
pub fn altitude_run(id: &str, start: DateTime<Utc>, altitudes: &[f64]) -> Activity {
    let trackpoints: Vec<Trackpoint> = altitudes
        .iter()
        .enumerate()
        .map(|(minute, &meters)| {
            Trackpoint::at(start + Duration::minutes(minute as i64)).with_altitude(meters)
        })
        .collect();
    let seconds = (altitudes.len().saturating_sub(1) * 60) as f64;
    let lap = Lap::new(start, seconds, 5000.0).with_trackpoints(trackpoints);
    ActivityBuilder::new(id, "Running", start, seconds, 5000.0)
        .lap(lap)
        .build()
}

/// `count` copies of `value`
pub fn repeat(value: u32, count: usize) -> Vec<u32> {
    vec![value; count]
}
