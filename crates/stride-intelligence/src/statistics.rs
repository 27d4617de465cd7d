// ABOUTME: Statistics engine deriving speed, pace, heart rate, cadence, and elevation from trackpoints
// ABOUTME: Optional samples are filtered before averaging; absent data is omitted, never zero-filled
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! Per-activity statistics engine.
//!
//! The engine works on the flattened trackpoints of an activity. Heart rate,
//! cadence, altitude, and speed are each filtered to the samples that carry
//! the field before any aggregate is taken.
//!
//! Elevation gain and loss are accumulated between consecutive *present*
//! altitude samples. When altitude is sparse, the delta across a gap is the
//! delta between the two nearest present samples, which can understate the
//! true climb. This is intentional and matches how imported files have always
//! been summarized.

use stride_core::constants::units::{METERS_PER_KM, SECONDS_PER_MINUTE};
use stride_core::models::{Activity, Statistics, Trackpoint};
use tracing::trace;

/// Divide, returning `0.0` when the divisor is not positive
#[inline]
pub(crate) fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Arithmetic mean, `None` for an empty slice
#[inline]
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Pace in minutes per kilometer for a speed in m/s; `None` unless speed > 0
#[must_use]
pub fn pace_from_speed(speed_mps: f64) -> Option<f64> {
    (speed_mps > 0.0).then(|| METERS_PER_KM / (speed_mps * SECONDS_PER_MINUTE))
}

/// Render a min/km pace as `m:ss`
#[must_use]
pub fn format_pace(minutes_per_km: f64) -> String {
    let total_seconds = (minutes_per_km * SECONDS_PER_MINUTE).round().max(0.0) as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Mean, minimum, and maximum of an integer sample stream
#[derive(Debug, Clone, Copy)]
struct SampleSummary {
    mean: f64,
    min: u32,
    max: u32,
}

impl SampleSummary {
    fn from_samples(samples: impl Iterator<Item = u32>) -> Option<Self> {
        let mut count = 0_u32;
        let mut sum = 0.0_f64;
        let mut min = u32::MAX;
        let mut max = u32::MIN;
        for sample in samples {
            count += 1;
            sum += f64::from(sample);
            min = min.min(sample);
            max = max.max(sample);
        }
        (count > 0).then(|| Self {
            mean: sum / f64::from(count),
            min,
            max,
        })
    }
}

/// Altitude extremes and accumulated climb/descent
#[derive(Debug, Clone, Copy, Default)]
struct ElevationSummary {
    gain: f64,
    loss: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl ElevationSummary {
    fn from_points(points: &[&Trackpoint]) -> Self {
        let altitudes: Vec<f64> = points.iter().filter_map(|p| p.altitude_meters).collect();
        let mut summary = Self::default();
        for pair in altitudes.windows(2) {
            let delta = pair[1] - pair[0];
            if delta > 0.0 {
                summary.gain += delta;
            } else {
                summary.loss -= delta;
            }
        }
        summary.min = altitudes.iter().copied().reduce(f64::min);
        summary.max = altitudes.iter().copied().reduce(f64::max);
        summary
    }
}

/// Statistics engine
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// Derive a [`Statistics`] snapshot from an activity
    ///
    /// Never fails. An activity without trackpoints falls back to its
    /// activity-level distance, time, and calories.
    #[must_use]
    pub fn calculate(activity: &Activity) -> Statistics {
        let points: Vec<&Trackpoint> = activity.trackpoints().collect();
        let total_distance = activity.distance_meters();
        let total_time = activity.total_time_seconds();
        let total_calories = Self::total_calories(activity);

        trace!(
            activity_id = %activity.id(),
            trackpoints = points.len(),
            "calculating activity statistics"
        );

        if points.is_empty() {
            let average_speed = safe_divide(total_distance, total_time);
            return Statistics {
                total_distance,
                total_time,
                average_speed,
                max_speed: 0.0,
                total_calories,
                average_pace: pace_from_speed(average_speed),
                ..Statistics::default()
            };
        }

        let heart_rate = SampleSummary::from_samples(points.iter().filter_map(|p| p.heart_rate));
        let cadence = SampleSummary::from_samples(points.iter().filter_map(|p| p.cadence));
        let elevation = ElevationSummary::from_points(&points);
        let (average_speed, max_speed) = Self::speeds(activity, &points);

        Statistics {
            total_distance,
            total_time,
            average_speed,
            max_speed,
            average_heart_rate: heart_rate.map(|hr| hr.mean),
            max_heart_rate: heart_rate.map(|hr| hr.max),
            min_heart_rate: heart_rate.map(|hr| hr.min),
            average_cadence: cadence.map(|c| c.mean),
            max_cadence: cadence.map(|c| c.max),
            total_calories,
            elevation_gain: (elevation.gain > 0.0).then_some(elevation.gain),
            elevation_loss: (elevation.loss > 0.0).then_some(elevation.loss),
            min_altitude: elevation.min,
            max_altitude: elevation.max,
            average_pace: pace_from_speed(average_speed),
            max_pace: pace_from_speed(max_speed),
        }
    }

    /// Average and maximum speed in m/s
    ///
    /// With explicit speed samples, only moving samples (`speed > 0`) count.
    /// Without any, the average is distance over time and the maximum is the
    /// highest declared lap maximum.
    fn speeds(activity: &Activity, points: &[&Trackpoint]) -> (f64, f64) {
        let has_speed_samples = points.iter().any(|p| p.speed.is_some());
        if has_speed_samples {
            let moving: Vec<f64> = points
                .iter()
                .filter_map(|p| p.speed)
                .filter(|speed| *speed > 0.0)
                .collect();
            let average = mean(&moving).unwrap_or(0.0);
            let max = moving.iter().copied().fold(0.0, f64::max);
            return (average, max);
        }

        let average = safe_divide(activity.distance_meters(), activity.total_time_seconds());
        let max = activity
            .laps()
            .iter()
            .filter_map(|lap| lap.max_speed)
            .fold(0.0, f64::max);
        (average, max)
    }

    /// Activity calories, else the sum of lap calories when any lap has them
    fn total_calories(activity: &Activity) -> Option<f64> {
        activity.calories().or_else(|| {
            let lap_calories: Vec<f64> = activity.laps().iter().filter_map(|lap| lap.calories).collect();
            (!lap_calories.is_empty()).then(|| lap_calories.iter().sum())
        })
    }
}

/// Convenience wrapper around [`StatisticsEngine::calculate`]
#[must_use]
pub fn calculate_statistics(activity: &Activity) -> Statistics {
    StatisticsEngine::calculate(activity)
}
