// ABOUTME: Derived per-activity statistics snapshot (speed, pace, heart rate, elevation)
// ABOUTME: Recomputed on demand from an activity and never persisted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use serde::{Deserialize, Serialize};

/// Aggregate statistics derived from one activity
///
/// Optional fields are omitted when the activity has no samples for them;
/// a missing field is never reported as `0`. Pace is in minutes per
/// kilometer and only exists when the matching speed is positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Total distance in meters
    pub total_distance: f64,
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Average speed in m/s
    pub average_speed: f64,
    /// Maximum speed in m/s
    pub max_speed: f64,
    /// Mean of the present heart rate samples (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Highest heart rate sample (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Lowest heart rate sample (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_heart_rate: Option<u32>,
    /// Mean of the present cadence samples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
    /// Highest cadence sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cadence: Option<u32>,
    /// Calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<f64>,
    /// Sum of positive altitude deltas in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    /// Sum of negative altitude deltas in meters (positive number)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_loss: Option<f64>,
    /// Lowest altitude sample in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_altitude: Option<f64>,
    /// Highest altitude sample in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_altitude: Option<f64>,
    /// Pace at the average speed (min/km)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_pace: Option<f64>,
    /// Pace at the maximum speed, i.e. the best pace (min/km)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pace: Option<f64>,
}
