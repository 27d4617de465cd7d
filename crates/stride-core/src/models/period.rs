// ABOUTME: Period and trend models: date ranges, period statistics, comparisons, evolution series
// ABOUTME: All values are computed fresh per request and never persisted
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Calendar granularity of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Monday 00:00 to Sunday 23:59:59.999
    Week,
    /// First to last day of a calendar month
    Month,
    /// January 1 to December 31
    Year,
    /// Caller-supplied bounds; treated as a week where a calendar rule is needed
    Custom,
}

impl PeriodType {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "custom" | "all" => Ok(Self::Custom),
            other => Err(AppError::invalid_input(format!(
                "Unknown period type '{other}' (expected week, month, year, or custom)"
            ))),
        }
    }
}

/// Key scheme for grouping activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// ISO date, `2024-05-01`
    Day,
    /// `{year}-W{week}`
    Week,
    /// `{year}-{month:02}`
    Month,
    /// `{year}`
    Year,
}

/// Inclusive UTC date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First instant in the range
    pub start: DateTime<Utc>,
    /// Last instant in the range
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range from its bounds
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` lies within the range (both ends inclusive)
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Per-sport slice of a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SportSummary {
    /// Number of activities
    pub count: usize,
    /// Summed distance in meters
    pub distance: f64,
    /// Summed elapsed time in seconds
    pub time: f64,
}

/// Aggregate over the activities that started inside a date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    /// Number of activities
    pub activity_count: usize,
    /// Summed distance in meters
    pub total_distance: f64,
    /// Summed elapsed time in seconds
    pub total_time: f64,
    /// Summed calories (activities without calories contribute nothing)
    pub total_calories: f64,
    /// Summed elevation gain in meters
    pub total_elevation_gain: f64,
    /// Total distance over total time (m/s)
    pub average_speed: f64,
    /// Mean of the per-activity average heart rates that exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Mean of the per-activity average cadences that exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
    /// Breakdown keyed by sport label
    pub by_sport: BTreeMap<String, SportSummary>,
}

/// Percent change per metric between two periods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodChanges {
    /// Activity count change (%)
    pub activities: f64,
    /// Distance change (%)
    pub distance: f64,
    /// Time change (%)
    pub time: f64,
    /// Calories change (%)
    pub calories: f64,
    /// Elevation gain change (%)
    pub elevation_gain: f64,
    /// Average speed change (%)
    pub average_speed: f64,
    /// Average heart rate change (%), only when both periods have one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
}

/// Current period against the one before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonData {
    /// Current range
    pub current_range: DateRange,
    /// Previous range
    pub previous_range: DateRange,
    /// Current period statistics
    pub current: PeriodStatistics,
    /// Previous period statistics
    pub previous: PeriodStatistics,
    /// Percent changes, previous to current
    pub changes: PeriodChanges,
}

/// Metric extracted for an evolution series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionMetricKind {
    /// Distance in km
    Distance,
    /// Time in hours
    Time,
    /// Average speed in km/h
    Speed,
    /// Average heart rate in BPM
    HeartRate,
    /// Number of activities
    Count,
}

impl FromStr for EvolutionMetricKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "distance" => Ok(Self::Distance),
            "time" | "duration" => Ok(Self::Time),
            "speed" => Ok(Self::Speed),
            "heart-rate" | "heartrate" | "hr" => Ok(Self::HeartRate),
            "count" | "activities" => Ok(Self::Count),
            other => Err(AppError::invalid_input(format!(
                "Unknown evolution metric '{other}'"
            ))),
        }
    }
}

/// Direction of an evolution series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Second half above first half by at least the stable threshold
    Up,
    /// Second half below first half by at least the stable threshold
    Down,
    /// Change within the stable threshold
    Stable,
}

/// One period of an evolution series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    /// Display label, e.g. `2024-W5`
    pub label: String,
    /// Period bounds
    pub range: DateRange,
    /// Metric value; `None` for heart rate when no activity had one
    pub value: Option<f64>,
}

/// Chronological series of one metric over trailing periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionMetric {
    /// Extracted metric
    pub metric: EvolutionMetricKind,
    /// Period granularity
    pub period_type: PeriodType,
    /// Points, oldest first
    pub points: Vec<EvolutionPoint>,
    /// First half against second half
    pub trend: TrendDirection,
    /// Percent change of the second-half mean over the first-half mean
    pub change_percent: f64,
    /// Mean of the present values
    pub average: f64,
}
