// ABOUTME: Personal record entities, record types, categories, and the (type, category, sport) key
// ABOUTME: Records are append-only; the current best per key is derived by queries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::record_bands;

/// Metric a personal record is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordType {
    /// Distance covered (m)
    Distance,
    /// Speed (m/s)
    Speed,
    /// Pace (min/km)
    Pace,
    /// Elapsed time over a fixed distance band (s)
    Time,
    /// Elevation gain (m)
    Elevation,
    /// Calories burned (kcal)
    Calories,
    /// Heart rate (BPM)
    HeartRate,
}

impl RecordType {
    /// Stable camelCase name, also used inside record ids
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Speed => "speed",
            Self::Pace => "pace",
            Self::Time => "time",
            Self::Elevation => "elevation",
            Self::Calories => "calories",
            Self::HeartRate => "heartRate",
        }
    }

    /// Unit of values of this type
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Distance | Self::Elevation => "m",
            Self::Speed => "m/s",
            Self::Pace => "min/km",
            Self::Time => "s",
            Self::Calories => "kcal",
            Self::HeartRate => "bpm",
        }
    }

    /// Whether a smaller value beats a larger one
    #[must_use]
    pub const fn lower_is_better(&self) -> bool {
        matches!(self, Self::Time | Self::Pace)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative bucket a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordCategory {
    /// 900-1100m
    #[serde(rename = "1km")]
    OneKm,
    /// 4500-5500m
    #[serde(rename = "5km")]
    FiveKm,
    /// 9500-10500m
    #[serde(rename = "10km")]
    TenKm,
    /// 20000-22000m
    #[serde(rename = "halfMarathon")]
    HalfMarathon,
    /// 41000-43000m
    #[serde(rename = "marathon")]
    Marathon,
    /// Largest value (distance, and calories by default)
    #[serde(rename = "longest")]
    Longest,
    /// Highest instantaneous speed
    #[serde(rename = "fastest")]
    Fastest,
    /// Largest elevation gain
    #[serde(rename = "highest")]
    Highest,
}

impl RecordCategory {
    /// Fixed distance bands in ascending order
    pub const DISTANCE_BANDS: [Self; 5] = [
        Self::OneKm,
        Self::FiveKm,
        Self::TenKm,
        Self::HalfMarathon,
        Self::Marathon,
    ];

    /// Stable name, also used inside record ids
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneKm => "1km",
            Self::FiveKm => "5km",
            Self::TenKm => "10km",
            Self::HalfMarathon => "halfMarathon",
            Self::Marathon => "marathon",
            Self::Longest => "longest",
            Self::Fastest => "fastest",
            Self::Highest => "highest",
        }
    }

    /// Inclusive `(min, max)` meters for distance bands, `None` otherwise
    #[must_use]
    pub const fn distance_band(&self) -> Option<(f64, f64)> {
        match self {
            Self::OneKm => Some(record_bands::ONE_KM),
            Self::FiveKm => Some(record_bands::FIVE_KM),
            Self::TenKm => Some(record_bands::TEN_KM),
            Self::HalfMarathon => Some(record_bands::HALF_MARATHON),
            Self::Marathon => Some(record_bands::MARATHON),
            Self::Longest | Self::Fastest | Self::Highest => None,
        }
    }

    /// Whether `distance_meters` falls inside this category's band
    #[must_use]
    pub fn matches_distance(&self, distance_meters: f64) -> bool {
        self.distance_band()
            .is_some_and(|(min, max)| distance_meters >= min && distance_meters <= max)
    }
}

impl fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key under which at most one record is "current"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordTriple {
    /// Record type
    pub record_type: RecordType,
    /// Record category
    pub category: RecordCategory,
    /// Sport the record was set in
    pub sport: String,
}

impl RecordTriple {
    /// Build a key
    pub fn new(record_type: RecordType, category: RecordCategory, sport: impl Into<String>) -> Self {
        Self {
            record_type,
            category,
            sport: sport.into(),
        }
    }
}

/// A single best-performance entry
///
/// Each detection appends a new entity; previous entries for the same
/// triple are kept as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    /// Deterministic id `{activityId}-{recordType}-{category}`
    pub id: String,
    /// Metric
    pub record_type: RecordType,
    /// Bucket
    pub category: RecordCategory,
    /// Value in `unit`
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Activity that set the record
    pub activity_id: String,
    /// Start time of that activity
    pub activity_date: DateTime<Utc>,
    /// Sport of that activity
    pub sport: String,
    /// Value of the superseded record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<f64>,
    /// Activity of the superseded record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_activity_id: Option<String>,
    /// Date of the superseded record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_date: Option<DateTime<Utc>>,
    /// Gain over the superseded value (positive means better)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
    /// When the record was detected
    pub created_at: DateTime<Utc>,
    /// UI badge flag, not meaningful once persisted
    #[serde(default)]
    pub is_new: bool,
}

impl PersonalRecord {
    /// Deterministic record id
    #[must_use]
    pub fn make_id(activity_id: &str, record_type: RecordType, category: RecordCategory) -> String {
        format!("{activity_id}-{record_type}-{category}")
    }

    /// Key of this record
    #[must_use]
    pub fn triple(&self) -> RecordTriple {
        RecordTriple::new(self.record_type, self.category, self.sport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_format() {
        assert_eq!(
            PersonalRecord::make_id("act-9", RecordType::Time, RecordCategory::HalfMarathon),
            "act-9-time-halfMarathon"
        );
        assert_eq!(
            PersonalRecord::make_id("act-9", RecordType::HeartRate, RecordCategory::Highest),
            "act-9-heartRate-highest"
        );
    }

    #[test]
    fn test_distance_bands_are_inclusive() {
        assert!(RecordCategory::FiveKm.matches_distance(4500.0));
        assert!(RecordCategory::FiveKm.matches_distance(5500.0));
        assert!(!RecordCategory::FiveKm.matches_distance(5500.1));
        assert!(!RecordCategory::Longest.matches_distance(5000.0));
    }

    #[test]
    fn test_category_serializes_to_band_name() {
        let json = serde_json::to_string(&RecordCategory::HalfMarathon).ok();
        assert_eq!(json.as_deref(), Some("\"halfMarathon\""));
    }
}
