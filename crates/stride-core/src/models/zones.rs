// ABOUTME: Heart rate zone models, zone settings, and per-activity zone analysis results
// ABOUTME: Defines the five-zone model, distribution/percentage buckets, and training type labels
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::heart_rate::{AGE_FORMULA_BASE, DEFAULT_AGE, MAX_AGE, MIN_AGE};
use crate::constants::zone_percentages::ZONE_COUNT;
use crate::errors::{AppError, AppResult};

/// One of the five ordered heart rate bands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Zone number, 1 (easiest) to 5 (hardest)
    pub zone: u8,
    /// Short name, e.g. "Endurance"
    pub name: String,
    /// One-line description of the effort
    pub description: String,
    /// Lower heart rate bound (BPM, inclusive)
    pub min_heart_rate: u32,
    /// Upper heart rate bound (BPM, inclusive)
    pub max_heart_rate: u32,
    /// Lower bound as a percentage of max (or of reserve for Karvonen)
    pub min_percent: u32,
    /// Upper bound as a percentage of max (or of reserve for Karvonen)
    pub max_percent: u32,
    /// Display color (hex)
    pub color: String,
    /// Physiological benefits of training in this zone
    #[serde(default)]
    pub benefits: Vec<String>,
    /// How to use this zone in a training plan
    #[serde(default)]
    pub recommendation: String,
}

impl HeartRateZone {
    /// Whether `heart_rate` lies inside `[min_heart_rate, max_heart_rate]`
    #[must_use]
    pub const fn contains(&self, heart_rate: u32) -> bool {
        heart_rate >= self.min_heart_rate && heart_rate <= self.max_heart_rate
    }
}

/// How the zone boundaries were derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMethod {
    /// Percentages of the maximum heart rate
    #[default]
    Age,
    /// Percentages of the heart rate reserve, offset by resting heart rate
    Karvonen,
    /// Zones supplied directly by the user
    Manual,
}

impl ZoneMethod {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Karvonen => "karvonen",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ZoneMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "age" => Ok(Self::Age),
            "karvonen" => Ok(Self::Karvonen),
            "manual" => Ok(Self::Manual),
            other => Err(AppError::invalid_input(format!(
                "Unknown zone method '{other}' (expected age, karvonen, or manual)"
            ))),
        }
    }
}

/// Estimate maximum heart rate with the `220 - age` formula
///
/// # Errors
///
/// Returns `AppError::out_of_range` if `age` is outside 1..=120
pub fn max_heart_rate_from_age(age: u32) -> AppResult<u32> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(AppError::out_of_range(format!(
            "Age must be between {MIN_AGE} and {MAX_AGE} years, got {age}"
        )));
    }
    Ok(AGE_FORMULA_BASE - age)
}

/// Persisted per-user heart rate zone configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSettings {
    /// Age used to derive the maximum heart rate, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Maximum heart rate (BPM)
    pub max_heart_rate: u32,
    /// Resting heart rate (BPM), required for Karvonen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<u32>,
    /// Boundary derivation method
    pub method: ZoneMethod,
    /// Zones supplied by the user for the manual method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_zones: Option<Vec<HeartRateZone>>,
    /// When the settings were last written
    pub updated_at: DateTime<Utc>,
}

impl ZoneSettings {
    /// Age-formula settings: max HR = `220 - age`, zones as percent of max
    ///
    /// # Errors
    ///
    /// Returns an error if `age` is outside the accepted range
    pub fn from_age(age: u32) -> AppResult<Self> {
        Ok(Self {
            age: Some(age),
            max_heart_rate: max_heart_rate_from_age(age)?,
            resting_heart_rate: None,
            method: ZoneMethod::Age,
            custom_zones: None,
            updated_at: Utc::now(),
        })
    }

    /// Karvonen settings from a known max and resting heart rate
    ///
    /// # Errors
    ///
    /// Returns an error if the resting heart rate is zero or not below the max
    pub fn karvonen(max_heart_rate: u32, resting_heart_rate: u32) -> AppResult<Self> {
        if resting_heart_rate == 0 || resting_heart_rate >= max_heart_rate {
            return Err(AppError::invalid_input(format!(
                "Resting heart rate {resting_heart_rate} must be positive and below max heart rate {max_heart_rate}"
            )));
        }
        Ok(Self {
            age: None,
            max_heart_rate,
            resting_heart_rate: Some(resting_heart_rate),
            method: ZoneMethod::Karvonen,
            custom_zones: None,
            updated_at: Utc::now(),
        })
    }

    /// Manual settings; the zones are used exactly as given
    ///
    /// # Errors
    ///
    /// Returns an error unless `zones` holds exactly zones 1..=5 in order
    pub fn manual(max_heart_rate: u32, zones: Vec<HeartRateZone>) -> AppResult<Self> {
        let numbered_in_order = zones
            .iter()
            .enumerate()
            .all(|(index, zone)| usize::from(zone.zone) == index + 1);
        if zones.len() != ZONE_COUNT || !numbered_in_order {
            return Err(AppError::invalid_input(
                "Manual zones must contain exactly zones 1 to 5 in order",
            ));
        }
        Ok(Self {
            age: None,
            max_heart_rate,
            resting_heart_rate: None,
            method: ZoneMethod::Manual,
            custom_zones: Some(zones),
            updated_at: Utc::now(),
        })
    }

    /// Re-run the constructor checks on settings loaded from storage
    ///
    /// # Errors
    ///
    /// Returns an error if the stored settings are inconsistent with their method
    pub fn validate(&self) -> AppResult<()> {
        match self.method {
            ZoneMethod::Age => {
                if self.max_heart_rate == 0 {
                    return Err(AppError::invalid_input("Max heart rate must be positive"));
                }
            }
            ZoneMethod::Karvonen => {
                let resting = self.resting_heart_rate.ok_or_else(|| {
                    AppError::invalid_input("Karvonen zones require a resting heart rate")
                })?;
                Self::karvonen(self.max_heart_rate, resting)?;
            }
            ZoneMethod::Manual => {
                let zones = self.custom_zones.clone().ok_or_else(|| {
                    AppError::invalid_input("Manual zone settings have no zones")
                })?;
                Self::manual(self.max_heart_rate, zones)?;
            }
        }
        Ok(())
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            age: Some(DEFAULT_AGE),
            max_heart_rate: AGE_FORMULA_BASE - DEFAULT_AGE,
            resting_heart_rate: None,
            method: ZoneMethod::Age,
            custom_zones: None,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Elapsed seconds attributed to each zone plus an "unknown" bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDistribution {
    /// Seconds in zone 1
    pub zone1: f64,
    /// Seconds in zone 2
    pub zone2: f64,
    /// Seconds in zone 3
    pub zone3: f64,
    /// Seconds in zone 4
    pub zone4: f64,
    /// Seconds in zone 5
    pub zone5: f64,
    /// Seconds without a usable heart rate
    pub unknown: f64,
}

impl ZoneDistribution {
    /// Seconds in zone `zone` (1..=5); other numbers yield `0`
    #[must_use]
    pub const fn zone(&self, zone: u8) -> f64 {
        match zone {
            1 => self.zone1,
            2 => self.zone2,
            3 => self.zone3,
            4 => self.zone4,
            5 => self.zone5,
            _ => 0.0,
        }
    }

    /// Add `seconds` to `zone`, or to the unknown bucket when `zone` is `None`
    pub fn add(&mut self, zone: Option<u8>, seconds: f64) {
        let bucket = match zone {
            Some(1) => &mut self.zone1,
            Some(2) => &mut self.zone2,
            Some(3) => &mut self.zone3,
            Some(4) => &mut self.zone4,
            Some(5) => &mut self.zone5,
            _ => &mut self.unknown,
        };
        *bucket += seconds;
    }

    /// Total seconds across all six buckets
    #[must_use]
    pub fn total(&self) -> f64 {
        self.zone1 + self.zone2 + self.zone3 + self.zone4 + self.zone5 + self.unknown
    }
}

/// Integer share (0-100) of total elapsed time per bucket
///
/// Each bucket is rounded on its own, so the six values may add up to 99 or 101.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePercentages {
    /// Percent in zone 1
    pub zone1: u32,
    /// Percent in zone 2
    pub zone2: u32,
    /// Percent in zone 3
    pub zone3: u32,
    /// Percent in zone 4
    pub zone4: u32,
    /// Percent in zone 5
    pub zone5: u32,
    /// Percent without heart rate
    pub unknown: u32,
}

impl ZonePercentages {
    /// Percent in zone `zone` (1..=5); other numbers yield `0`
    #[must_use]
    pub const fn zone(&self, zone: u8) -> u32 {
        match zone {
            1 => self.zone1,
            2 => self.zone2,
            3 => self.zone3,
            4 => self.zone4,
            5 => self.zone5,
            _ => 0,
        }
    }

    /// Sum of all six buckets
    #[must_use]
    pub const fn sum(&self) -> u32 {
        self.zone1 + self.zone2 + self.zone3 + self.zone4 + self.zone5 + self.unknown
    }
}

/// Coarse label summarizing a session's zone distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingType {
    /// Mostly zones 1-2, leaning on zone 1
    Recovery,
    /// Mostly zones 2-3, leaning on zone 2
    Endurance,
    /// Mostly zones 3-4, leaning on zone 3
    Tempo,
    /// Large share of zone 4
    Threshold,
    /// Significant time in zone 5
    Interval,
    /// No dominant pattern, but enough heart rate data
    Mixed,
    /// Not enough heart rate data
    Unknown,
}

impl TrainingType {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Endurance => "endurance",
            Self::Tempo => "tempo",
            Self::Threshold => "threshold",
            Self::Interval => "interval",
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display row for one zone of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTime {
    /// Zone number (1..=5)
    pub zone: u8,
    /// Zone name
    pub name: String,
    /// Display color
    pub color: String,
    /// Seconds spent in the zone
    pub seconds: f64,
    /// Minutes spent in the zone
    pub minutes: f64,
    /// Share of total time (0-100)
    pub percentage: u32,
}

/// Result of classifying one activity against a set of zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnalysis {
    /// Seconds per bucket
    pub distribution: ZoneDistribution,
    /// Rounded percentages per bucket
    pub percentages: ZonePercentages,
    /// Zone with the most time (ties go to the lower zone); `None` without zone time
    pub dominant_zone: Option<u8>,
    /// Training type from the decision list
    pub training_type: TrainingType,
    /// Closeness to the ideal distribution for the training type (0-100)
    pub efficiency: u32,
    /// Static advice for the training type
    pub recommendations: Vec<String>,
    /// Per-zone breakdown for display
    pub breakdown: Vec<ZoneTime>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_age_formula() {
        assert_eq!(max_heart_rate_from_age(30).unwrap(), 190);
        assert!(max_heart_rate_from_age(0).is_err());
        assert!(max_heart_rate_from_age(121).is_err());
    }

    #[test]
    fn test_karvonen_requires_resting_below_max() {
        assert!(ZoneSettings::karvonen(190, 55).is_ok());
        assert!(ZoneSettings::karvonen(190, 190).is_err());
        assert!(ZoneSettings::karvonen(190, 0).is_err());
    }

    #[test]
    fn test_stored_karvonen_without_resting_is_invalid() {
        let mut settings = ZoneSettings::karvonen(190, 55).unwrap();
        settings.resting_heart_rate = None;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_distribution_add_routes_unknown() {
        let mut distribution = ZoneDistribution::default();
        distribution.add(Some(3), 10.0);
        distribution.add(None, 5.0);
        distribution.add(Some(9), 1.0);
        assert!((distribution.zone(3) - 10.0).abs() < f64::EPSILON);
        assert!((distribution.unknown - 6.0).abs() < f64::EPSILON);
        assert!((distribution.total() - 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zone_method_parsing() {
        assert_eq!("Karvonen".parse::<ZoneMethod>().unwrap(), ZoneMethod::Karvonen);
        assert!("heart".parse::<ZoneMethod>().is_err());
    }
}
