// ABOUTME: Environment-based configuration for data location, zone defaults, and trend settings
// ABOUTME: Every value has a default; validate() rejects values outside their accepted range
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use stride_core::constants::heart_rate::{DEFAULT_AGE, MAX_AGE, MIN_AGE};
use stride_core::constants::trends::{DEFAULT_EVOLUTION_PERIODS, STABLE_THRESHOLD_PERCENT};
use stride_intelligence::TrendAggregator;
use tracing::warn;

use super::error::ConfigError;

/// Directory name under the platform data directory
const DATA_DIR_NAME: &str = "stride-tracker";
/// File holding the persisted zone settings
const ZONE_SETTINGS_FILE: &str = "zone_settings.json";
/// Upper bound on evolution series length (ten years of weeks)
const MAX_EVOLUTION_PERIODS: usize = 520;

/// Read `name` and parse it, falling back to `default` when unset or unparsable
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "ignoring unparsable configuration value");
            default
        }),
        Err(_) => default,
    }
}

/// Parse a required value, surfacing the variable name on failure
///
/// # Errors
///
/// Returns `ConfigError::Parse` if `raw` is not a valid `T`
pub fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{name}: cannot parse '{raw}'")))
}

/// Tracker configuration loaded from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct StrideConfig {
    /// Directory for persisted state (`STRIDE_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Age used for zones before the user configures any (`STRIDE_DEFAULT_AGE`)
    pub default_age: u32,
    /// Default evolution series length (`STRIDE_EVOLUTION_PERIODS`)
    pub evolution_periods: usize,
    /// Percent change under which a trend is stable (`STRIDE_TREND_STABLE_THRESHOLD`)
    pub trend_stable_threshold: f64,
}

impl Default for StrideConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            default_age: DEFAULT_AGE,
            evolution_periods: DEFAULT_EVOLUTION_PERIODS,
            trend_stable_threshold: STABLE_THRESHOLD_PERCENT,
        }
    }
}

impl StrideConfig {
    fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME)
    }

    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("STRIDE_DATA_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map_or_else(Self::default_data_dir, PathBuf::from),
            default_age: env_or("STRIDE_DEFAULT_AGE", DEFAULT_AGE),
            evolution_periods: env_or("STRIDE_EVOLUTION_PERIODS", DEFAULT_EVOLUTION_PERIODS),
            trend_stable_threshold: env_or(
                "STRIDE_TREND_STABLE_THRESHOLD",
                STABLE_THRESHOLD_PERCENT,
            ),
        }
    }

    /// Check every value against its accepted range
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("STRIDE_DATA_DIR"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.default_age) {
            return Err(ConfigError::ValueOutOfRange(
                "STRIDE_DEFAULT_AGE must be between 1 and 120",
            ));
        }
        if !(1..=MAX_EVOLUTION_PERIODS).contains(&self.evolution_periods) {
            return Err(ConfigError::InvalidRange(
                "STRIDE_EVOLUTION_PERIODS must be between 1 and 520",
            ));
        }
        if !(0.0..=100.0).contains(&self.trend_stable_threshold) {
            return Err(ConfigError::InvalidRange(
                "STRIDE_TREND_STABLE_THRESHOLD must be between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Path of the persisted zone settings file
    #[must_use]
    pub fn zone_settings_path(&self) -> PathBuf {
        self.data_dir.join(ZONE_SETTINGS_FILE)
    }

    /// Trend aggregator using the configured stable threshold
    #[must_use]
    pub const fn trend_aggregator(&self) -> TrendAggregator {
        TrendAggregator::new(self.trend_stable_threshold)
    }
}
