// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Zone percentage bands, record distance bands, classification thresholds, and unit conversions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! Constants grouped by domain.

/// Unit conversion and measurement constants
pub mod units {
    /// Meters in one kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    /// Multiply meters per second by this factor to get km/h
    pub const MPS_TO_KMH: f64 = 3.6;
}

/// Heart rate configuration limits
pub mod heart_rate {
    /// Base of the age-predicted maximum heart rate formula (`220 - age`)
    pub const AGE_FORMULA_BASE: u32 = 220;
    /// Youngest accepted age for the age formula
    pub const MIN_AGE: u32 = 1;
    /// Oldest accepted age for the age formula
    pub const MAX_AGE: u32 = 120;
    /// Age used when no zone settings have been configured yet
    pub const DEFAULT_AGE: u32 = 30;
}

/// Percent-of-reserve (or percent-of-max) bands for the five heart rate zones
pub mod zone_percentages {
    /// `(min, max)` percentage pairs, zone 1 first
    pub const ZONE_BANDS: [(u32, u32); 5] = [(50, 60), (60, 70), (70, 80), (80, 90), (90, 100)];
    /// Number of heart rate zones
    pub const ZONE_COUNT: usize = 5;
}

/// Distance bands used by time-on-distance and 10km speed records (meters)
pub mod record_bands {
    /// 1km band
    pub const ONE_KM: (f64, f64) = (900.0, 1100.0);
    /// 5km band
    pub const FIVE_KM: (f64, f64) = (4500.0, 5500.0);
    /// 10km band
    pub const TEN_KM: (f64, f64) = (9500.0, 10500.0);
    /// Half marathon band
    pub const HALF_MARATHON: (f64, f64) = (20000.0, 22000.0);
    /// Marathon band
    pub const MARATHON: (f64, f64) = (41000.0, 43000.0);
}

/// Thresholds of the training-type decision list (zone percentages)
pub mod training_type {
    /// `Z1 + Z2` share above which a session counts as recovery
    pub const RECOVERY_LOW_ZONES: f64 = 60.0;
    /// `Z2 + Z3` share above which a session counts as endurance
    pub const ENDURANCE_AEROBIC_ZONES: f64 = 70.0;
    /// `Z3 + Z4` share above which a session counts as tempo
    pub const TEMPO_ZONES: f64 = 50.0;
    /// `Z4` share above which a session counts as threshold
    pub const THRESHOLD_ZONE4: f64 = 40.0;
    /// `Z5` share above which a session counts as interval
    pub const INTERVAL_ZONE5: f64 = 20.0;
    /// `Z4 + Z5` share for the secondary interval rule
    pub const INTERVAL_HIGH_ZONES: f64 = 50.0;
    /// Minimum `Z5` share for the secondary interval rule
    pub const INTERVAL_ZONE5_SECONDARY: f64 = 15.0;
    /// Unknown share below which a session is labelled mixed
    pub const MIXED_MAX_UNKNOWN: f64 = 50.0;
    /// Efficiency reported when the training type is unknown
    pub const NEUTRAL_EFFICIENCY: f64 = 50.0;
}

/// Period-over-period trend constants
pub mod trends {
    /// Absolute percent change under which a series is considered stable
    pub const STABLE_THRESHOLD_PERCENT: f64 = 5.0;
    /// Percent change reported for any growth from a zero baseline
    pub const GROWTH_FROM_ZERO_PERCENT: f64 = 100.0;
    /// Default number of trailing periods in an evolution series
    pub const DEFAULT_EVOLUTION_PERIODS: usize = 8;
}
