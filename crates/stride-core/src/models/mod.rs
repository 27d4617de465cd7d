// ABOUTME: Core data models for the Stride fitness tracker
// ABOUTME: Re-exports activity, statistics, zone, record, and period types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! # Data Models
//!
//! Activities come in normalized from the ingestion layer; everything else in
//! this module is either derived from activities (statistics, zone analyses,
//! period summaries) or produced from them (personal records).

/// Activity, lap, trackpoint, and builder
pub mod activity;
/// Period ranges, period statistics, comparisons, evolution series
pub mod period;
/// Personal records and their keys
pub mod record;
/// Per-activity derived statistics
pub mod statistics;
/// Heart rate zones, zone settings, and zone analysis
pub mod zones;

pub use activity::{Activity, ActivityBuilder, DeviceInfo, Lap, Trackpoint};
pub use period::{
    ComparisonData, DateRange, EvolutionMetric, EvolutionMetricKind, EvolutionPoint, Grouping,
    PeriodChanges, PeriodStatistics, PeriodType, SportSummary, TrendDirection,
};
pub use record::{PersonalRecord, RecordCategory, RecordTriple, RecordType};
pub use statistics::Statistics;
pub use zones::{
    max_heart_rate_from_age, HeartRateZone, TrainingType, ZoneAnalysis, ZoneDistribution,
    ZoneMethod, ZonePercentages, ZoneSettings, ZoneTime,
};
