// ABOUTME: Analytical core of the Stride fitness tracker
// ABOUTME: Pure, synchronous computations over in-memory activities and records
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![deny(unsafe_code)]

//! # Stride Intelligence
//!
//! Everything in this crate is a pure function of its inputs: no I/O, no
//! clocks except where a caller-supplied timestamp is required, and no
//! shared state. Callers load activities and records, pass them in, and
//! persist whatever comes back.
//!
//! - [`statistics`]: per-activity statistics from raw trackpoints
//! - [`periods`]: week/month/year arithmetic and grouping
//! - [`zones`]: heart rate zone boundaries and time-in-zone classification
//! - [`records`]: personal record detection and current-record queries
//! - [`trends`]: period summaries, comparisons, and evolution series

/// Period and calendar arithmetic
pub mod periods;
/// Personal record detection
pub mod records;
/// Per-activity statistics engine
pub mod statistics;
/// Period aggregation, comparison, and evolution
pub mod trends;
/// Heart rate zone definition and classification
pub mod zones;

pub use periods::PeriodCalculator;
pub use records::{detect_records, latest_by_triple, RecordDetection, RecordDetector};
pub use statistics::{calculate_statistics, StatisticsEngine};
pub use trends::TrendAggregator;
pub use zones::{calculate_zones, ZoneClassifier};
