// ABOUTME: Core types and constants for the Stride personal fitness tracker
// ABOUTME: Foundation crate with the activity data model, error handling, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![deny(unsafe_code)]

//! # Stride Core
//!
//! Foundation crate providing the shared data model and constants for the
//! Stride fitness tracker. The analytical crate and the service layer both
//! build on these types, so this crate is kept small and stable.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Zone bands, record distance bands, and classification thresholds
//! - **models**: Activities, derived statistics, zones, personal records, and period summaries

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Activity, Statistics, zones, records, periods)
pub mod models;
