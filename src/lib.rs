// ABOUTME: Main library entry point for the Stride personal fitness tracker
// ABOUTME: Wires configuration, logging, storage ports, services, and coach context around the analytics core
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

#![deny(unsafe_code)]

//! # Stride Tracker
//!
//! A single-user fitness tracker. Normalized activities come in from an
//! ingestion layer; this crate stores them, detects personal records,
//! classifies heart rate zones, and aggregates period trends.
//!
//! ## Architecture
//!
//! - **`stride-core`**: data model, errors, constants
//! - **`stride-intelligence`**: pure statistics, zones, records, periods, trends
//! - **Storage**: async ports with in-memory and JSON-file adapters
//! - **Services**: orchestration of storage and the analytics core
//! - **Coach**: condensed workout context for an external language model
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stride_tracker::services::ZoneService;
//! use stride_tracker::storage::MemoryStore;
//! use stride_core::models::ZoneSettings;
//!
//! # async fn example() -> stride_core::errors::AppResult<()> {
//! let store = MemoryStore::new();
//! let zones = ZoneService::new(Arc::new(store.clone()), ZoneSettings::default());
//! let configured = zones.zones().await?;
//! assert_eq!(configured.len(), 5);
//! # Ok(())
//! # }
//! ```

/// Coach commentary context
pub mod coach;
/// Environment configuration
pub mod config;
/// Structured logging setup
pub mod logging;
/// Service layer
pub mod services;
/// Storage ports and adapters
pub mod storage;

pub use stride_core::errors;
pub use stride_core::models;
