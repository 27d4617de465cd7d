// ABOUTME: Storage ports for activities, personal records, and zone settings
// ABOUTME: Services depend on these traits; adapters live in submodules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! # Storage
//!
//! The analytical core never touches storage. Services load collections
//! through these ports, hand them to the pure functions, and write back
//! whatever comes out.
//!
//! Personal records are append-only: [`RecordStore`] has no update method.

/// JSON file adapter for zone settings
pub mod json_file;
/// In-memory adapter for all three ports
pub mod memory;

pub use json_file::JsonFileZoneSettingsStore;
pub use memory::MemoryStore;

use stride_core::errors::AppResult;
use stride_core::models::{Activity, PersonalRecord, ZoneSettings};

/// Keyed activity storage
#[async_trait::async_trait]
pub trait ActivityStore: Send + Sync {
    /// Insert or replace an activity by id
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn save_activity(&self, activity: Activity) -> AppResult<()>;

    /// Fetch one activity
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn get_activity(&self, id: &str) -> AppResult<Option<Activity>>;

    /// All activities, oldest start time first
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn list_activities(&self) -> AppResult<Vec<Activity>>;

    /// Remove an activity; `false` when it did not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn delete_activity(&self, id: &str) -> AppResult<bool>;
}

/// Append-only personal record storage
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Append new record entities
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn append_records(&self, records: &[PersonalRecord]) -> AppResult<()>;

    /// Full record history in insertion order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails
    async fn list_records(&self) -> AppResult<Vec<PersonalRecord>>;

    /// Remove every record set by `activity_id`, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn delete_records_for_activity(&self, activity_id: &str) -> AppResult<usize>;

    /// Remove all records
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn clear_records(&self) -> AppResult<()>;
}

/// Single-slot zone settings storage
#[async_trait::async_trait]
pub trait ZoneSettingsStore: Send + Sync {
    /// Stored settings, `None` if never configured
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the stored value is corrupt
    async fn load_zone_settings(&self) -> AppResult<Option<ZoneSettings>>;

    /// Replace the stored settings
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn save_zone_settings(&self, settings: &ZoneSettings) -> AppResult<()>;

    /// Forget the stored settings
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails
    async fn clear_zone_settings(&self) -> AppResult<()>;
}
