// ABOUTME: Service layer orchestrating storage ports and the analytical core
// ABOUTME: Activity import/deletion, record detection, zone configuration, and period analytics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! # Services
//!
//! Each service owns `Arc`s to the storage ports it needs. Services translate
//! missing data into [`stride_core::errors::AppError`]s; the analytical core
//! they call never fails on well-formed input.

/// Activity import, lookup, and deletion
pub mod activities;
/// Period statistics, comparisons, and evolution series
pub mod analytics;
/// Personal record detection and queries
pub mod records;
/// Heart rate zone configuration and analysis
pub mod zones;

pub use activities::{ActivityService, ImportOutcome};
pub use analytics::AnalyticsService;
pub use records::RecordService;
pub use zones::ZoneService;

use std::sync::Arc;

use stride_core::errors::AppResult;
use stride_core::models::ZoneSettings;

use crate::config::StrideConfig;
use crate::storage::{ActivityStore, JsonFileZoneSettingsStore, MemoryStore, RecordStore};

/// All services wired to one set of stores
pub struct ServiceContainer {
    /// Activity service
    pub activities: ActivityService,
    /// Record service, shared with the activity service
    pub records: Arc<RecordService>,
    /// Zone service
    pub zones: ZoneService,
    /// Analytics service
    pub analytics: AnalyticsService,
}

impl ServiceContainer {
    /// Wire services over an in-memory activity/record store and file-backed zone settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default age is out of range
    pub fn from_config(config: &StrideConfig, store: MemoryStore) -> AppResult<Self> {
        let zone_store = Arc::new(JsonFileZoneSettingsStore::new(config.zone_settings_path()));
        let fallback = ZoneSettings::from_age(config.default_age)?;
        let activity_store: Arc<dyn ActivityStore> = Arc::new(store.clone());
        let record_store: Arc<dyn RecordStore> = Arc::new(store);
        let records = Arc::new(RecordService::new(record_store));

        Ok(Self {
            activities: ActivityService::new(Arc::clone(&activity_store), Arc::clone(&records)),
            records,
            zones: ZoneService::new(zone_store, fallback),
            analytics: AnalyticsService::new(activity_store, config.trend_aggregator()),
        })
    }
}
