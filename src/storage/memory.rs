// ABOUTME: In-memory storage adapter backed by tokio RwLock-guarded maps
// ABOUTME: Implements the activity, record, and zone settings ports for tests and the CLI
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::collections::HashMap;
use std::sync::Arc;

use stride_core::errors::AppResult;
use stride_core::models::{Activity, PersonalRecord, ZoneSettings};
use tokio::sync::RwLock;
use tracing::debug;

use super::{ActivityStore, RecordStore, ZoneSettingsStore};

/// In-memory store implementing every storage port
///
/// Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    activities: Arc<RwLock<HashMap<String, Activity>>>,
    records: Arc<RwLock<Vec<PersonalRecord>>>,
    zone_settings: Arc<RwLock<Option<ZoneSettings>>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored activities
    pub async fn activity_count(&self) -> usize {
        self.activities.read().await.len()
    }

    /// Number of stored records, history included
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait::async_trait]
impl ActivityStore for MemoryStore {
    async fn save_activity(&self, activity: Activity) -> AppResult<()> {
        self.activities
            .write()
            .await
            .insert(activity.id().to_owned(), activity);
        Ok(())
    }

    async fn get_activity(&self, id: &str) -> AppResult<Option<Activity>> {
        Ok(self.activities.read().await.get(id).cloned())
    }

    async fn list_activities(&self) -> AppResult<Vec<Activity>> {
        let mut activities: Vec<Activity> = self.activities.read().await.values().cloned().collect();
        activities.sort_by(|a, b| {
            a.start_time()
                .cmp(&b.start_time())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(activities)
    }

    async fn delete_activity(&self, id: &str) -> AppResult<bool> {
        Ok(self.activities.write().await.remove(id).is_some())
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn append_records(&self, records: &[PersonalRecord]) -> AppResult<()> {
        let mut store = self.records.write().await;
        store.extend(records.iter().cloned().map(|mut record| {
            record.is_new = false;
            record
        }));
        debug!(appended = records.len(), total = store.len(), "appended personal records");
        Ok(())
    }

    async fn list_records(&self) -> AppResult<Vec<PersonalRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn delete_records_for_activity(&self, activity_id: &str) -> AppResult<usize> {
        let mut store = self.records.write().await;
        let before = store.len();
        store.retain(|record| record.activity_id != activity_id);
        Ok(before - store.len())
    }

    async fn clear_records(&self) -> AppResult<()> {
        self.records.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl ZoneSettingsStore for MemoryStore {
    async fn load_zone_settings(&self) -> AppResult<Option<ZoneSettings>> {
        Ok(self.zone_settings.read().await.clone())
    }

    async fn save_zone_settings(&self, settings: &ZoneSettings) -> AppResult<()> {
        *self.zone_settings.write().await = Some(settings.clone());
        Ok(())
    }

    async fn clear_zone_settings(&self) -> AppResult<()> {
        *self.zone_settings.write().await = None;
        Ok(())
    }
}
