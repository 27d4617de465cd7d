// ABOUTME: Activity service: import, lookup, notes editing, deletion with record cascade, statistics
// ABOUTME: Turns missing activities into ResourceNotFound errors for callers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::sync::Arc;

use serde::Serialize;
use stride_core::errors::{AppError, AppResult, ErrorCode};
use stride_core::models::{Activity, PersonalRecord, Statistics};
use stride_intelligence::calculate_statistics;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::records::RecordService;
use crate::storage::ActivityStore;

/// What an import produced
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Stored activity id
    pub activity_id: String,
    /// Statistics of the imported activity
    pub statistics: Statistics,
    /// Records the activity set
    pub new_records: Vec<PersonalRecord>,
}

/// Orchestrates activity persistence and the record cascade
pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    records: Arc<RecordService>,
    import_lock: Mutex<()>,
}

impl ActivityService {
    /// Service over an activity store and the record service it cascades to
    pub fn new(store: Arc<dyn ActivityStore>, records: Arc<RecordService>) -> Self {
        Self {
            store,
            records,
            import_lock: Mutex::new(()),
        }
    }

    fn not_found(id: &str) -> AppError {
        AppError::not_found(format!("Activity {id}")).with_resource_id(id)
    }

    /// Store a normalized activity and detect the records it sets.
    ///
    /// Business rules:
    /// - Ids are unique; importing an existing id fails
    /// - Imports are serialized end to end
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` for a duplicate id, or storage errors
    pub async fn import(&self, activity: Activity) -> AppResult<ImportOutcome> {
        let _guard = self.import_lock.lock().await;
        if self.store.get_activity(activity.id()).await?.is_some() {
            return Err(AppError::new(
                ErrorCode::ResourceAlreadyExists,
                format!("Activity {} already imported", activity.id()),
            )
            .with_resource_id(activity.id()));
        }

        let statistics = calculate_statistics(&activity);
        self.store.save_activity(activity.clone()).await?;
        let new_records = self.records.detect_and_save(&activity).await?;

        info!(
            activity_id = %activity.id(),
            sport = %activity.sport(),
            distance_m = activity.distance_meters(),
            new_records = new_records.len(),
            "imported activity"
        );
        Ok(ImportOutcome {
            activity_id: activity.id().to_owned(),
            statistics,
            new_records,
        })
    }

    /// One activity
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn get(&self, id: &str) -> AppResult<Activity> {
        self.store.get_activity(id).await?.ok_or_else(|| {
            warn!(activity_id = id, "activity not found");
            Self::not_found(id)
        })
    }

    /// All activities, oldest first
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn list(&self) -> AppResult<Vec<Activity>> {
        self.store.list_activities().await
    }

    /// Replace the notes of an activity; blank notes clear them
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or storage errors
    pub async fn update_notes(&self, id: &str, notes: Option<String>) -> AppResult<Activity> {
        let mut activity = self.get(id).await?;
        activity.set_notes(notes);
        self.store.save_activity(activity.clone()).await?;
        info!(activity_id = id, "updated activity notes");
        Ok(activity)
    }

    /// Delete an activity and every record it set
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or storage errors
    pub async fn delete(&self, id: &str) -> AppResult<usize> {
        let _guard = self.import_lock.lock().await;
        if !self.store.delete_activity(id).await? {
            return Err(Self::not_found(id));
        }
        let removed = self.records.delete_for_activity(id).await?;
        info!(activity_id = id, removed_records = removed, "deleted activity");
        Ok(removed)
    }

    /// Statistics of a stored activity
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub async fn statistics(&self, id: &str) -> AppResult<Statistics> {
        let activity = self.get(id).await?;
        Ok(calculate_statistics(&activity))
    }
}
