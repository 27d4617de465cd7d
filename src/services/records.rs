// ABOUTME: Personal record service: detect-and-save against the append-only record history
// ABOUTME: Serializes detection so two imports never decide against a stale record set
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::sync::Arc;

use chrono::Utc;
use stride_core::errors::AppResult;
use stride_core::models::{Activity, PersonalRecord, RecordTriple};
use stride_intelligence::records::{current_records, history_for_triple, records_for_activity};
use stride_intelligence::detect_records;
use tokio::sync::Mutex;
use tracing::info;

use crate::storage::RecordStore;

/// Orchestrates record detection and persistence
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    detection_lock: Mutex<()>,
}

impl RecordService {
    /// Service over `store`
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            detection_lock: Mutex::new(()),
        }
    }

    /// Detect the records `activity` sets and append them to the history.
    ///
    /// Business rules:
    /// - The existing-records read and the append happen under one lock
    /// - Previous records for the same triple are kept as history
    /// - Returned records carry `is_new = true`; stored copies do not
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn detect_and_save(&self, activity: &Activity) -> AppResult<Vec<PersonalRecord>> {
        let _guard = self.detection_lock.lock().await;
        let existing = self.store.list_records().await?;
        let new_records = detect_records(activity, &existing, Utc::now());
        if !new_records.is_empty() {
            self.store.append_records(&new_records).await?;
        }
        info!(
            activity_id = %activity.id(),
            sport = %activity.sport(),
            new_records = new_records.len(),
            "personal record detection complete"
        );
        Ok(new_records)
    }

    /// Current record per triple, optionally for one sport
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn current_records(&self, sport: Option<&str>) -> AppResult<Vec<PersonalRecord>> {
        let records = self.store.list_records().await?;
        Ok(current_records(&records, sport).into_iter().cloned().collect())
    }

    /// Every record ever set for `triple`, oldest first
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn history(&self, triple: &RecordTriple) -> AppResult<Vec<PersonalRecord>> {
        let records = self.store.list_records().await?;
        Ok(history_for_triple(&records, triple).into_iter().cloned().collect())
    }

    /// Records set by one activity
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn for_activity(&self, activity_id: &str) -> AppResult<Vec<PersonalRecord>> {
        let records = self.store.list_records().await?;
        Ok(records_for_activity(&records, activity_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Remove records set by one activity
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn delete_for_activity(&self, activity_id: &str) -> AppResult<usize> {
        let _guard = self.detection_lock.lock().await;
        let removed = self.store.delete_records_for_activity(activity_id).await?;
        info!(activity_id, removed, "deleted personal records for activity");
        Ok(removed)
    }

    /// Remove every record
    ///
    /// # Errors
    ///
    /// Returns storage errors from the record store
    pub async fn clear(&self) -> AppResult<()> {
        let _guard = self.detection_lock.lock().await;
        self.store.clear_records().await?;
        info!("cleared all personal records");
        Ok(())
    }
}
