// ABOUTME: Zone service: configure, reset, and load heart rate zone settings through a storage port
// ABOUTME: Falls back to default settings with a warning when nothing has been configured
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::sync::Arc;

use stride_core::errors::AppResult;
use stride_core::models::{Activity, HeartRateZone, ZoneAnalysis, ZoneSettings};
use stride_intelligence::{calculate_zones, ZoneClassifier};
use tracing::{info, warn};

use crate::storage::ZoneSettingsStore;

/// Loads zone settings and runs the classifier with them
pub struct ZoneService {
    store: Arc<dyn ZoneSettingsStore>,
    fallback: ZoneSettings,
}

impl ZoneService {
    /// Service using `fallback` until settings are configured
    pub fn new(store: Arc<dyn ZoneSettingsStore>, fallback: ZoneSettings) -> Self {
        Self { store, fallback }
    }

    /// Validate and persist new settings
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for inconsistent settings, or storage errors
    pub async fn configure(&self, settings: ZoneSettings) -> AppResult<Vec<HeartRateZone>> {
        let zones = calculate_zones(&settings)?;
        self.store.save_zone_settings(&settings).await?;
        info!(
            method = %settings.method,
            max_heart_rate = settings.max_heart_rate,
            "configured heart rate zones"
        );
        Ok(zones)
    }

    /// Forget the configured settings
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn reset(&self) -> AppResult<()> {
        self.store.clear_zone_settings().await?;
        info!("reset heart rate zone settings");
        Ok(())
    }

    /// Configured settings, or the fallback
    ///
    /// # Errors
    ///
    /// Returns storage errors, or `InvalidInput` if stored settings are inconsistent
    pub async fn settings(&self) -> AppResult<ZoneSettings> {
        if let Some(settings) = self.store.load_zone_settings().await? {
            settings.validate()?;
            return Ok(settings);
        }
        warn!(
            max_heart_rate = self.fallback.max_heart_rate,
            "no zone settings configured, using defaults"
        );
        Ok(self.fallback.clone())
    }

    /// Zones for the current settings
    ///
    /// # Errors
    ///
    /// Same as [`Self::settings`]
    pub async fn zones(&self) -> AppResult<Vec<HeartRateZone>> {
        calculate_zones(&self.settings().await?)
    }

    /// Classify one activity with the current settings
    ///
    /// # Errors
    ///
    /// Same as [`Self::settings`]
    pub async fn analyze(&self, activity: &Activity) -> AppResult<ZoneAnalysis> {
        let settings = self.settings().await?;
        ZoneClassifier::analyze(&settings, activity)
    }
}
