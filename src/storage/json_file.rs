// ABOUTME: JSON file adapter persisting zone settings under the data directory
// ABOUTME: Missing file means "never configured"; writes create parent directories
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use stride_core::errors::{AppError, AppResult};
use stride_core::models::ZoneSettings;
use tokio::fs;
use tracing::info;

use super::ZoneSettingsStore;

/// Zone settings stored as pretty-printed JSON in one file
#[derive(Debug, Clone)]
pub struct JsonFileZoneSettingsStore {
    path: PathBuf,
}

impl JsonFileZoneSettingsStore {
    /// Store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, error: impl Error + Send + Sync + 'static) -> AppError {
        let path = self.path.display().to_string();
        AppError::storage(format!("cannot {action} zone settings file {path}: {error}"))
            .with_resource_id(path)
            .with_source(error)
    }
}

#[async_trait::async_trait]
impl ZoneSettingsStore for JsonFileZoneSettingsStore {
    async fn load_zone_settings(&self) -> AppResult<Option<ZoneSettings>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.storage_error("read", error)),
        };
        let settings: ZoneSettings =
            serde_json::from_slice(&bytes).map_err(|error| self.storage_error("parse", error))?;
        Ok(Some(settings))
    }

    async fn save_zone_settings(&self, settings: &ZoneSettings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|error| self.storage_error("create directory for", error))?;
        }
        let json = serde_json::to_vec_pretty(settings)?;
        fs::write(&self.path, json)
            .await
            .map_err(|error| self.storage_error("write", error))?;
        info!(path = %self.path.display(), method = %settings.method, "saved zone settings");
        Ok(())
    }

    async fn clear_zone_settings(&self) -> AppResult<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.storage_error("remove", error)),
        }
    }
}
