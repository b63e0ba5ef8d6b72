//! Local file-backed providers.
//!
//! Activities are read from a JSON export produced by a previous sync. The
//! history counts as synced once that export exists.

use std::path::{Path, PathBuf};

use crate::activities::Activity;
use crate::error::{YearProgressError, YearProgressResult};

use super::{ActivityProvider, SettingsProvider, SyncState, SyncStateProvider, UserSettings};

/// Activity history stored in a local JSON file.
#[derive(Debug, Clone)]
pub struct LocalHistory {
    activities_path: PathBuf,
    settings: UserSettings,
}

impl LocalHistory {
    /// Create a provider reading the given export.
    pub fn new(activities_path: impl Into<PathBuf>, settings: UserSettings) -> Self {
        Self {
            activities_path: activities_path.into(),
            settings,
        }
    }

    /// Path of the activity export.
    pub fn activities_path(&self) -> &Path {
        &self.activities_path
    }
}

impl SyncStateProvider for LocalHistory {
    async fn sync_state(&self) -> YearProgressResult<SyncState> {
        if self.activities_path.is_file() {
            Ok(SyncState::Synced)
        } else {
            tracing::debug!("No activity export at {}", self.activities_path.display());
            Ok(SyncState::NotSynced)
        }
    }
}

impl SettingsProvider for LocalHistory {
    async fn user_settings(&self) -> YearProgressResult<UserSettings> {
        Ok(self.settings)
    }
}

impl ActivityProvider for LocalHistory {
    async fn activities(&self) -> YearProgressResult<Vec<Activity>> {
        let content = std::fs::read_to_string(&self.activities_path).map_err(|e| {
            YearProgressError::Provider(format!(
                "Failed to read {}: {}",
                self.activities_path.display(),
                e
            ))
        })?;

        let activities: Vec<Activity> = serde_json::from_str(&content).map_err(|e| {
            YearProgressError::Provider(format!(
                "Failed to parse {}: {}",
                self.activities_path.display(),
                e
            ))
        })?;

        tracing::info!("Loaded {} activities", activities.len());
        Ok(activities)
    }
}
