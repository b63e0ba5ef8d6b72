//! Upstream data providers.
//!
//! The year progress core only runs once these single-shot lookups have
//! completed: sync state, user settings, activity history and presets.

pub mod local;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::activities::Activity;
use crate::error::YearProgressResult;
use crate::preferences::YearProgressPreset;
use crate::storage::config::Units;

// Re-export main types
pub use local::LocalHistory;

/// Synchronization status of the activity history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    /// Never synced
    NotSynced,
    /// A sync started but did not complete
    PartiallySynced,
    /// Fully synced
    Synced,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::NotSynced => write!(f, "NotSynced"),
            SyncState::PartiallySynced => write!(f, "PartiallySynced"),
            SyncState::Synced => write!(f, "Synced"),
        }
    }
}

/// User settings relevant to year progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    /// Unit system
    pub units: Units,
}

impl UserSettings {
    /// Whether values are shown in metric units.
    pub fn is_metric(&self) -> bool {
        self.units == Units::Metric
    }
}

/// Provides the sync status of the activity history.
pub trait SyncStateProvider {
    /// Current sync state.
    fn sync_state(&self) -> impl Future<Output = YearProgressResult<SyncState>>;
}

/// Provides the user's settings.
pub trait SettingsProvider {
    /// Fetch user settings.
    fn user_settings(&self) -> impl Future<Output = YearProgressResult<UserSettings>>;
}

/// Provides the synced activity history.
pub trait ActivityProvider {
    /// Fetch all synced activities.
    fn activities(&self) -> impl Future<Output = YearProgressResult<Vec<Activity>>>;
}

/// Provides stored year progress presets.
pub trait PresetProvider {
    /// Fetch all presets.
    fn presets(&self) -> impl Future<Output = YearProgressResult<Vec<YearProgressPreset>>>;
}
