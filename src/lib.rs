//! Year Progress - cumulative activity progress per year
//!
//! Computes, from a synced activity history, how distance, time, elevation or
//! activity count accumulated over each year, overlays an optional linear
//! target for the current year, and keeps the viewer's display preferences.

pub mod activities;
pub mod controller;
pub mod error;
pub mod preferences;
pub mod progress;
pub mod services;
pub mod storage;

// Re-export commonly used types
pub use activities::Activity;
pub use controller::YearProgressController;
pub use error::{YearProgressError, YearProgressResult};
pub use preferences::{EffectivePreferences, PreferenceStore};
pub use progress::{TargetProgression, YearProgression};
pub use storage::config::AppConfig;
