//! Integration tests for the year progress controller.
//!
//! Runs the controller against the file-backed activity provider and the
//! SQLite preference store.

use chrono::NaiveDate;
use year_progress::controller::MomentWatcher;
use year_progress::preferences::{PreferenceField, PreferenceLifecycle, PreferenceStore, YearProgressPreset};
use year_progress::progress::{ProgressType, PALETTE};
use year_progress::services::{
    ActivityProvider, LocalHistory, PresetProvider, SettingsProvider, SyncState, SyncStateProvider,
    UserSettings,
};
use year_progress::storage::{Database, Units};
use year_progress::{Activity, YearProgressController, YearProgressError, YearProgressResult};

const EXPORT: &str = r#"[
    {"type":"Ride","start_time":"2023-03-01T08:00:00","distance_m":10000.0},
    {"type":"Ride","start_time":"2023-03-02T08:00:00","distance_m":5000.0},
    {"type":"Ride","start_time":"2023-03-02T18:00:00","distance_m":20000.0,"commute":true},
    {"type":"Ride","start_time":"2024-01-15T08:00:00","distance_m":30000.0,"trainer":true},
    {"type":"Run","start_time":"2024-02-01T07:00:00","distance_m":8000.0,"moving_time_s":2400.0}
]"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn palette() -> Vec<String> {
    PALETTE.iter().map(|c| c.to_string()).collect()
}

fn write_export(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("activities.json");
    std::fs::write(&path, EXPORT).unwrap();
    path
}

/// Provider pretending a sync is still running.
struct PartialSync;

impl SyncStateProvider for PartialSync {
    async fn sync_state(&self) -> YearProgressResult<SyncState> {
        Ok(SyncState::PartiallySynced)
    }
}

/// Activity provider that always fails.
struct BrokenActivities;

impl ActivityProvider for BrokenActivities {
    async fn activities(&self) -> YearProgressResult<Vec<Activity>> {
        Err(YearProgressError::Provider("connection reset".to_string()))
    }
}

/// Preset provider that always fails.
struct BrokenPresets;

impl PresetProvider for BrokenPresets {
    async fn presets(&self) -> YearProgressResult<Vec<YearProgressPreset>> {
        Err(YearProgressError::Storage("database is locked".to_string()))
    }
}

#[tokio::test]
async fn test_initialize_from_local_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());
    let presets = Database::open_in_memory().unwrap();
    presets
        .insert_preset(&YearProgressPreset::new("Runs", ProgressType::Time, vec!["Run".to_string()]))
        .unwrap();

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe())
            .with_today(today());

    controller
        .initialize(&history, &history, &history, &presets)
        .await
        .unwrap();

    assert_eq!(controller.has_activities(), Some(true));
    assert_eq!(controller.presets_count(), Some(1));
    assert_eq!(controller.available_years(), &[2023, 2024]);

    let progressions = controller.year_progressions();
    assert_eq!(progressions.len(), 2);
    assert_eq!(progressions[0].progressions.len(), 2);
    assert_eq!(progressions[0].total(), 35.0);
    assert_eq!(progressions[1].total(), 30.0);
}

#[tokio::test]
async fn test_not_synced_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());
    let presets = Database::open_in_memory().unwrap();

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe());

    let err = controller
        .initialize(&PartialSync, &history, &history, &presets)
        .await
        .unwrap_err();

    assert!(matches!(err, YearProgressError::NotSynchronized(SyncState::PartiallySynced)));
    assert_eq!(controller.has_activities(), Some(false));
    assert!(!controller.is_initialized());
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());
    let presets = Database::open_in_memory().unwrap();

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe());

    let err = controller
        .initialize(&history, &history, &BrokenActivities, &presets)
        .await
        .unwrap_err();

    assert!(matches!(err, YearProgressError::Provider(_)));
}

#[tokio::test]
async fn test_preset_count_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe())
            .with_today(today());

    controller
        .initialize(&history, &history, &history, &BrokenPresets)
        .await
        .unwrap();

    assert!(controller.is_initialized());
    assert_eq!(controller.presets_count(), None);
    assert_eq!(controller.year_progressions().len(), 2);

    // A later failure keeps the last known count
    let presets = Database::open_in_memory().unwrap();
    controller.refresh_presets_count(&presets).await;
    assert_eq!(controller.presets_count(), Some(0));
    controller.on_preset_created(None, &BrokenPresets).await.unwrap();
    assert_eq!(controller.presets_count(), Some(0));
}

#[tokio::test]
async fn test_preferences_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("year_progress.db");
    let history = LocalHistory::new(write_export(&dir), UserSettings { units: Units::Imperial });
    let presets = Database::open_in_memory().unwrap();

    {
        let moment = MomentWatcher::new(today());
        let mut controller =
            YearProgressController::new(Database::open(&db_path).unwrap(), palette(), moment.subscribe())
                .with_today(today());
        controller.initialize(&history, &history, &history, &presets).await.unwrap();

        controller.on_include_commute_ride_toggle(false).unwrap();
        controller.on_selected_years_change(vec![2023]).unwrap();
        controller.on_selected_progress_type_change(ProgressType::Elevation).unwrap();
    }

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open(&db_path).unwrap(), palette(), moment.subscribe())
            .with_today(today());
    controller.initialize(&history, &history, &history, &presets).await.unwrap();

    let prefs = controller.preferences().unwrap();
    assert!(!prefs.include_commute_ride);
    assert_eq!(prefs.selected_years, vec![2023]);
    assert_eq!(prefs.selected_progress_type.progress_type, ProgressType::Elevation);
    assert_eq!(prefs.selected_progress_type.unit, Some("ft"));
    assert_eq!(controller.lifecycle(), PreferenceLifecycle::Defaulted);
}

#[tokio::test]
async fn test_preset_selection_flow() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());
    let presets = Database::open_in_memory().unwrap();

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe())
            .with_today(today());
    controller.initialize(&history, &history, &history, &presets).await.unwrap();

    // Preset identical to current preferences: nothing persisted
    let draft = controller.new_preset_draft().unwrap().into_preset("Same");
    controller.on_preset_selected(Some(&draft), &presets).await.unwrap();
    assert_eq!(controller.lifecycle(), PreferenceLifecycle::Defaulted);
    assert!(controller.store().get(PreferenceField::TargetValue.key()).unwrap().is_none());
    assert!(controller.store().get(PreferenceField::SelectedActivityTypes.key()).unwrap().is_none());

    // Preset adding a target only
    let with_target = draft.clone().with_target(1000.0);
    controller.on_preset_selected(Some(&with_target), &presets).await.unwrap();
    assert_eq!(controller.lifecycle(), PreferenceLifecycle::PresetApplied);
    assert_eq!(
        controller.store().get(PreferenceField::TargetValue.key()).unwrap(),
        Some("1000".to_string())
    );
    assert!(controller.store().get(PreferenceField::SelectedActivityTypes.key()).unwrap().is_none());

    let target = controller.target_progression().unwrap();
    assert_eq!(target.year, 2024);
    assert_eq!(target.progressions.len(), 366);

    // Preset removing the target goes back to defaults
    controller.on_preset_selected(Some(&draft), &presets).await.unwrap();
    assert_eq!(controller.lifecycle(), PreferenceLifecycle::Defaulted);
    assert!(controller.store().get(PreferenceField::TargetValue.key()).unwrap().is_none());
    assert!(controller.target_progression().is_none());
}

#[tokio::test]
async fn test_preset_created_sets_target() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings::default());
    let presets = Database::open_in_memory().unwrap();

    let moment = MomentWatcher::new(today());
    let mut controller =
        YearProgressController::new(Database::open_in_memory().unwrap(), palette(), moment.subscribe())
            .with_today(today());
    controller.initialize(&history, &history, &history, &presets).await.unwrap();
    assert_eq!(controller.presets_count(), Some(0));

    let created = controller
        .new_preset_draft()
        .unwrap()
        .into_preset("Ride goal")
        .with_target(2500.0);
    presets.insert_preset(&created).unwrap();

    controller.on_preset_created(Some(&created), &presets).await.unwrap();

    assert_eq!(controller.presets_count(), Some(1));
    assert_eq!(controller.target_progression().unwrap().target_value, 2500.0);
    assert_eq!(presets.presets().await.unwrap(), vec![created]);

    // Dialog dismissed: only the count is refreshed
    controller.on_preset_created(None, &presets).await.unwrap();
    assert_eq!(controller.target_progression().unwrap().target_value, 2500.0);
}

#[tokio::test]
async fn test_settings_provider_units() {
    let dir = tempfile::tempdir().unwrap();
    let history = LocalHistory::new(write_export(&dir), UserSettings { units: Units::Imperial });

    let settings = history.user_settings().await.unwrap();

    assert!(!settings.is_metric());
}
