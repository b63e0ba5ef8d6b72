//! Year progress presentation controller.
//!
//! Ties the aggregation, preference resolution and progression engines
//! together and exposes the handlers a year progress view calls.

pub mod dialogs;
pub mod moment;

use chrono::{Datelike, NaiveDate};
use tokio::sync::watch;

use crate::activities::{available_years, group_by_type, Activity, ActivityCountByType};
use crate::error::{YearProgressError, YearProgressResult};
use crate::preferences::{
    apply_preset, clear, load_persisted, persist, persist_changes, resolve, resolve_defaults,
    EffectivePreferences, PreferenceField, PreferenceLifecycle, PreferenceStore, PreferenceValue,
    YearProgressPreset,
};
use crate::progress::{
    assign_colors, compute_target_progression, compute_year_progressions, find_progress_type,
    provide_progress_types, ProgressType, ProgressionFilter, TargetProgression, YearProgressStyle,
    YearProgressType, YearProgression,
};
use crate::services::{ActivityProvider, PresetProvider, SettingsProvider, SyncState, SyncStateProvider};

pub use dialogs::{NewPresetDraft, YearProgressOverview};
pub use moment::MomentWatcher;

/// Year progress view state.
pub struct YearProgressController<S: PreferenceStore> {
    store: S,
    palette: Vec<String>,
    today: NaiveDate,
    moment: watch::Receiver<NaiveDate>,
    is_metric: bool,
    activities: Vec<Activity>,
    has_activities: Option<bool>,
    progress_types: Vec<YearProgressType>,
    activity_counts: Vec<ActivityCountByType>,
    available_years: Vec<i32>,
    preferences: Option<EffectivePreferences>,
    year_progressions: Vec<YearProgression>,
    target_progression: Option<TargetProgression>,
    style: YearProgressStyle,
    presets_count: Option<usize>,
    lifecycle: PreferenceLifecycle,
}

impl<S: PreferenceStore> YearProgressController<S> {
    /// Create a controller reading the watched moment from `moment`.
    pub fn new(store: S, palette: Vec<String>, moment: watch::Receiver<NaiveDate>) -> Self {
        Self {
            store,
            palette,
            today: chrono::Local::now().date_naive(),
            moment,
            is_metric: true,
            activities: Vec::new(),
            has_activities: None,
            progress_types: provide_progress_types(true),
            activity_counts: Vec::new(),
            available_years: Vec::new(),
            preferences: None,
            year_progressions: Vec::new(),
            target_progression: None,
            style: YearProgressStyle::default(),
            presets_count: None,
            lifecycle: PreferenceLifecycle::Uninitialized,
        }
    }

    /// Override the current date used for the target year.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fetch everything needed and run the initial setup.
    ///
    /// Fails with [`YearProgressError::NotSynchronized`] unless the history is
    /// fully synced. Nothing is retried.
    pub async fn initialize<Sy, St, A, P>(
        &mut self,
        sync: &Sy,
        settings: &St,
        activities: &A,
        presets: &P,
    ) -> YearProgressResult<()>
    where
        Sy: SyncStateProvider,
        St: SettingsProvider,
        A: ActivityProvider,
        P: PresetProvider,
    {
        let sync_state = sync.sync_state().await?;
        if sync_state != SyncState::Synced {
            self.has_activities = Some(false);
            let err = YearProgressError::NotSynchronized(sync_state);
            tracing::error!("{}", err);
            return Err(err);
        }

        let (user_settings, history) =
            futures::try_join!(settings.user_settings(), activities.activities())?;

        self.load(user_settings.is_metric(), history)?;
        self.refresh_presets_count(presets).await;

        Ok(())
    }

    /// Replace the activity history and set up when it is not empty.
    pub fn load(&mut self, is_metric: bool, activities: Vec<Activity>) -> YearProgressResult<()> {
        self.is_metric = is_metric;
        self.has_activities = Some(!activities.is_empty());
        self.activities = activities;

        if self.activities.is_empty() {
            tracing::info!("No activities, nothing to set up");
            return Ok(());
        }

        self.setup()
    }

    /// Resolve preferences and compute all progressions from scratch.
    pub fn setup(&mut self) -> YearProgressResult<()> {
        self.progress_types = provide_progress_types(self.is_metric);
        self.activity_counts = group_by_type(&self.activities);
        self.available_years = available_years(&self.activities);

        let defaults = resolve_defaults(&self.activity_counts, &self.available_years, &self.progress_types);
        let persisted = load_persisted(&self.store, &self.progress_types);

        let preferences = resolve(persisted, defaults, &self.progress_types).ok_or_else(|| {
            YearProgressError::InvalidInput("No activities to resolve preferences from".to_string())
        })?;
        self.preferences = Some(preferences);

        self.compute_year_progressions()?;
        self.compute_target_progression();

        self.lifecycle = PreferenceLifecycle::Defaulted;
        tracing::info!("Setup done");

        Ok(())
    }

    /// Re-fetch the number of stored presets.
    ///
    /// A failed fetch is logged and leaves the previous count in place.
    pub async fn refresh_presets_count<P: PresetProvider>(&mut self, presets: &P) {
        match presets.presets().await {
            Ok(stored) => self.presets_count = Some(stored.len()),
            Err(e) => tracing::warn!("Failed to count presets: {}", e),
        }
    }

    fn compute_year_progressions(&mut self) -> YearProgressResult<()> {
        let Some(preferences) = &self.preferences else {
            return Ok(());
        };

        // Every year is computed and colored; the year selection only filters what is shown
        let filter = ProgressionFilter {
            activity_types: &preferences.selected_activity_types,
            years: None,
            include_commute_ride: preferences.include_commute_ride,
            include_indoor_ride: preferences.include_indoor_ride,
        };

        self.year_progressions = compute_year_progressions(
            &self.activities,
            &filter,
            self.is_metric,
            &preferences.selected_progress_type,
        )?;

        let years: Vec<i32> = self.year_progressions.iter().map(|p| p.year).collect();
        self.style = assign_colors(&years, &self.palette);

        Ok(())
    }

    fn compute_target_progression(&mut self) {
        self.target_progression = self
            .preferences
            .as_ref()
            .and_then(|p| p.target_value)
            .and_then(|target| compute_target_progression(self.today.year(), target));
    }

    fn preferences_mut(&mut self) -> YearProgressResult<&mut EffectivePreferences> {
        self.preferences
            .as_mut()
            .ok_or_else(|| YearProgressError::InvalidInput("Year progress is not set up".to_string()))
    }

    // ========== View Handlers ==========

    /// Switch the accumulated metric. A stored target no longer applies and is dropped.
    pub fn on_selected_progress_type_change(&mut self, progress_type: ProgressType) -> YearProgressResult<()> {
        let entry = find_progress_type(&self.progress_types, progress_type)
            .ok_or_else(|| YearProgressError::InvalidInput(format!("Unknown progress type {}", progress_type)))?
            .clone();

        self.preferences_mut()?.selected_progress_type = entry;
        persist(PreferenceValue::SelectedProgressType(progress_type), &mut self.store)?;

        let persisted_target = load_persisted(&self.store, &self.progress_types).target_value;
        if persisted_target.is_some() {
            tracing::info!("Progress type changed, removing target");
            clear(PreferenceField::TargetValue, &mut self.store)?;
            self.setup()?;
        } else {
            self.compute_year_progressions()?;
        }

        self.lifecycle = PreferenceLifecycle::UserModified;
        Ok(())
    }

    /// Change the accumulated sport types. An empty selection falls back to the resolved one.
    pub fn on_selected_activity_types_change(&mut self, activity_types: Vec<String>) -> YearProgressResult<()> {
        if activity_types.is_empty() {
            tracing::warn!("Empty activity type selection, falling back");
            return self.setup();
        }

        persist(PreferenceValue::SelectedActivityTypes(&activity_types), &mut self.store)?;
        self.preferences_mut()?.selected_activity_types = activity_types;
        self.compute_year_progressions()?;

        self.lifecycle = PreferenceLifecycle::UserModified;
        Ok(())
    }

    /// Change the displayed years. An empty selection falls back to the resolved one.
    pub fn on_selected_years_change(&mut self, years: Vec<i32>) -> YearProgressResult<()> {
        if years.is_empty() {
            tracing::warn!("Empty year selection, falling back");
            return self.setup();
        }

        persist(PreferenceValue::SelectedYears(&years), &mut self.store)?;
        self.preferences_mut()?.selected_years = years;
        self.compute_year_progressions()?;

        self.lifecycle = PreferenceLifecycle::UserModified;
        Ok(())
    }

    /// Include or exclude commute rides.
    pub fn on_include_commute_ride_toggle(&mut self, include: bool) -> YearProgressResult<()> {
        self.preferences_mut()?.include_commute_ride = include;
        self.compute_year_progressions()?;
        persist(PreferenceValue::IncludeCommuteRide(include), &mut self.store)?;

        self.lifecycle = PreferenceLifecycle::UserModified;
        Ok(())
    }

    /// Include or exclude indoor rides.
    pub fn on_include_indoor_ride_toggle(&mut self, include: bool) -> YearProgressResult<()> {
        self.preferences_mut()?.include_indoor_ride = include;
        self.compute_year_progressions()?;
        persist(PreferenceValue::IncludeIndoorRide(include), &mut self.store)?;

        self.lifecycle = PreferenceLifecycle::UserModified;
        Ok(())
    }

    /// Called once the "new preset" dialog closes.
    ///
    /// A created preset carries its target over to the current view.
    pub async fn on_preset_created<P: PresetProvider>(
        &mut self,
        created: Option<&YearProgressPreset>,
        presets: &P,
    ) -> YearProgressResult<()> {
        self.refresh_presets_count(presets).await;

        if let Some(preset) = created {
            match preset.target_value {
                Some(target) if target.is_finite() => {
                    persist(PreferenceValue::TargetValue(target), &mut self.store)?
                }
                _ => clear(PreferenceField::TargetValue, &mut self.store)?,
            }
            self.setup()?;
        }

        Ok(())
    }

    /// Called once a preset is picked from the preset manager.
    ///
    /// Only fields the preset changes are persisted; nothing is recomputed when
    /// the preset matches the current preferences.
    pub async fn on_preset_selected<P: PresetProvider>(
        &mut self,
        selected: Option<&YearProgressPreset>,
        presets: &P,
    ) -> YearProgressResult<()> {
        if let Some(preset) = selected {
            let current = self
                .preferences
                .as_ref()
                .ok_or_else(|| YearProgressError::InvalidInput("Year progress is not set up".to_string()))?;

            let application = apply_preset(preset, current, &self.progress_types)?;
            persist_changes(&application, &mut self.store)?;

            if application.has_changes() {
                tracing::info!("Applying preset '{}' ({} changes)", preset.name, application.changed.len());
                self.setup()?;
                self.lifecycle = if application.removes_target() {
                    PreferenceLifecycle::Defaulted
                } else {
                    PreferenceLifecycle::PresetApplied
                };
            }
        }

        self.refresh_presets_count(presets).await;
        Ok(())
    }

    // ========== Dialog Payloads ==========

    /// Payload for the year overview dialog.
    pub fn overview(&self) -> Option<YearProgressOverview> {
        let preferences = self.preferences.as_ref()?;

        Some(YearProgressOverview {
            moment_watched: self.moment_watched(),
            selected_years: preferences.selected_years.clone(),
            selected_activity_types: preferences.selected_activity_types.clone(),
            progress_types: self.progress_types.clone(),
            year_progressions: self.displayed_year_progressions().cloned().collect(),
            style: self.style.clone(),
        })
    }

    /// Payload prefilling the "new preset" dialog.
    pub fn new_preset_draft(&self) -> Option<NewPresetDraft> {
        let preferences = self.preferences.as_ref()?;

        Some(NewPresetDraft {
            activity_types: preferences.selected_activity_types.clone(),
            progress_type: preferences.selected_progress_type.progress_type,
            include_commute_ride: preferences.include_commute_ride,
            include_indoor_ride: preferences.include_indoor_ride,
            target_value: preferences.target_value,
        })
    }

    // ========== Accessors ==========

    /// Day currently watched on the chart.
    pub fn moment_watched(&self) -> NaiveDate {
        *self.moment.borrow()
    }

    /// Resolved preferences, once set up.
    pub fn preferences(&self) -> Option<&EffectivePreferences> {
        self.preferences.as_ref()
    }

    /// Progressions of every year in the history.
    pub fn year_progressions(&self) -> &[YearProgression] {
        &self.year_progressions
    }

    /// Progressions of the selected years only.
    pub fn displayed_year_progressions(&self) -> impl Iterator<Item = &YearProgression> + '_ {
        let selected = self.preferences.as_ref().map(|p| p.selected_years.as_slice()).unwrap_or(&[]);
        self.year_progressions
            .iter()
            .filter(move |p| selected.contains(&p.year))
    }

    /// Target trajectory for the current year.
    pub fn target_progression(&self) -> Option<&TargetProgression> {
        self.target_progression.as_ref()
    }

    /// Year colors.
    pub fn style(&self) -> &YearProgressStyle {
        &self.style
    }

    /// Available metrics.
    pub fn progress_types(&self) -> &[YearProgressType] {
        &self.progress_types
    }

    /// Activity counts per sport type.
    pub fn activity_counts(&self) -> &[ActivityCountByType] {
        &self.activity_counts
    }

    /// Sport types present in the history, in first-seen order.
    pub fn available_activity_types(&self) -> Vec<String> {
        self.activity_counts.iter().map(|c| c.activity_type.clone()).collect()
    }

    /// Years present in the history.
    pub fn available_years(&self) -> &[i32] {
        &self.available_years
    }

    /// Whether the history has activities; `None` before loading.
    pub fn has_activities(&self) -> Option<bool> {
        self.has_activities
    }

    /// Number of stored presets; `None` before the first fetch.
    pub fn presets_count(&self) -> Option<usize> {
        self.presets_count
    }

    /// Whether progressions have been computed.
    pub fn is_initialized(&self) -> bool {
        self.lifecycle != PreferenceLifecycle::Uninitialized
    }

    /// Preference lifecycle state.
    pub fn lifecycle(&self) -> PreferenceLifecycle {
        self.lifecycle
    }

    /// Underlying preference store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
