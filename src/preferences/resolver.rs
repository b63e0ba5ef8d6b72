//! Layered preference resolution.
//!
//! Precedence, highest first:
//! 1. An explicitly applied preset
//! 2. Values persisted in the preference store
//! 3. Defaults computed from the activity history

use crate::activities::{most_performed_type, ActivityCountByType};
use crate::error::{YearProgressError, YearProgressResult};
use crate::progress::{find_progress_type, ProgressType, YearProgressType};

use super::store::{read_json, write_json, PreferenceStore};
use super::types::{
    EffectivePreferences, PartialPreferences, PreferenceField, PreferenceValue, YearProgressPreset,
};

/// Defaults derived from the activity history, ignoring storage.
pub fn resolve_defaults(
    counts: &[ActivityCountByType],
    available_years: &[i32],
    progress_types: &[YearProgressType],
) -> PartialPreferences {
    PartialPreferences {
        selected_activity_types: most_performed_type(counts).map(|t| vec![t]),
        selected_years: Some(available_years.to_vec()),
        selected_progress_type: find_progress_type(progress_types, ProgressType::Distance)
            .map(|t| t.progress_type),
        include_commute_ride: Some(true),
        include_indoor_ride: Some(true),
        target_value: None,
    }
}

/// Read every persisted field independently.
///
/// Missing or malformed values leave the field absent; this never fails.
pub fn load_persisted<S>(store: &S, progress_types: &[YearProgressType]) -> PartialPreferences
where
    S: PreferenceStore + ?Sized,
{
    let selected_progress_type = read_json::<_, i64>(store, PreferenceField::SelectedProgressType.key())
        .and_then(|tag| match ProgressType::try_from(tag) {
            Ok(progress_type) => find_progress_type(progress_types, progress_type).map(|t| t.progress_type),
            Err(e) => {
                tracing::warn!("Ignoring persisted progress type: {}", e);
                None
            }
        });

    PartialPreferences {
        selected_activity_types: read_json::<_, Vec<String>>(store, PreferenceField::SelectedActivityTypes.key())
            .filter(|types| !types.is_empty()),
        selected_years: read_json::<_, Vec<i32>>(store, PreferenceField::SelectedYears.key())
            .filter(|years| !years.is_empty()),
        selected_progress_type,
        include_commute_ride: read_json(store, PreferenceField::IncludeCommuteRide.key()),
        include_indoor_ride: read_json(store, PreferenceField::IncludeIndoorRide.key()),
        // Targets are whole units; a fractional part is dropped on load
        target_value: read_json::<_, Option<f64>>(store, PreferenceField::TargetValue.key())
            .flatten()
            .map(f64::trunc),
    }
}

/// Merge persisted values over defaults.
///
/// Returns `None` when no activity type or progress type can be resolved,
/// which only happens for an empty activity history.
pub fn resolve(
    persisted: PartialPreferences,
    defaults: PartialPreferences,
    progress_types: &[YearProgressType],
) -> Option<EffectivePreferences> {
    let progress_type = persisted
        .selected_progress_type
        .or(defaults.selected_progress_type)?;

    Some(EffectivePreferences {
        selected_activity_types: persisted
            .selected_activity_types
            .or(defaults.selected_activity_types)?,
        selected_years: persisted
            .selected_years
            .or(defaults.selected_years)
            .unwrap_or_default(),
        selected_progress_type: find_progress_type(progress_types, progress_type)?.clone(),
        include_commute_ride: persisted
            .include_commute_ride
            .or(defaults.include_commute_ride)
            .unwrap_or(true),
        include_indoor_ride: persisted
            .include_indoor_ride
            .or(defaults.include_indoor_ride)
            .unwrap_or(true),
        target_value: persisted.target_value.or(defaults.target_value),
    })
}

/// Preferences produced by applying a preset, with the fields it changed.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetApplication {
    /// Preferences after the preset
    pub preferences: EffectivePreferences,
    /// Fields whose value differs from the previous preferences
    pub changed: Vec<PreferenceField>,
}

impl PresetApplication {
    /// Whether the preset changed anything.
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Whether the preset removed a previously set target.
    pub fn removes_target(&self) -> bool {
        self.changed.contains(&PreferenceField::TargetValue) && self.preferences.target_value.is_none()
    }
}

/// Overlay a preset on the current preferences.
///
/// Activity types are compared by their `;`-joined form, so the same types in
/// a different order count as a change. Selected years are not part of a preset.
pub fn apply_preset(
    preset: &YearProgressPreset,
    current: &EffectivePreferences,
    progress_types: &[YearProgressType],
) -> YearProgressResult<PresetApplication> {
    let progress_type = find_progress_type(progress_types, preset.progress_type)
        .ok_or_else(|| {
            YearProgressError::InvalidInput(format!(
                "Preset progress type {} is not available",
                preset.progress_type
            ))
        })?
        .clone();

    let mut changed = Vec::new();

    if preset.progress_type != current.selected_progress_type.progress_type {
        changed.push(PreferenceField::SelectedProgressType);
    }
    if preset.activity_types.join(";") != current.selected_activity_types.join(";") {
        changed.push(PreferenceField::SelectedActivityTypes);
    }
    if preset.include_commute_ride != current.include_commute_ride {
        changed.push(PreferenceField::IncludeCommuteRide);
    }
    if preset.include_indoor_ride != current.include_indoor_ride {
        changed.push(PreferenceField::IncludeIndoorRide);
    }
    if preset.target_value != current.target_value {
        changed.push(PreferenceField::TargetValue);
    }

    let preferences = EffectivePreferences {
        selected_activity_types: preset.activity_types.clone(),
        selected_years: current.selected_years.clone(),
        selected_progress_type: progress_type,
        include_commute_ride: preset.include_commute_ride,
        include_indoor_ride: preset.include_indoor_ride,
        target_value: preset.target_value,
    };

    Ok(PresetApplication { preferences, changed })
}

/// Write back only the fields a preset changed.
pub fn persist_changes<S>(application: &PresetApplication, store: &mut S) -> YearProgressResult<()>
where
    S: PreferenceStore + ?Sized,
{
    let preferences = &application.preferences;

    for field in &application.changed {
        match field {
            PreferenceField::SelectedYears => {
                persist(PreferenceValue::SelectedYears(&preferences.selected_years), store)?
            }
            PreferenceField::SelectedActivityTypes => persist(
                PreferenceValue::SelectedActivityTypes(&preferences.selected_activity_types),
                store,
            )?,
            PreferenceField::SelectedProgressType => persist(
                PreferenceValue::SelectedProgressType(preferences.selected_progress_type.progress_type),
                store,
            )?,
            PreferenceField::IncludeCommuteRide => {
                persist(PreferenceValue::IncludeCommuteRide(preferences.include_commute_ride), store)?
            }
            PreferenceField::IncludeIndoorRide => {
                persist(PreferenceValue::IncludeIndoorRide(preferences.include_indoor_ride), store)?
            }
            PreferenceField::TargetValue => match preferences.target_value {
                Some(target) => persist(PreferenceValue::TargetValue(target), store)?,
                None => clear(PreferenceField::TargetValue, store)?,
            },
        }
    }

    tracing::debug!("Persisted {} preset fields", application.changed.len());
    Ok(())
}

/// Persist one preference value under its key.
pub fn persist<S>(value: PreferenceValue<'_>, store: &mut S) -> YearProgressResult<()>
where
    S: PreferenceStore + ?Sized,
{
    write_json(store, value.field().key(), &value.to_json())
}

/// Remove a preference key entirely.
pub fn clear<S>(field: PreferenceField, store: &mut S) -> YearProgressResult<()>
where
    S: PreferenceStore + ?Sized,
{
    store.remove(field.key())
}
