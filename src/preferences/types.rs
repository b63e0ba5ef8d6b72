//! Preference type definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::progress::{ProgressType, YearProgressType};

/// One persisted preference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceField {
    /// Years shown
    SelectedYears,
    /// Sport types accumulated
    SelectedActivityTypes,
    /// Metric accumulated
    SelectedProgressType,
    /// Keep commute rides
    IncludeCommuteRide,
    /// Keep indoor rides
    IncludeIndoorRide,
    /// Target value for the current year
    TargetValue,
}

impl PreferenceField {
    /// All fields.
    pub const ALL: [PreferenceField; 6] = [
        PreferenceField::SelectedYears,
        PreferenceField::SelectedActivityTypes,
        PreferenceField::SelectedProgressType,
        PreferenceField::IncludeCommuteRide,
        PreferenceField::IncludeIndoorRide,
        PreferenceField::TargetValue,
    ];

    /// Storage key.
    pub fn key(&self) -> &'static str {
        match self {
            PreferenceField::SelectedYears => "yearProgress_selectedYears",
            PreferenceField::SelectedActivityTypes => "yearProgress_selectedActivityTypes",
            PreferenceField::SelectedProgressType => "yearProgress_selectedProgressType",
            PreferenceField::IncludeCommuteRide => "yearProgress_includeCommuteRide",
            PreferenceField::IncludeIndoorRide => "yearProgress_includeIndoorRide",
            PreferenceField::TargetValue => "yearProgress_targetValue",
        }
    }
}

impl std::fmt::Display for PreferenceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A value to persist for one preference field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferenceValue<'a> {
    SelectedYears(&'a [i32]),
    SelectedActivityTypes(&'a [String]),
    SelectedProgressType(ProgressType),
    IncludeCommuteRide(bool),
    IncludeIndoorRide(bool),
    TargetValue(f64),
}

impl PreferenceValue<'_> {
    /// Field this value belongs to.
    pub fn field(&self) -> PreferenceField {
        match self {
            PreferenceValue::SelectedYears(_) => PreferenceField::SelectedYears,
            PreferenceValue::SelectedActivityTypes(_) => PreferenceField::SelectedActivityTypes,
            PreferenceValue::SelectedProgressType(_) => PreferenceField::SelectedProgressType,
            PreferenceValue::IncludeCommuteRide(_) => PreferenceField::IncludeCommuteRide,
            PreferenceValue::IncludeIndoorRide(_) => PreferenceField::IncludeIndoorRide,
            PreferenceValue::TargetValue(_) => PreferenceField::TargetValue,
        }
    }

    /// JSON form written to the store. Whole targets are written as integers.
    pub fn to_json(&self) -> Value {
        match self {
            PreferenceValue::SelectedYears(years) => Value::from(years.to_vec()),
            PreferenceValue::SelectedActivityTypes(types) => Value::from(types.to_vec()),
            PreferenceValue::SelectedProgressType(progress_type) => Value::from(progress_type.tag()),
            PreferenceValue::IncludeCommuteRide(include) => Value::from(*include),
            PreferenceValue::IncludeIndoorRide(include) => Value::from(*include),
            PreferenceValue::TargetValue(target) => {
                if target.fract() == 0.0 && target.abs() < i64::MAX as f64 {
                    Value::from(*target as i64)
                } else {
                    Value::from(*target)
                }
            }
        }
    }
}

/// One resolution layer; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialPreferences {
    pub selected_activity_types: Option<Vec<String>>,
    pub selected_years: Option<Vec<i32>>,
    pub selected_progress_type: Option<ProgressType>,
    pub include_commute_ride: Option<bool>,
    pub include_indoor_ride: Option<bool>,
    pub target_value: Option<f64>,
}

/// Fully resolved display configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectivePreferences {
    /// Sport types accumulated, never empty once resolved
    pub selected_activity_types: Vec<String>,
    /// Years shown
    pub selected_years: Vec<i32>,
    /// Metric accumulated
    pub selected_progress_type: YearProgressType,
    /// Keep commute rides
    pub include_commute_ride: bool,
    /// Keep indoor rides
    pub include_indoor_ride: bool,
    /// Target value for the current year
    pub target_value: Option<f64>,
}

/// A stored bundle of preference values applied in one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProgressPreset {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Metric accumulated
    pub progress_type: ProgressType,
    /// Sport types accumulated
    pub activity_types: Vec<String>,
    /// Keep commute rides
    pub include_commute_ride: bool,
    /// Keep indoor rides
    pub include_indoor_ride: bool,
    /// Optional target value
    pub target_value: Option<f64>,
}

impl YearProgressPreset {
    /// Create a preset with both ride categories included and no target.
    pub fn new(name: impl Into<String>, progress_type: ProgressType, activity_types: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            progress_type,
            activity_types,
            include_commute_ride: true,
            include_indoor_ride: true,
            target_value: None,
        }
    }

    /// Set the target value.
    pub fn with_target(mut self, target_value: f64) -> Self {
        self.target_value = Some(target_value);
        self
    }
}

/// Preference lifecycle within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferenceLifecycle {
    /// Nothing resolved yet
    #[default]
    Uninitialized,
    /// Resolved from persisted values and defaults
    Defaulted,
    /// Changed by the user since the last resolution
    UserModified,
    /// A preset was applied
    PresetApplied,
}
