//! Dialog payloads.

use chrono::NaiveDate;
use serde::Serialize;

use crate::preferences::YearProgressPreset;
use crate::progress::{ProgressType, YearProgressStyle, YearProgressType, YearProgression};

/// Data shown by the year overview dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProgressOverview {
    /// Day under the cursor
    pub moment_watched: NaiveDate,
    /// Years shown
    pub selected_years: Vec<i32>,
    /// Sport types accumulated
    pub selected_activity_types: Vec<String>,
    /// Available metrics
    pub progress_types: Vec<YearProgressType>,
    /// Computed progressions
    pub year_progressions: Vec<YearProgression>,
    /// Year colors
    pub style: YearProgressStyle,
}

impl YearProgressOverview {
    /// Cumulative value per displayed year at the watched moment's day of year.
    pub fn values_at_moment(&self) -> Vec<(i32, f64)> {
        use chrono::Datelike;

        let day_of_year = self.moment_watched.ordinal();
        self.year_progressions
            .iter()
            .map(|p| (p.year, p.value_at(day_of_year)))
            .collect()
    }
}

/// Prefilled values for the "new preset" dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPresetDraft {
    pub activity_types: Vec<String>,
    pub progress_type: ProgressType,
    pub include_commute_ride: bool,
    pub include_indoor_ride: bool,
    pub target_value: Option<f64>,
}

impl NewPresetDraft {
    /// Turn the draft into a named preset.
    pub fn into_preset(self, name: impl Into<String>) -> YearProgressPreset {
        YearProgressPreset {
            include_commute_ride: self.include_commute_ride,
            include_indoor_ride: self.include_indoor_ride,
            target_value: self.target_value,
            ..YearProgressPreset::new(name, self.progress_type, self.activity_types)
        }
    }
}
