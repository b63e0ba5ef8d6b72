//! Progress type and progression series definitions.

use serde::{Deserialize, Serialize};

use crate::activities::Activity;
use crate::error::YearProgressError;

const KM_TO_MILES: f64 = 0.621371;
const METERS_TO_FEET: f64 = 3.28084;

/// Metric tracked along the year.
///
/// The integer tag is the persisted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ProgressType {
    /// Cumulative distance
    Distance,
    /// Cumulative moving time
    Time,
    /// Cumulative elevation gain
    Elevation,
    /// Number of activities
    Count,
}

impl ProgressType {
    /// All progress types in catalog order.
    pub const ALL: [ProgressType; 4] = [
        ProgressType::Distance,
        ProgressType::Time,
        ProgressType::Elevation,
        ProgressType::Count,
    ];

    /// Persisted integer tag.
    pub fn tag(&self) -> i64 {
        match self {
            ProgressType::Distance => 0,
            ProgressType::Time => 1,
            ProgressType::Elevation => 2,
            ProgressType::Count => 3,
        }
    }
}

impl TryFrom<i64> for ProgressType {
    type Error = YearProgressError;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        ProgressType::ALL
            .into_iter()
            .find(|t| t.tag() == tag)
            .ok_or_else(|| YearProgressError::InvalidInput(format!("Unknown progress type tag {}", tag)))
    }
}

impl From<ProgressType> for i64 {
    fn from(progress_type: ProgressType) -> Self {
        progress_type.tag()
    }
}

impl std::fmt::Display for ProgressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressType::Distance => write!(f, "Distance"),
            ProgressType::Time => write!(f, "Time"),
            ProgressType::Elevation => write!(f, "Elevation"),
            ProgressType::Count => write!(f, "Count"),
        }
    }
}

/// Catalog entry: a progress type presented in one unit system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProgressType {
    /// Metric tag
    pub progress_type: ProgressType,
    /// Display label
    pub label: &'static str,
    /// Short unit, none for counts
    pub unit: Option<&'static str>,
    /// Unit system the values are expressed in
    pub is_metric: bool,
}

impl YearProgressType {
    /// Value contributed by one activity, converted to this entry's unit.
    pub fn value_of(&self, activity: &Activity) -> f64 {
        match self.progress_type {
            ProgressType::Distance => {
                let km = activity.distance_m / 1000.0;
                if self.is_metric {
                    km
                } else {
                    km * KM_TO_MILES
                }
            }
            ProgressType::Time => activity.moving_time_s / 3600.0,
            ProgressType::Elevation => {
                if self.is_metric {
                    activity.elevation_gain_m
                } else {
                    activity.elevation_gain_m * METERS_TO_FEET
                }
            }
            ProgressType::Count => 1.0,
        }
    }

    /// Label with unit suffix, e.g. "Distance (km)".
    pub fn display_label(&self) -> String {
        match self.unit {
            Some(unit) => format!("{} ({})", self.label, unit),
            None => self.label.to_string(),
        }
    }
}

/// Cumulative value reached on a day of the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressionAtDay {
    /// Day of year (1..=366)
    pub day_of_year: u32,
    /// Cumulative value at the end of that day
    pub value: f64,
}

/// Cumulative progression of one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProgression {
    /// Calendar year
    pub year: i32,
    /// Metric accumulated
    pub progress_type: ProgressType,
    /// Samples with strictly increasing day of year
    pub progressions: Vec<ProgressionAtDay>,
}

impl YearProgression {
    /// Final cumulative value of the year.
    pub fn total(&self) -> f64 {
        self.progressions.last().map(|p| p.value).unwrap_or(0.0)
    }

    /// Cumulative value reached on or before the given day.
    pub fn value_at(&self, day_of_year: u32) -> f64 {
        self.progressions
            .iter()
            .take_while(|p| p.day_of_year <= day_of_year)
            .last()
            .map(|p| p.value)
            .unwrap_or(0.0)
    }
}

/// Linear target trajectory over one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProgression {
    /// Calendar year
    pub year: i32,
    /// Value to reach on the last day
    pub target_value: f64,
    /// One sample per day of the year
    pub progressions: Vec<ProgressionAtDay>,
}
