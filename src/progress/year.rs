//! Cumulative progression per year.
//!
//! Activities are filtered by sport type and ride category, grouped by year,
//! then accumulated in date order. Each distinct activity day yields one
//! sample; same-day activities are summed before the sample is emitted.

use std::collections::BTreeMap;

use crate::activities::{available_years, Activity};
use crate::error::{YearProgressError, YearProgressResult};

use super::catalog::provide_progress_types;
use super::types::{ProgressionAtDay, YearProgressType, YearProgression};

/// Selection applied to the activity history before accumulation.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionFilter<'a> {
    /// Sport types to keep
    pub activity_types: &'a [String],
    /// Years to produce; every year of the history when `None`
    pub years: Option<&'a [i32]>,
    /// Keep activities flagged as commute
    pub include_commute_ride: bool,
    /// Keep indoor trainer activities
    pub include_indoor_ride: bool,
}

impl ProgressionFilter<'_> {
    /// Whether an activity passes the type and ride category filters.
    pub fn accepts(&self, activity: &Activity) -> bool {
        if !self.activity_types.iter().any(|t| *t == activity.activity_type) {
            return false;
        }
        if activity.commute && !self.include_commute_ride {
            return false;
        }
        if activity.trainer && !self.include_indoor_ride {
            return false;
        }
        true
    }
}

/// Compute one cumulative progression per year, sorted by year.
///
/// Years without any qualifying activity are kept with a single zero sample
/// on day 1 so that year-to-year comparisons stay aligned.
pub fn compute_year_progressions(
    activities: &[Activity],
    filter: &ProgressionFilter<'_>,
    is_metric: bool,
    progress_type: &YearProgressType,
) -> YearProgressResult<Vec<YearProgression>> {
    if !provide_progress_types(is_metric).contains(progress_type) {
        return Err(YearProgressError::InvalidInput(format!(
            "Progress type {} ({}) is not available for {} units",
            progress_type.progress_type,
            progress_type.display_label(),
            if is_metric { "metric" } else { "imperial" }
        )));
    }

    let years = match filter.years {
        Some(years) => years.to_vec(),
        None => available_years(activities),
    };

    let mut by_year: BTreeMap<i32, Vec<&Activity>> =
        years.iter().map(|year| (*year, Vec::new())).collect();

    for activity in activities.iter().filter(|a| filter.accepts(a)) {
        if let Some(bucket) = by_year.get_mut(&activity.year()) {
            bucket.push(activity);
        }
    }

    let progressions: Vec<YearProgression> = by_year
        .into_iter()
        .map(|(year, mut year_activities)| {
            year_activities.sort_by_key(|a| a.start_time);
            YearProgression {
                year,
                progress_type: progress_type.progress_type,
                progressions: accumulate(&year_activities, progress_type),
            }
        })
        .collect();

    tracing::debug!(
        "Computed {} year progressions for {} activities ({})",
        progressions.len(),
        activities.len(),
        progress_type.progress_type
    );

    Ok(progressions)
}

/// Accumulate date-sorted activities into one sample per distinct day.
fn accumulate(activities: &[&Activity], progress_type: &YearProgressType) -> Vec<ProgressionAtDay> {
    let mut samples: Vec<ProgressionAtDay> = Vec::new();
    let mut total = 0.0;

    for activity in activities {
        total += progress_type.value_of(activity);
        let day_of_year = activity.day_of_year();

        match samples.last_mut() {
            Some(last) if last.day_of_year == day_of_year => last.value = total,
            _ => samples.push(ProgressionAtDay { day_of_year, value: total }),
        }
    }

    if samples.is_empty() {
        samples.push(ProgressionAtDay { day_of_year: 1, value: 0.0 });
    }

    samples
}
