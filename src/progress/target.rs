//! Linear target trajectory.

use chrono::NaiveDate;

use super::types::{ProgressionAtDay, TargetProgression};

/// Number of days in a calendar year.
pub fn days_in_year(year: i32) -> u32 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

/// Linear trajectory from 0 to `target_value` over the given year.
///
/// Returns `None` when the target is not a finite number.
pub fn compute_target_progression(year: i32, target_value: f64) -> Option<TargetProgression> {
    if !target_value.is_finite() {
        return None;
    }

    let days = days_in_year(year);
    let progressions = (1..=days)
        .map(|day_of_year| ProgressionAtDay {
            day_of_year,
            value: target_value * f64::from(day_of_year) / f64::from(days),
        })
        .collect();

    Some(TargetProgression {
        year,
        target_value,
        progressions,
    })
}
