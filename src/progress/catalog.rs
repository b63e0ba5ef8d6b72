//! Progress metric catalog per unit system.

use super::types::{ProgressType, YearProgressType};

/// Available progress types for the given unit system.
pub fn provide_progress_types(is_metric: bool) -> Vec<YearProgressType> {
    vec![
        YearProgressType {
            progress_type: ProgressType::Distance,
            label: "Distance",
            unit: Some(if is_metric { "km" } else { "mi" }),
            is_metric,
        },
        YearProgressType {
            progress_type: ProgressType::Time,
            label: "Time",
            unit: Some("hrs"),
            is_metric,
        },
        YearProgressType {
            progress_type: ProgressType::Elevation,
            label: "Elevation",
            unit: Some(if is_metric { "m" } else { "ft" }),
            is_metric,
        },
        YearProgressType {
            progress_type: ProgressType::Count,
            label: "Activity count",
            unit: None,
            is_metric,
        },
    ]
}

/// Find the catalog entry for a progress type.
pub fn find_progress_type(
    progress_types: &[YearProgressType],
    progress_type: ProgressType,
) -> Option<&YearProgressType> {
    progress_types.iter().find(|t| t.progress_type == progress_type)
}
