//! Unit tests for year and target progressions.

use chrono::NaiveDate;
use year_progress::progress::{
    compute_target_progression, compute_year_progressions, find_progress_type, provide_progress_types,
    ProgressType, ProgressionAtDay, ProgressionFilter, YearProgressType,
};
use year_progress::Activity;

/// Test helper to create an activity at 08:00 on the given date.
fn create_activity(activity_type: &str, date: (i32, u32, u32), distance_km: f64) -> Activity {
    let start = NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    Activity::new(activity_type, start).with_distance(distance_km * 1000.0)
}

fn progress_type(progress_type: ProgressType) -> YearProgressType {
    find_progress_type(&provide_progress_types(true), progress_type)
        .unwrap()
        .clone()
}

#[test]
fn test_march_rides_scenario() {
    let activities = vec![
        create_activity("Ride", (2023, 3, 1), 10.0),
        create_activity("Ride", (2023, 3, 2), 5.0),
    ];
    let selected = vec!["Ride".to_string()];
    let years = [2023];
    let filter = ProgressionFilter {
        activity_types: &selected,
        years: Some(&years),
        include_commute_ride: true,
        include_indoor_ride: true,
    };

    let result =
        compute_year_progressions(&activities, &filter, true, &progress_type(ProgressType::Distance)).unwrap();

    assert_eq!(
        result[0].progressions,
        vec![
            ProgressionAtDay { day_of_year: 60, value: 10.0 },
            ProgressionAtDay { day_of_year: 61, value: 15.0 },
        ]
    );
}

#[test]
fn test_multi_type_selection_and_elevation() {
    let activities = vec![
        create_activity("Ride", (2024, 1, 1), 0.0).with_elevation_gain(300.0),
        create_activity("Hike", (2024, 1, 2), 0.0).with_elevation_gain(800.0),
        create_activity("Swim", (2024, 1, 3), 0.0).with_elevation_gain(0.0),
        create_activity("Ride", (2024, 12, 31), 0.0).with_elevation_gain(100.0),
    ];
    let selected = vec!["Ride".to_string(), "Hike".to_string()];
    let filter = ProgressionFilter {
        activity_types: &selected,
        years: None,
        include_commute_ride: true,
        include_indoor_ride: true,
    };

    let result =
        compute_year_progressions(&activities, &filter, true, &progress_type(ProgressType::Elevation)).unwrap();

    let days: Vec<_> = result[0].progressions.iter().map(|p| p.day_of_year).collect();
    assert_eq!(days, vec![1, 2, 366]);
    assert_eq!(result[0].total(), 1200.0);
}

#[test]
fn test_time_progression_in_hours() {
    let activities = vec![
        create_activity("Run", (2023, 7, 1), 10.0).with_moving_time(3600.0),
        create_activity("Run", (2023, 7, 8), 10.0).with_moving_time(1800.0),
    ];
    let selected = vec!["Run".to_string()];
    let filter = ProgressionFilter {
        activity_types: &selected,
        years: None,
        include_commute_ride: true,
        include_indoor_ride: true,
    };

    let result =
        compute_year_progressions(&activities, &filter, true, &progress_type(ProgressType::Time)).unwrap();

    assert_eq!(result[0].total(), 1.5);
}

#[test]
fn test_target_progression_against_year_length() {
    let leap = compute_target_progression(2024, 366.0).unwrap();
    assert_eq!(leap.progressions.len(), 366);
    assert_eq!(leap.progressions.last().unwrap().value, 366.0);

    let common = compute_target_progression(2023, 365.0).unwrap();
    assert_eq!(common.progressions.len(), 365);
    assert_eq!(common.progressions.last().unwrap().value, 365.0);
}
