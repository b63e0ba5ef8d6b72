//! Unit tests for activity aggregation and default preferences.

use chrono::NaiveDate;
use year_progress::activities::{available_years, group_by_type, most_performed_type};
use year_progress::preferences::{load_persisted, resolve, resolve_defaults, MemoryPreferenceStore};
use year_progress::progress::provide_progress_types;
use year_progress::Activity;

fn create_activities(activity_type: &str, count: usize, year: i32) -> Vec<Activity> {
    (0..count)
        .map(|i| {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .unwrap()
                .and_hms_opt(6, 0, 0)
                .unwrap()
                + chrono::Duration::days(i as i64);
            Activity::new(activity_type, start)
        })
        .collect()
}

#[test]
fn test_most_performed_type_is_default_selection() {
    let mut activities = create_activities("Run", 2, 2023);
    activities.extend(create_activities("Ride", 5, 2022));

    let counts = group_by_type(&activities);
    assert_eq!(most_performed_type(&counts), Some("Ride".to_string()));

    let progress_types = provide_progress_types(true);
    let defaults = resolve_defaults(&counts, &available_years(&activities), &progress_types);
    let store = MemoryPreferenceStore::new();
    let prefs = resolve(load_persisted(&store, &progress_types), defaults, &progress_types).unwrap();

    assert_eq!(prefs.selected_activity_types, vec!["Ride".to_string()]);
    assert_eq!(prefs.selected_years, vec![2022, 2023]);
}

#[test]
fn test_every_type_counted_once() {
    let mut activities = create_activities("Walk", 3, 2021);
    activities.extend(create_activities("Ride", 4, 2021));
    activities.extend(create_activities("Walk", 2, 2022));

    let counts = group_by_type(&activities);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), activities.len());
    assert_eq!(counts[0].activity_type, "Walk");
    assert_eq!(counts[0].count, 5);
}
