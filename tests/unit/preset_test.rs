//! Unit tests for preset application and change detection.

use year_progress::preferences::{
    apply_preset, load_persisted, persist_changes, resolve, resolve_defaults, EffectivePreferences,
    MemoryPreferenceStore, PreferenceField, PreferenceStore, YearProgressPreset,
};
use year_progress::activities::ActivityCountByType;
use year_progress::progress::{provide_progress_types, ProgressType};

fn current(store: &MemoryPreferenceStore) -> EffectivePreferences {
    let progress_types = provide_progress_types(true);
    let counts = vec![ActivityCountByType { activity_type: "Ride".to_string(), count: 3 }];
    let defaults = resolve_defaults(&counts, &[2023], &progress_types);
    resolve(load_persisted(store, &progress_types), defaults, &progress_types).unwrap()
}

#[test]
fn test_preset_changing_every_field() {
    let mut store = MemoryPreferenceStore::new();
    let prefs = current(&store);

    let mut preset = YearProgressPreset::new("Runs", ProgressType::Count, vec!["Run".to_string()])
        .with_target(150.0);
    preset.include_commute_ride = false;
    preset.include_indoor_ride = false;

    let application = apply_preset(&preset, &prefs, &provide_progress_types(true)).unwrap();
    persist_changes(&application, &mut store).unwrap();

    assert_eq!(application.changed.len(), 5);
    assert_eq!(store.write_count(), 5);

    let reloaded = current(&store);
    assert_eq!(reloaded.selected_activity_types, vec!["Run".to_string()]);
    assert_eq!(reloaded.selected_progress_type.progress_type, ProgressType::Count);
    assert!(!reloaded.include_commute_ride);
    assert!(!reloaded.include_indoor_ride);
    assert_eq!(reloaded.target_value, Some(150.0));
    assert_eq!(reloaded.selected_years, vec![2023]);
}

#[test]
fn test_joined_comparison_of_activity_types() {
    let mut store = MemoryPreferenceStore::new();
    store
        .set(PreferenceField::SelectedActivityTypes.key(), r#"["Ride;Run"]"#)
        .unwrap();
    let prefs = current(&store);

    // Same joined text, different members: not a change
    let mut preset = YearProgressPreset::new(
        "joined",
        ProgressType::Distance,
        vec!["Ride".to_string(), "Run".to_string()],
    );
    preset.include_commute_ride = prefs.include_commute_ride;
    preset.include_indoor_ride = prefs.include_indoor_ride;

    let application = apply_preset(&preset, &prefs, &provide_progress_types(true)).unwrap();
    assert!(!application.has_changes());

    // Same members, different order: a change
    let swapped = EffectivePreferences {
        selected_activity_types: vec!["Run".to_string(), "Ride".to_string()],
        ..prefs
    };
    let application = apply_preset(&preset, &swapped, &provide_progress_types(true)).unwrap();
    assert_eq!(application.changed, vec![PreferenceField::SelectedActivityTypes]);
}
