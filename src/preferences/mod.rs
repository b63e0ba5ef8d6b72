//! Year progress display preferences.
//!
//! Preferences are resolved in layers: an applied preset wins over persisted
//! values, which win over defaults computed from the activity history. Each
//! preference field is persisted under its own key as JSON text.

pub mod resolver;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use resolver::{
    apply_preset, clear, load_persisted, persist, persist_changes, resolve, resolve_defaults,
    PresetApplication,
};
pub use store::{MemoryPreferenceStore, PreferenceStore};
pub use types::{
    EffectivePreferences, PartialPreferences, PreferenceField, PreferenceLifecycle, PreferenceValue,
    YearProgressPreset,
};
