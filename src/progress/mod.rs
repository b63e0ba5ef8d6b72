//! Year progress computation module.
//!
//! Provides the progress metric catalog and the two series generators:
//! - Cumulative progression per year for a chosen metric
//! - Linear target trajectory over a year
//! - Year color assignment for display

pub mod catalog;
pub mod style;
pub mod target;
pub mod types;
pub mod year;

// Re-exports for convenience
pub use catalog::{find_progress_type, provide_progress_types};
pub use style::{assign_colors, YearProgressStyle, PALETTE};
pub use target::{compute_target_progression, days_in_year};
pub use types::{ProgressType, ProgressionAtDay, TargetProgression, YearProgressType, YearProgression};
pub use year::{compute_year_progressions, ProgressionFilter};
