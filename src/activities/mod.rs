//! Activity history module.
//!
//! Read-only activity records and the aggregations derived from them:
//! - Activity counts per sport type
//! - Years present in the history
//! - Most performed sport type

pub mod aggregator;
pub mod types;

// Re-exports for convenience
pub use aggregator::{available_years, group_by_type, most_performed_type};
pub use types::{Activity, ActivityCountByType};
