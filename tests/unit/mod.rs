//! Unit test modules.

mod aggregation_test;
mod preset_test;
mod year_progression_test;
