//! Activity type definitions.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A synced activity as delivered by the activity provider.
///
/// Metric values are stored in SI units (meters, seconds). Start time is the
/// athlete's local wall-clock time, which is what year and day boundaries use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Sport type, e.g. "Ride", "Run", "VirtualRide"
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Local start time
    pub start_time: NaiveDateTime,
    /// Distance in meters
    #[serde(default)]
    pub distance_m: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time_s: f64,
    /// Elevation gain in meters
    #[serde(default)]
    pub elevation_gain_m: f64,
    /// Flagged as a commute
    #[serde(default)]
    pub commute: bool,
    /// Performed indoors on a trainer
    #[serde(default)]
    pub trainer: bool,
}

impl Activity {
    /// Create an activity with zeroed metrics.
    pub fn new(activity_type: impl Into<String>, start_time: NaiveDateTime) -> Self {
        Self {
            name: String::new(),
            activity_type: activity_type.into(),
            start_time,
            distance_m: 0.0,
            moving_time_s: 0.0,
            elevation_gain_m: 0.0,
            commute: false,
            trainer: false,
        }
    }

    /// Set distance in meters.
    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = distance_m;
        self
    }

    /// Set moving time in seconds.
    pub fn with_moving_time(mut self, moving_time_s: f64) -> Self {
        self.moving_time_s = moving_time_s;
        self
    }

    /// Set elevation gain in meters.
    pub fn with_elevation_gain(mut self, elevation_gain_m: f64) -> Self {
        self.elevation_gain_m = elevation_gain_m;
        self
    }

    /// Mark as commute.
    pub fn with_commute(mut self, commute: bool) -> Self {
        self.commute = commute;
        self
    }

    /// Mark as indoor trainer activity.
    pub fn with_trainer(mut self, trainer: bool) -> Self {
        self.trainer = trainer;
        self
    }

    /// Local calendar date of the start.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Calendar year of the start.
    pub fn year(&self) -> i32 {
        self.start_time.year()
    }

    /// Day of year of the start (1-based).
    pub fn day_of_year(&self) -> u32 {
        self.start_time.ordinal()
    }
}

/// Number of activities recorded for one sport type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCountByType {
    /// Sport type
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Activities of that type
    pub count: usize,
}
