//! Core data types for ISS sighting decisions

use std::fmt;

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A wall-clock hour:minute value with no date component.
///
/// Seconds are dropped at construction, so the sunrise/sunset comparison
/// works at minute granularity by construction. The derived `Ord` compares
/// hour first, then minute.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    /// Build from raw fields. Hours above 23 or minutes above 59 are a
    /// caller bug.
    pub fn new(hour: u8, minute: u8) -> Self {
        debug_assert!(hour < 24, "hour out of range: {}", hour);
        debug_assert!(minute < 60, "minute out of range: {}", minute);
        Self { hour, minute }
    }

    /// Truncate a datetime to its hour and minute fields.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::new(dt.hour() as u8, dt.minute() as u8)
    }

    /// The current UTC wall-clock, minute precision.
    pub fn now_utc() -> Self {
        Self::from_datetime(&Utc::now())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Sunrise and sunset at the observer's location, recomputed each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylightWindow {
    pub sunrise: TimeOfDay,
    pub sunset: TimeOfDay,
}

/// Three-way result of evaluating one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SightingOutcome {
    /// The station is outside the tolerance box; nothing to report.
    NotOverhead,
    /// Overhead and dark: worth stepping outside.
    OverheadNight,
    /// Overhead but the sun is up; probably not visible.
    OverheadDaylight,
}

/// Subject and body of an outgoing notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    /// The night-time "go outside now" variant.
    pub fn look_up() -> Self {
        Self {
            subject: "Look Up!".to_string(),
            body: "The ISS is above you in the sky.".to_string(),
        }
    }

    /// The daytime variant, sent when the station is overhead but likely
    /// washed out by sunlight.
    pub fn daytime() -> Self {
        Self {
            subject: "Daytime Alert".to_string(),
            body: "The ISS is above you, but it's daytime, so it might not be visible."
                .to_string(),
        }
    }
}
