// ABOUTME: Workout activity model with laps, trackpoints, and device metadata
// ABOUTME: Activity is built once at import time through ActivityBuilder; only notes are editable
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One instantaneous sample recorded by the device
///
/// Every field except `time` is optional. Indoor activities have no GPS, many
/// watches have no power meter, and so on. Consumers must skip a sample for an
/// average when the field is absent instead of reading it as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trackpoint {
    /// When the sample was taken (UTC)
    pub time: DateTime<Utc>,
    /// GPS latitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// GPS longitude in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Altitude in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_meters: Option<f64>,
    /// Cumulative distance from the activity start in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    /// Heart rate (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    /// Cadence (RPM or steps/min)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    /// Instantaneous speed (m/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Power output (watts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
}

impl Trackpoint {
    /// Sample at `time` with no sensor readings
    #[must_use]
    pub const fn at(time: DateTime<Utc>) -> Self {
        Self {
            time,
            latitude: None,
            longitude: None,
            altitude_meters: None,
            distance_meters: None,
            heart_rate: None,
            cadence: None,
            speed: None,
            power: None,
        }
    }

    /// Set the heart rate
    #[must_use]
    pub const fn with_heart_rate(mut self, heart_rate: u32) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    /// Set the altitude
    #[must_use]
    pub const fn with_altitude(mut self, altitude_meters: f64) -> Self {
        self.altitude_meters = Some(altitude_meters);
        self
    }

    /// Set the instantaneous speed
    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Set the cadence
    #[must_use]
    pub const fn with_cadence(mut self, cadence: u32) -> Self {
        self.cadence = Some(cadence);
        self
    }

    /// Set the GPS position
    #[must_use]
    pub const fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

/// A contiguous segment of an activity, owned by exactly one activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lap {
    /// When the lap started (UTC)
    pub start_time: DateTime<Utc>,
    /// Elapsed time of the lap in seconds
    pub total_time_seconds: f64,
    /// Distance covered in the lap in meters
    pub distance_meters: f64,
    /// Declared maximum speed for the lap (m/s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f64>,
    /// Calories burned during the lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Average heart rate over the lap (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate over the lap (BPM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Average cadence over the lap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<u32>,
    /// Samples recorded during the lap, in chronological order
    #[serde(default)]
    pub trackpoints: Vec<Trackpoint>,
}

impl Lap {
    /// Lap with the given timing and no optional metrics
    #[must_use]
    pub const fn new(
        start_time: DateTime<Utc>,
        total_time_seconds: f64,
        distance_meters: f64,
    ) -> Self {
        Self {
            start_time,
            total_time_seconds,
            distance_meters,
            max_speed: None,
            calories: None,
            average_heart_rate: None,
            max_heart_rate: None,
            cadence: None,
            trackpoints: Vec::new(),
        }
    }

    /// Attach trackpoints to the lap
    #[must_use]
    pub fn with_trackpoints(mut self, trackpoints: Vec<Trackpoint>) -> Self {
        self.trackpoints = trackpoints;
        self
    }

    /// Set the declared maximum speed
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Set the lap calories
    #[must_use]
    pub fn with_calories(mut self, calories: f64) -> Self {
        self.calories = Some(calories);
        self
    }
}

/// Recording device metadata (TCX `Creator` element or provider device name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name, e.g. "Forerunner 255"
    pub name: String,
    /// Vendor product identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Firmware version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A single recorded workout
///
/// Activities are normalized by the ingestion layer (TCX parser or provider
/// converter) and are immutable afterwards apart from the user's notes.
/// Fields are private; construct with [`ActivityBuilder`].
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use stride_core::models::ActivityBuilder;
///
/// let activity = ActivityBuilder::new("a-1", "Running", Utc::now(), 3000.0, 10000.0)
///     .calories(650.0)
///     .build();
///
/// assert_eq!(activity.id(), "a-1");
/// assert!(activity.trackpoints().next().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default = "Activity::generate_id")]
    id: String,
    sport: String,
    start_time: DateTime<Utc>,
    total_time_seconds: f64,
    distance_meters: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default)]
    laps: Vec<Lap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator: Option<DeviceInfo>,
}

impl Activity {
    /// Fresh identifier for activities whose source file had none
    #[must_use]
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Returns the unique identifier
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the free-form sport label, e.g. "Running"
    #[must_use]
    pub fn sport(&self) -> &str {
        &self.sport
    }

    /// Returns when the activity started (UTC)
    #[must_use]
    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the total elapsed time in seconds
    #[must_use]
    pub const fn total_time_seconds(&self) -> f64 {
        self.total_time_seconds
    }

    /// Returns the total distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Returns the calories burned, if recorded
    #[must_use]
    pub const fn calories(&self) -> Option<f64> {
        self.calories
    }

    /// Returns the user's notes
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the laps in recorded order
    #[must_use]
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Returns the recording device, if known
    #[must_use]
    pub const fn creator(&self) -> Option<&DeviceInfo> {
        self.creator.as_ref()
    }

    /// All trackpoints of all laps, flattened in original order
    pub fn trackpoints(&self) -> impl Iterator<Item = &Trackpoint> {
        self.laps.iter().flat_map(|lap| lap.trackpoints.iter())
    }

    /// Replace the user's notes (the only mutable field)
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes.filter(|text| !text.trim().is_empty());
    }
}

/// Builder for [`Activity`]
#[derive(Debug, Clone)]
pub struct ActivityBuilder {
    activity: Activity,
}

impl ActivityBuilder {
    /// Start an activity with its required fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        sport: impl Into<String>,
        start_time: DateTime<Utc>,
        total_time_seconds: f64,
        distance_meters: f64,
    ) -> Self {
        Self {
            activity: Activity {
                id: id.into(),
                sport: sport.into(),
                start_time,
                total_time_seconds,
                distance_meters,
                calories: None,
                notes: None,
                laps: Vec::new(),
                creator: None,
            },
        }
    }

    /// Set calories
    #[must_use]
    pub fn calories(mut self, calories: f64) -> Self {
        self.activity.calories = Some(calories);
        self
    }

    /// Set notes
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.activity.notes = Some(notes.into());
        self
    }

    /// Append a lap
    #[must_use]
    pub fn lap(mut self, lap: Lap) -> Self {
        self.activity.laps.push(lap);
        self
    }

    /// Replace all laps
    #[must_use]
    pub fn laps(mut self, laps: Vec<Lap>) -> Self {
        self.activity.laps = laps;
        self
    }

    /// Set the recording device
    #[must_use]
    pub fn creator(mut self, creator: DeviceInfo) -> Self {
        self.activity.creator = Some(creator);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Activity {
        self.activity
    }
}
