// ABOUTME: Coach commentary context: condensed workout summary handed to an external language model
// ABOUTME: Builds a serializable context and a plain-text prompt block; performs no network calls
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! Commentary context for the external coach model.
//!
//! Only computed summaries go into the prompt. Raw trackpoints never leave
//! the process.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use stride_core::constants::units::{METERS_PER_KM, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use stride_core::models::{Activity, PersonalRecord, Statistics, ZoneAnalysis};
use stride_intelligence::statistics::format_pace;

/// Opening instruction of every commentary prompt
const COACH_INSTRUCTION: &str = "You are an encouraging running and cycling coach. \
Comment on the workout below in three to five sentences. \
Mention new personal records first if there are any.";

/// One new record, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordHighlight {
    /// e.g. `time 5km`
    pub label: String,
    /// Record value
    pub value: f64,
    /// Unit of `value`
    pub unit: String,
    /// Gain over the previous record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
}

/// Summary of one workout for commentary generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentaryContext {
    /// Activity id
    pub activity_id: String,
    /// Sport label
    pub sport: String,
    /// Start time
    pub date: DateTime<Utc>,
    /// Distance in km
    pub distance_km: f64,
    /// Elapsed time as `h:mm:ss`
    pub duration: String,
    /// Average pace as `m:ss` per km
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_pace: Option<String>,
    /// Rounded average heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Elevation gain in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    /// Zone with the most time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_zone: Option<u8>,
    /// Training type label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_type: Option<String>,
    /// Training efficiency (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<u32>,
    /// Records the workout set
    pub new_records: Vec<RecordHighlight>,
    /// User notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Render seconds as `h:mm:ss`
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.round().max(0.0) as u64;
    let hours = total / SECONDS_PER_HOUR as u64;
    let minutes = (total % SECONDS_PER_HOUR as u64) / SECONDS_PER_MINUTE as u64;
    let secs = total % SECONDS_PER_MINUTE as u64;
    format!("{hours}:{minutes:02}:{secs:02}")
}

impl CommentaryContext {
    /// Condense an activity and its derived results
    #[must_use]
    pub fn build(
        activity: &Activity,
        statistics: &Statistics,
        zone_analysis: Option<&ZoneAnalysis>,
        new_records: &[PersonalRecord],
    ) -> Self {
        Self {
            activity_id: activity.id().to_owned(),
            sport: activity.sport().to_owned(),
            date: activity.start_time(),
            distance_km: statistics.total_distance / METERS_PER_KM,
            duration: format_duration(statistics.total_time),
            average_pace: statistics.average_pace.map(format_pace),
            average_heart_rate: statistics.average_heart_rate.map(|hr| hr.round() as u32),
            max_heart_rate: statistics.max_heart_rate,
            elevation_gain: statistics.elevation_gain,
            dominant_zone: zone_analysis.and_then(|analysis| analysis.dominant_zone),
            training_type: zone_analysis.map(|analysis| analysis.training_type.to_string()),
            efficiency: zone_analysis.map(|analysis| analysis.efficiency),
            new_records: new_records
                .iter()
                .map(|record| RecordHighlight {
                    label: format!("{} {}", record.record_type, record.category),
                    value: record.value,
                    unit: record.unit.clone(),
                    improvement: record.improvement,
                })
                .collect(),
            notes: activity.notes().map(str::to_owned),
        }
    }

    /// Plain-text prompt block
    #[must_use]
    pub fn to_prompt(&self) -> String {
        let mut prompt = String::from(COACH_INSTRUCTION);
        prompt.push_str("\n\n");
        // Writing into a String cannot fail
        let _ = writeln!(prompt, "Sport: {}", self.sport);
        let _ = writeln!(prompt, "Date: {}", self.date.format("%Y-%m-%d"));
        let _ = writeln!(prompt, "Distance: {:.2} km", self.distance_km);
        let _ = writeln!(prompt, "Duration: {}", self.duration);
        if let Some(pace) = &self.average_pace {
            let _ = writeln!(prompt, "Average pace: {pace} /km");
        }
        if let Some(hr) = self.average_heart_rate {
            let max = self
                .max_heart_rate
                .map_or_else(String::new, |max| format!(" (max {max})"));
            let _ = writeln!(prompt, "Average heart rate: {hr} bpm{max}");
        }
        if let Some(gain) = self.elevation_gain {
            let _ = writeln!(prompt, "Elevation gain: {gain:.0} m");
        }
        if let (Some(zone), Some(training_type)) = (self.dominant_zone, &self.training_type) {
            let _ = writeln!(prompt, "Dominant zone: Z{zone}, training type: {training_type}");
        }
        if let Some(efficiency) = self.efficiency {
            let _ = writeln!(prompt, "Training efficiency: {efficiency}/100");
        }
        for record in &self.new_records {
            let _ = writeln!(
                prompt,
                "New personal record: {} = {:.2} {}",
                record.label, record.value, record.unit
            );
        }
        if let Some(notes) = &self.notes {
            let _ = writeln!(prompt, "Athlete notes: {notes}");
        }
        prompt
    }
}
