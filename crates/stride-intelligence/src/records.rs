// ABOUTME: Personal record detection against an append-only history of existing records
// ABOUTME: Derives the current record per (type, category, sport) and compares a new activity against it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! # Personal-Record Detector
//!
//! Records are never mutated. Every detection yields new entities, and the
//! "current" record for a triple is re-derived from the full history by
//! [`latest_by_triple`]: the entry with the most recent activity date, ties
//! going to the one created last.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use stride_core::models::{Activity, PersonalRecord, RecordCategory, RecordTriple, RecordType};
use tracing::debug;

use crate::statistics::StatisticsEngine;

/// Current record per triple, derived from the full history
#[must_use]
pub fn latest_by_triple(records: &[PersonalRecord]) -> HashMap<RecordTriple, &PersonalRecord> {
    let mut latest: HashMap<RecordTriple, &PersonalRecord> = HashMap::new();
    for record in records {
        latest
            .entry(record.triple())
            .and_modify(|current| {
                if (record.activity_date, record.created_at)
                    > (current.activity_date, current.created_at)
                {
                    *current = record;
                }
            })
            .or_insert(record);
    }
    latest
}

/// Current records, optionally limited to one sport, ordered by sport, type, then category
#[must_use]
pub fn current_records<'a>(
    records: &'a [PersonalRecord],
    sport: Option<&str>,
) -> Vec<&'a PersonalRecord> {
    let mut current: Vec<&PersonalRecord> = latest_by_triple(records)
        .into_values()
        .filter(|record| sport.is_none_or(|s| record.sport == s))
        .collect();
    current.sort_by(|a, b| a.triple().cmp(&b.triple()));
    current
}

/// Every record set by one activity
#[must_use]
pub fn records_for_activity<'a>(
    records: &'a [PersonalRecord],
    activity_id: &str,
) -> Vec<&'a PersonalRecord> {
    records
        .iter()
        .filter(|record| record.activity_id == activity_id)
        .collect()
}

/// Full history of one triple, oldest first
#[must_use]
pub fn history_for_triple<'a>(
    records: &'a [PersonalRecord],
    triple: &RecordTriple,
) -> Vec<&'a PersonalRecord> {
    let mut history: Vec<&PersonalRecord> = records
        .iter()
        .filter(|record| record.triple() == *triple)
        .collect();
    history.sort_by_key(|record| (record.activity_date, record.created_at));
    history
}

/// One beaten (type, category) for a new activity, before it becomes an entity
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDetection {
    /// Metric
    pub record_type: RecordType,
    /// Bucket
    pub category: RecordCategory,
    /// New value
    pub value: f64,
    /// Record being superseded, if any
    pub previous: Option<PersonalRecord>,
    /// Gain over the previous value, or the raw value when there was none
    pub improvement: f64,
}

impl RecordDetection {
    /// Turn the detection into a new record entity
    #[must_use]
    pub fn materialize(&self, activity: &Activity, detected_at: DateTime<Utc>) -> PersonalRecord {
        PersonalRecord {
            id: PersonalRecord::make_id(activity.id(), self.record_type, self.category),
            record_type: self.record_type,
            category: self.category,
            value: self.value,
            unit: self.record_type.unit().to_owned(),
            activity_id: activity.id().to_owned(),
            activity_date: activity.start_time(),
            sport: activity.sport().to_owned(),
            previous_value: self.previous.as_ref().map(|p| p.value),
            previous_activity_id: self.previous.as_ref().map(|p| p.activity_id.clone()),
            previous_date: self.previous.as_ref().map(|p| p.activity_date),
            improvement: Some(self.improvement),
            created_at: detected_at,
            is_new: true,
        }
    }
}

/// Candidate value for one (type, category) pass
struct Candidate {
    record_type: RecordType,
    category: RecordCategory,
    value: f64,
}

impl Candidate {
    const fn new(record_type: RecordType, category: RecordCategory, value: f64) -> Self {
        Self {
            record_type,
            category,
            value,
        }
    }
}

/// Personal record detector
pub struct RecordDetector;

impl RecordDetector {
    /// Values the activity offers for each applicable (type, category)
    fn candidates(activity: &Activity) -> Vec<Candidate> {
        let stats = StatisticsEngine::calculate(activity);
        let distance = activity.distance_meters();
        let mut candidates = Vec::new();

        if distance > 0.0 {
            candidates.push(Candidate::new(RecordType::Distance, RecordCategory::Longest, distance));
        }
        if stats.max_speed > 0.0 {
            candidates.push(Candidate::new(RecordType::Speed, RecordCategory::Fastest, stats.max_speed));
        }
        if RecordCategory::TenKm.matches_distance(distance) && stats.average_speed > 0.0 {
            candidates.push(Candidate::new(
                RecordType::Speed,
                RecordCategory::TenKm,
                stats.average_speed,
            ));
        }
        if activity.total_time_seconds() > 0.0 {
            candidates.extend(
                RecordCategory::DISTANCE_BANDS
                    .iter()
                    .filter(|band| band.matches_distance(distance))
                    .map(|&band| {
                        Candidate::new(RecordType::Time, band, activity.total_time_seconds())
                    }),
            );
        }
        if let Some(gain) = stats.elevation_gain {
            candidates.push(Candidate::new(RecordType::Elevation, RecordCategory::Highest, gain));
        }
        if let Some(calories) = stats.total_calories {
            // Calories share the "longest" bucket
            candidates.push(Candidate::new(RecordType::Calories, RecordCategory::Longest, calories));
        }
        candidates
    }

    /// Which (type, category) pairs the activity beats, compared per sport
    #[must_use]
    pub fn detect(activity: &Activity, existing: &[PersonalRecord]) -> Vec<RecordDetection> {
        let current = latest_by_triple(existing);
        let detections: Vec<RecordDetection> = Self::candidates(activity)
            .into_iter()
            .filter_map(|candidate| {
                let triple =
                    RecordTriple::new(candidate.record_type, candidate.category, activity.sport());
                let previous = current.get(&triple).copied();
                Self::compare(&candidate, previous)
            })
            .collect();

        debug!(
            activity_id = %activity.id(),
            sport = %activity.sport(),
            existing = existing.len(),
            detected = detections.len(),
            "detected personal records"
        );
        detections
    }

    /// A detection when `candidate` beats `previous` (or there is no previous)
    fn compare(candidate: &Candidate, previous: Option<&PersonalRecord>) -> Option<RecordDetection> {
        let lower_is_better = candidate.record_type.lower_is_better();
        let improvement = match previous {
            None => candidate.value,
            Some(prior) if lower_is_better => prior.value - candidate.value,
            Some(prior) => candidate.value - prior.value,
        };
        if previous.is_some() && improvement <= 0.0 {
            return None;
        }
        Some(RecordDetection {
            record_type: candidate.record_type,
            category: candidate.category,
            value: candidate.value,
            previous: previous.cloned(),
            improvement,
        })
    }
}

/// Detect and materialize new records for `activity`, stamped `detected_at`
#[must_use]
pub fn detect_records(
    activity: &Activity,
    existing: &[PersonalRecord],
    detected_at: DateTime<Utc>,
) -> Vec<PersonalRecord> {
    RecordDetector::detect(activity, existing)
        .iter()
        .map(|detection| detection.materialize(activity, detected_at))
        .collect()
}
