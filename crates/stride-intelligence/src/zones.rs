// ABOUTME: Heart rate zone boundaries (age, Karvonen, manual) and per-activity time-in-zone classification
// ABOUTME: Training type comes from an ordered decision list; efficiency compares against ideal distributions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

//! # Training-Zone Classifier
//!
//! Zones are derived from a [`ZoneSettings`] value passed in by the caller.
//! Nothing here reads or writes persisted configuration.
//!
//! Elapsed time is attributed interval by interval: each pair of adjacent
//! trackpoints *within one lap* forms an interval, classified by the heart
//! rate of its first point. Lap boundaries are never bridged.

use stride_core::constants::training_type::{
    ENDURANCE_AEROBIC_ZONES, INTERVAL_HIGH_ZONES, INTERVAL_ZONE5, INTERVAL_ZONE5_SECONDARY,
    MIXED_MAX_UNKNOWN, NEUTRAL_EFFICIENCY, RECOVERY_LOW_ZONES, TEMPO_ZONES, THRESHOLD_ZONE4,
};
use stride_core::constants::units::SECONDS_PER_MINUTE;
use stride_core::constants::zone_percentages::ZONE_BANDS;
use stride_core::errors::AppResult;
use stride_core::models::{
    Activity, HeartRateZone, TrainingType, ZoneAnalysis, ZoneDistribution, ZoneMethod,
    ZonePercentages, ZoneSettings, ZoneTime,
};
use tracing::debug;

/// Static display text for one zone
struct ZoneProfile {
    name: &'static str,
    description: &'static str,
    color: &'static str,
    benefits: &'static [&'static str],
    recommendation: &'static str,
}

const ZONE_PROFILES: [ZoneProfile; 5] = [
    ZoneProfile {
        name: "Recovery",
        description: "Very light effort, easy conversation",
        color: "#9CA3AF",
        benefits: &[
            "Promotes recovery between hard sessions",
            "Improves blood circulation",
            "Builds a habit of easy movement",
        ],
        recommendation: "Use for warm-ups, cool-downs, and rest-day sessions",
    },
    ZoneProfile {
        name: "Endurance",
        description: "Light effort, comfortable breathing",
        color: "#3B82F6",
        benefits: &[
            "Develops aerobic base",
            "Improves fat metabolism",
            "Strengthens heart and capillary network",
        ],
        recommendation: "Spend most weekly training time here",
    },
    ZoneProfile {
        name: "Tempo",
        description: "Moderate effort, controlled breathing",
        color: "#10B981",
        benefits: &[
            "Raises aerobic capacity",
            "Improves running economy",
        ],
        recommendation: "Include one steady tempo block per week",
    },
    ZoneProfile {
        name: "Threshold",
        description: "Hard effort, short sentences only",
        color: "#F59E0B",
        benefits: &[
            "Raises lactate threshold",
            "Improves sustained race pace",
        ],
        recommendation: "Keep threshold work to 10-20% of weekly volume",
    },
    ZoneProfile {
        name: "Maximum",
        description: "Maximal effort, no conversation",
        color: "#EF4444",
        benefits: &[
            "Develops VO2 max",
            "Improves speed and power",
            "Trains anaerobic tolerance",
        ],
        recommendation: "Limit to short intervals with full recovery",
    },
];

fn round_bpm(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Build five zones from percent bands applied to `f(percent) -> bpm`
fn zones_from_bands(to_bpm: impl Fn(u32) -> u32) -> Vec<HeartRateZone> {
    ZONE_BANDS
        .iter()
        .zip(ZONE_PROFILES.iter())
        .zip(1_u8..)
        .map(|((&(min_percent, max_percent), profile), zone)| HeartRateZone {
            zone,
            name: profile.name.to_owned(),
            description: profile.description.to_owned(),
            min_heart_rate: to_bpm(min_percent),
            max_heart_rate: to_bpm(max_percent),
            min_percent,
            max_percent,
            color: profile.color.to_owned(),
            benefits: profile.benefits.iter().map(|&b| b.to_owned()).collect(),
            recommendation: profile.recommendation.to_owned(),
        })
        .collect()
}

/// Five zones for the given settings
///
/// # Errors
///
/// Returns `AppError::invalid_input` when the settings are inconsistent with
/// their method (Karvonen without a usable resting heart rate, manual zones
/// that are not exactly zones 1 to 5)
pub fn calculate_zones(settings: &ZoneSettings) -> AppResult<Vec<HeartRateZone>> {
    settings.validate()?;
    let max_hr = f64::from(settings.max_heart_rate);

    let zones = match settings.method {
        ZoneMethod::Age => {
            zones_from_bands(|percent| round_bpm(max_hr * f64::from(percent) / 100.0))
        }
        ZoneMethod::Karvonen => {
            let resting = f64::from(settings.resting_heart_rate.unwrap_or_default());
            let reserve = max_hr - resting;
            zones_from_bands(|percent| round_bpm(reserve.mul_add(f64::from(percent) / 100.0, resting)))
        }
        ZoneMethod::Manual => settings.custom_zones.clone().unwrap_or_default(),
    };

    debug!(
        method = %settings.method,
        max_heart_rate = settings.max_heart_rate,
        "calculated heart rate zones"
    );
    Ok(zones)
}

/// Zone number for a heart rate
///
/// The first zone (in order) containing the value wins. Values above the
/// last zone clamp to it, values below the first zone clamp to it, and a
/// value falling in a gap between non-contiguous zones yields `None`.
#[must_use]
pub fn zone_for_heart_rate(zones: &[HeartRateZone], heart_rate: u32) -> Option<u8> {
    if let Some(zone) = zones.iter().find(|zone| zone.contains(heart_rate)) {
        return Some(zone.zone);
    }
    let (first, last) = (zones.first()?, zones.last()?);
    if heart_rate > last.max_heart_rate {
        Some(last.zone)
    } else if heart_rate < first.min_heart_rate {
        Some(first.zone)
    } else {
        None
    }
}

type TrainingRule = fn(&ZonePercentages) -> bool;

fn pct(percentages: &ZonePercentages, zone: u8) -> f64 {
    f64::from(percentages.zone(zone))
}

fn is_recovery(p: &ZonePercentages) -> bool {
    pct(p, 1) + pct(p, 2) > RECOVERY_LOW_ZONES && p.zone1 > p.zone2
}

fn is_endurance(p: &ZonePercentages) -> bool {
    pct(p, 2) + pct(p, 3) > ENDURANCE_AEROBIC_ZONES && p.zone2 > p.zone3
}

fn is_tempo(p: &ZonePercentages) -> bool {
    pct(p, 3) + pct(p, 4) > TEMPO_ZONES && p.zone3 > p.zone4
}

fn is_threshold(p: &ZonePercentages) -> bool {
    pct(p, 4) > THRESHOLD_ZONE4
}

fn is_interval(p: &ZonePercentages) -> bool {
    pct(p, 5) > INTERVAL_ZONE5
        || (pct(p, 4) + pct(p, 5) > INTERVAL_HIGH_ZONES && pct(p, 5) > INTERVAL_ZONE5_SECONDARY)
}

fn is_mixed(p: &ZonePercentages) -> bool {
    f64::from(p.unknown) < MIXED_MAX_UNKNOWN
}

/// Training-type decision list, evaluated top to bottom; first match wins
pub const TRAINING_RULES: [(TrainingRule, TrainingType); 6] = [
    (is_recovery, TrainingType::Recovery),
    (is_endurance, TrainingType::Endurance),
    (is_tempo, TrainingType::Tempo),
    (is_threshold, TrainingType::Threshold),
    (is_interval, TrainingType::Interval),
    (is_mixed, TrainingType::Mixed),
];

/// Ideal zone shares per training type; zones not listed are ignored
const fn ideal_distribution(training_type: TrainingType) -> &'static [(u8, f64)] {
    match training_type {
        TrainingType::Recovery => &[(1, 70.0), (2, 30.0)],
        TrainingType::Endurance => &[(2, 70.0), (3, 20.0), (1, 10.0)],
        TrainingType::Tempo => &[(3, 60.0), (2, 20.0), (4, 20.0)],
        TrainingType::Threshold => &[(4, 60.0), (3, 25.0), (5, 15.0)],
        TrainingType::Interval => &[(5, 40.0), (4, 30.0), (1, 30.0)],
        TrainingType::Mixed => &[(1, 20.0), (2, 20.0), (3, 20.0), (4, 20.0), (5, 20.0)],
        TrainingType::Unknown => &[],
    }
}

const fn training_recommendations(training_type: TrainingType) -> &'static [&'static str] {
    match training_type {
        TrainingType::Recovery => &[
            "Good recovery session; keep the effort conversational",
            "Follow with a quality session once fully recovered",
        ],
        TrainingType::Endurance => &[
            "Solid aerobic base work",
            "Extend duration gradually, no more than 10% per week",
        ],
        TrainingType::Tempo => &[
            "Effective tempo effort",
            "Allow 48 hours before the next hard session",
        ],
        TrainingType::Threshold => &[
            "Hard threshold session; prioritise sleep and nutrition",
            "Schedule an easy day next",
        ],
        TrainingType::Interval => &[
            "High-intensity session completed",
            "Take at least one full recovery day before repeating",
        ],
        TrainingType::Mixed => &[
            "Varied intensity session",
            "Give future sessions a single clear purpose",
        ],
        TrainingType::Unknown => &["Wear a heart rate monitor for zone analysis"],
    }
}

/// Classifies activities against a fixed set of zones
pub struct ZoneClassifier;

impl ZoneClassifier {
    /// Seconds per zone for one activity
    #[must_use]
    pub fn distribution(zones: &[HeartRateZone], activity: &Activity) -> ZoneDistribution {
        let mut distribution = ZoneDistribution::default();
        for lap in activity.laps() {
            for pair in lap.trackpoints.windows(2) {
                let seconds = (pair[1].time - pair[0].time).num_milliseconds() as f64 / 1000.0;
                if seconds <= 0.0 {
                    continue;
                }
                let zone = pair[0]
                    .heart_rate
                    .and_then(|hr| zone_for_heart_rate(zones, hr));
                distribution.add(zone, seconds);
            }
        }
        distribution
    }

    /// Independently rounded share of total time per bucket; all zero for an empty distribution
    #[must_use]
    pub fn percentages(distribution: &ZoneDistribution) -> ZonePercentages {
        let total = distribution.total();
        if total <= 0.0 {
            return ZonePercentages::default();
        }
        let share = |seconds: f64| (seconds / total * 100.0).round() as u32;
        ZonePercentages {
            zone1: share(distribution.zone1),
            zone2: share(distribution.zone2),
            zone3: share(distribution.zone3),
            zone4: share(distribution.zone4),
            zone5: share(distribution.zone5),
            unknown: share(distribution.unknown),
        }
    }

    /// Zone with the most time, lowest number on ties; `None` if every zone is empty
    #[must_use]
    pub fn dominant_zone(distribution: &ZoneDistribution) -> Option<u8> {
        let mut dominant = None;
        let mut best = 0.0;
        for zone in 1..=5 {
            let seconds = distribution.zone(zone);
            if seconds > best {
                best = seconds;
                dominant = Some(zone);
            }
        }
        dominant
    }

    /// Label from the first matching rule of [`TRAINING_RULES`]
    #[must_use]
    pub fn training_type(percentages: &ZonePercentages) -> TrainingType {
        TRAINING_RULES
            .iter()
            .find(|(rule, _)| rule(percentages))
            .map_or(TrainingType::Unknown, |&(_, label)| label)
    }

    /// `100 - mean |actual - ideal|` over the ideal table's zones, floored at 0
    #[must_use]
    pub fn efficiency(training_type: TrainingType, percentages: &ZonePercentages) -> u32 {
        let ideal = ideal_distribution(training_type);
        if ideal.is_empty() {
            return NEUTRAL_EFFICIENCY as u32;
        }
        let deviation: f64 = ideal
            .iter()
            .map(|&(zone, target)| (pct(percentages, zone) - target).abs())
            .sum::<f64>()
            / ideal.len() as f64;
        (100.0 - deviation).max(0.0).round() as u32
    }

    /// Static advice for a training type
    #[must_use]
    pub fn recommendations(training_type: TrainingType) -> Vec<String> {
        training_recommendations(training_type)
            .iter()
            .map(|&line| line.to_owned())
            .collect()
    }

    fn breakdown(
        zones: &[HeartRateZone],
        distribution: &ZoneDistribution,
        percentages: &ZonePercentages,
    ) -> Vec<ZoneTime> {
        zones
            .iter()
            .map(|zone| {
                let seconds = distribution.zone(zone.zone);
                ZoneTime {
                    zone: zone.zone,
                    name: zone.name.clone(),
                    color: zone.color.clone(),
                    seconds,
                    minutes: seconds / SECONDS_PER_MINUTE,
                    percentage: percentages.zone(zone.zone),
                }
            })
            .collect()
    }

    /// Full analysis of one activity against precomputed zones
    #[must_use]
    pub fn analyze_with_zones(zones: &[HeartRateZone], activity: &Activity) -> ZoneAnalysis {
        let distribution = Self::distribution(zones, activity);
        let percentages = Self::percentages(&distribution);
        let training_type = Self::training_type(&percentages);

        debug!(
            activity_id = %activity.id(),
            training_type = %training_type,
            unknown_percent = percentages.unknown,
            "classified activity heart rate zones"
        );

        ZoneAnalysis {
            dominant_zone: Self::dominant_zone(&distribution),
            efficiency: Self::efficiency(training_type, &percentages),
            recommendations: Self::recommendations(training_type),
            breakdown: Self::breakdown(zones, &distribution, &percentages),
            distribution,
            percentages,
            training_type,
        }
    }

    /// Full analysis of one activity: `(settings, activity) -> ZoneAnalysis`
    ///
    /// # Errors
    ///
    /// Returns an error only if the settings themselves are invalid
    pub fn analyze(settings: &ZoneSettings, activity: &Activity) -> AppResult<ZoneAnalysis> {
        let zones = calculate_zones(settings)?;
        Ok(Self::analyze_with_zones(&zones, activity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn percentages(zones: [u32; 5], unknown: u32) -> ZonePercentages {
        ZonePercentages {
            zone1: zones[0],
            zone2: zones[1],
            zone3: zones[2],
            zone4: zones[3],
            zone5: zones[4],
            unknown,
        }
    }

    #[test]
    fn test_age_zones_for_thirty_year_old() {
        let zones = calculate_zones(&ZoneSettings::from_age(30).unwrap()).unwrap();
        assert_eq!(zones.len(), 5);
        assert_eq!((zones[2].min_heart_rate, zones[2].max_heart_rate), (133, 152));
        assert_eq!(zones[4].max_heart_rate, 190);
        assert_eq!(zones.iter().map(|z| z.zone).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_karvonen_zones_offset_by_resting() {
        let zones = calculate_zones(&ZoneSettings::karvonen(190, 60).unwrap()).unwrap();
        // reserve 130: 50% -> 65 + 60
        assert_eq!(zones[0].min_heart_rate, 125);
        assert_eq!(zones[4].max_heart_rate, 190);
    }

    #[test]
    fn test_zone_lookup_clamps_and_gaps() {
        let mut zones = calculate_zones(&ZoneSettings::default()).unwrap();
        assert_eq!(zone_for_heart_rate(&zones, 60), Some(1));
        assert_eq!(zone_for_heart_rate(&zones, 205), Some(5));
        assert_eq!(zone_for_heart_rate(&zones, 140), Some(3));

        zones[2].min_heart_rate = 140;
        assert_eq!(zone_for_heart_rate(&zones, 135), None);
    }

    #[test]
    fn test_recovery_rule_precedes_endurance() {
        // Z1+Z2 = 91 > 60 with Z1 > Z2, and Z2+Z3 = 75 > 70 with Z2 > Z3
        let both = percentages([46, 45, 30, 0, 0], 0);
        assert!(is_recovery(&both) && is_endurance(&both));
        assert_eq!(ZoneClassifier::training_type(&both), TrainingType::Recovery);
    }

    #[test]
    fn test_decision_list_fallbacks() {
        assert_eq!(
            ZoneClassifier::training_type(&percentages([10, 10, 10, 10, 10], 40)),
            TrainingType::Mixed
        );
        assert_eq!(
            ZoneClassifier::training_type(&percentages([0, 0, 0, 0, 0], 100)),
            TrainingType::Unknown
        );
        // no timed intervals at all still falls through to the mixed rule
        assert_eq!(
            ZoneClassifier::training_type(&ZonePercentages::default()),
            TrainingType::Mixed
        );
        assert_eq!(
            ZoneClassifier::training_type(&percentages([0, 0, 20, 35, 17], 28)),
            TrainingType::Interval
        );
    }

    #[test]
    fn test_efficiency_against_ideal() {
        let perfect = percentages([10, 70, 20, 0, 0], 0);
        assert_eq!(ZoneClassifier::efficiency(TrainingType::Endurance, &perfect), 100);
        assert_eq!(
            ZoneClassifier::efficiency(TrainingType::Unknown, &perfect),
            NEUTRAL_EFFICIENCY as u32
        );
        let far = percentages([0, 0, 0, 0, 100], 0);
        assert_eq!(ZoneClassifier::efficiency(TrainingType::Recovery, &far), 50);
    }

    #[test]
    fn test_dominant_zone_ties_go_low() {
        let mut distribution = ZoneDistribution::default();
        distribution.add(Some(4), 300.0);
        distribution.add(Some(2), 300.0);
        distribution.add(None, 900.0);
        assert_eq!(ZoneClassifier::dominant_zone(&distribution), Some(2));
        assert_eq!(ZoneClassifier::dominant_zone(&ZoneDistribution::default()), None);
    }
}
