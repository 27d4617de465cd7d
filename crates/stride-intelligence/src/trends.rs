// ABOUTME: Period aggregation, period-over-period comparison, and evolution series with trend direction
// ABOUTME: Recomputes per-activity statistics on every call; nothing is cached
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Utc};
use stride_core::constants::trends::{GROWTH_FROM_ZERO_PERCENT, STABLE_THRESHOLD_PERCENT};
use stride_core::constants::units::{METERS_PER_KM, MPS_TO_KMH, SECONDS_PER_HOUR};
use stride_core::models::{
    Activity, ComparisonData, DateRange, EvolutionMetric, EvolutionMetricKind, EvolutionPoint,
    PeriodChanges, PeriodStatistics, PeriodType, TrendDirection,
};
use tracing::debug;

use crate::periods::PeriodCalculator;
use crate::statistics::{mean, safe_divide, StatisticsEngine};

/// Percent change from `old` to `new`
///
/// A zero baseline yields 100 for any growth and 0 otherwise.
#[must_use]
pub fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        if new > 0.0 {
            GROWTH_FROM_ZERO_PERCENT
        } else {
            0.0
        }
    } else {
        (new - old) / old * 100.0
    }
}

/// Aggregates activities over calendar periods
#[derive(Debug, Clone, Copy)]
pub struct TrendAggregator {
    stable_threshold: f64,
}

impl Default for TrendAggregator {
    fn default() -> Self {
        Self::new(STABLE_THRESHOLD_PERCENT)
    }
}

impl TrendAggregator {
    /// Aggregator treating `|change| < stable_threshold` percent as stable
    #[must_use]
    pub const fn new(stable_threshold: f64) -> Self {
        Self { stable_threshold }
    }

    /// Stable-trend threshold in percent
    #[must_use]
    pub const fn stable_threshold(&self) -> f64 {
        self.stable_threshold
    }

    /// Summary of the activities that started inside `range`
    #[must_use]
    pub fn period_statistics(activities: &[Activity], range: DateRange) -> PeriodStatistics {
        Self::summarize(PeriodCalculator::filter_by_range(activities, range))
    }

    /// Summary of an already selected set of activities
    #[must_use]
    pub fn summarize<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> PeriodStatistics {
        let mut summary = PeriodStatistics::default();
        let mut heart_rates = Vec::new();
        let mut cadences = Vec::new();

        for activity in activities {
            let stats = StatisticsEngine::calculate(activity);
            summary.activity_count += 1;
            summary.total_distance += activity.distance_meters();
            summary.total_time += activity.total_time_seconds();
            summary.total_calories += stats.total_calories.unwrap_or_default();
            summary.total_elevation_gain += stats.elevation_gain.unwrap_or_default();
            heart_rates.extend(stats.average_heart_rate);
            cadences.extend(stats.average_cadence);

            let sport = summary.by_sport.entry(activity.sport().to_owned()).or_default();
            sport.count += 1;
            sport.distance += activity.distance_meters();
            sport.time += activity.total_time_seconds();
        }

        summary.average_speed = safe_divide(summary.total_distance, summary.total_time);
        summary.average_heart_rate = mean(&heart_rates);
        summary.average_cadence = mean(&cadences);
        summary
    }

    /// Percent change per metric from `previous` to `current`
    #[must_use]
    pub fn changes(current: &PeriodStatistics, previous: &PeriodStatistics) -> PeriodChanges {
        PeriodChanges {
            activities: percent_change(
                previous.activity_count as f64,
                current.activity_count as f64,
            ),
            distance: percent_change(previous.total_distance, current.total_distance),
            time: percent_change(previous.total_time, current.total_time),
            calories: percent_change(previous.total_calories, current.total_calories),
            elevation_gain: percent_change(
                previous.total_elevation_gain,
                current.total_elevation_gain,
            ),
            average_speed: percent_change(previous.average_speed, current.average_speed),
            average_heart_rate: current
                .average_heart_rate
                .zip(previous.average_heart_rate)
                .map(|(now, before)| percent_change(before, now)),
        }
    }

    /// Compare two explicit ranges
    #[must_use]
    pub fn compare_ranges(
        activities: &[Activity],
        current_range: DateRange,
        previous_range: DateRange,
    ) -> ComparisonData {
        let current = Self::period_statistics(activities, current_range);
        let previous = Self::period_statistics(activities, previous_range);
        let changes = Self::changes(&current, &previous);
        ComparisonData {
            current_range,
            previous_range,
            current,
            previous,
            changes,
        }
    }

    /// Compare the period containing `date` with the one before it
    #[must_use]
    pub fn compare(
        activities: &[Activity],
        period_type: PeriodType,
        date: DateTime<Utc>,
    ) -> ComparisonData {
        Self::compare_ranges(
            activities,
            PeriodCalculator::period_range(period_type, date),
            PeriodCalculator::previous_period(period_type, date),
        )
    }

    /// Value of `metric` in display units; `None` only for heart rate without data
    #[must_use]
    pub fn metric_value(metric: EvolutionMetricKind, stats: &PeriodStatistics) -> Option<f64> {
        match metric {
            EvolutionMetricKind::Distance => Some(stats.total_distance / METERS_PER_KM),
            EvolutionMetricKind::Time => Some(stats.total_time / SECONDS_PER_HOUR),
            EvolutionMetricKind::Speed => Some(stats.average_speed * MPS_TO_KMH),
            EvolutionMetricKind::HeartRate => stats.average_heart_rate,
            EvolutionMetricKind::Count => Some(stats.activity_count as f64),
        }
    }

    /// Direction and percent change of the second half's mean over the first half's
    ///
    /// Fewer than two values is always stable.
    #[must_use]
    pub fn trend_direction(&self, values: &[f64]) -> (TrendDirection, f64) {
        if values.len() < 2 {
            return (TrendDirection::Stable, 0.0);
        }
        let (first_half, second_half) = values.split_at(values.len() / 2);
        let change = percent_change(
            mean(first_half).unwrap_or_default(),
            mean(second_half).unwrap_or_default(),
        );
        let direction = if change.abs() < self.stable_threshold {
            TrendDirection::Stable
        } else if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        (direction, change)
    }

    /// Series of `metric` over `periods` trailing periods ending with the one containing `anchor`
    #[must_use]
    pub fn evolution(
        &self,
        activities: &[Activity],
        metric: EvolutionMetricKind,
        period_type: PeriodType,
        anchor: DateTime<Utc>,
        periods: usize,
    ) -> EvolutionMetric {
        let points: Vec<EvolutionPoint> =
            PeriodCalculator::trailing_periods(period_type, anchor, periods)
                .into_iter()
                .map(|range| {
                    let stats = Self::period_statistics(activities, range);
                    EvolutionPoint {
                        label: PeriodCalculator::period_label(period_type, range),
                        range,
                        value: Self::metric_value(metric, &stats),
                    }
                })
                .collect();

        let present: Vec<f64> = points.iter().filter_map(|point| point.value).collect();
        let (trend, change_percent) = self.trend_direction(&present);

        debug!(
            metric = ?metric,
            period_type = %period_type,
            points = points.len(),
            trend = ?trend,
            "built evolution series"
        );

        EvolutionMetric {
            metric,
            period_type,
            average: mean(&present).unwrap_or_default(),
            points,
            trend,
            change_percent,
        }
    }
}
