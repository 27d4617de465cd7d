// ABOUTME: Analytics service: period statistics, comparisons, evolution series, and grouped summaries
// ABOUTME: Loads activities per call and delegates all math to the trend aggregator
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use stride_core::errors::AppResult;
use stride_core::models::{
    ComparisonData, DateRange, EvolutionMetric, EvolutionMetricKind, Grouping, PeriodStatistics,
    PeriodType,
};
use stride_intelligence::{PeriodCalculator, TrendAggregator};
use tracing::debug;

use crate::storage::ActivityStore;

/// Period aggregation over stored activities
pub struct AnalyticsService {
    store: Arc<dyn ActivityStore>,
    aggregator: TrendAggregator,
}

impl AnalyticsService {
    /// Service over `store` using `aggregator` for trend thresholds
    pub fn new(store: Arc<dyn ActivityStore>, aggregator: TrendAggregator) -> Self {
        Self { store, aggregator }
    }

    /// Statistics of the `period_type` period containing `date`
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn period_statistics(
        &self,
        period_type: PeriodType,
        date: DateTime<Utc>,
    ) -> AppResult<(DateRange, PeriodStatistics)> {
        let activities = self.store.list_activities().await?;
        let range = PeriodCalculator::period_range(period_type, date);
        Ok((range, TrendAggregator::period_statistics(&activities, range)))
    }

    /// Statistics of an explicit range
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn range_statistics(&self, range: DateRange) -> AppResult<PeriodStatistics> {
        let activities = self.store.list_activities().await?;
        Ok(TrendAggregator::period_statistics(&activities, range))
    }

    /// The period containing `date` against the one before it
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn compare(
        &self,
        period_type: PeriodType,
        date: DateTime<Utc>,
    ) -> AppResult<ComparisonData> {
        let activities = self.store.list_activities().await?;
        Ok(TrendAggregator::compare(&activities, period_type, date))
    }

    /// Two caller-supplied ranges
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn compare_ranges(
        &self,
        current: DateRange,
        previous: DateRange,
    ) -> AppResult<ComparisonData> {
        let activities = self.store.list_activities().await?;
        Ok(TrendAggregator::compare_ranges(&activities, current, previous))
    }

    /// Evolution series of `metric` over `periods` trailing periods ending at `anchor`
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn evolution(
        &self,
        metric: EvolutionMetricKind,
        period_type: PeriodType,
        anchor: DateTime<Utc>,
        periods: usize,
    ) -> AppResult<EvolutionMetric> {
        let activities = self.store.list_activities().await?;
        Ok(self
            .aggregator
            .evolution(&activities, metric, period_type, anchor, periods))
    }

    /// Statistics per group key (day, week, month, or year)
    ///
    /// # Errors
    ///
    /// Returns storage errors
    pub async fn summary_by(
        &self,
        grouping: Grouping,
    ) -> AppResult<BTreeMap<String, PeriodStatistics>> {
        let activities = self.store.list_activities().await?;
        let summaries: BTreeMap<String, PeriodStatistics> =
            PeriodCalculator::group_by(grouping, &activities)
                .into_iter()
                .map(|(key, group)| (key, TrendAggregator::summarize(group)))
                .collect();
        debug!(groups = summaries.len(), grouping = ?grouping, "built grouped summaries");
        Ok(summaries)
    }
}
