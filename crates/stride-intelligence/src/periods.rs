// ABOUTME: Calendar period arithmetic: week/month/year bounds, neighbouring periods, grouping keys
// ABOUTME: Weeks run Monday to Sunday; all math is done on the UTC calendar
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;
use stride_core::models::{Activity, DateRange, Grouping, PeriodType};

/// Pure date-range arithmetic with no dependency on activity contents
pub struct PeriodCalculator;

impl PeriodCalculator {
    /// Midnight UTC at the start of `date`
    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        date.and_time(NaiveTime::MIN).and_utc()
    }

    /// Close a half-open `[start, next_start)` interval into an inclusive range
    fn inclusive(start: DateTime<Utc>, next_start: DateTime<Utc>) -> DateRange {
        DateRange::new(start, next_start - Duration::milliseconds(1))
    }

    /// Monday 00:00 through Sunday 23:59:59.999 of the week containing `date`
    #[must_use]
    pub fn week_range(date: DateTime<Utc>) -> DateRange {
        let day = date.date_naive();
        let monday = day - Days::new(u64::from(day.weekday().num_days_from_monday()));
        let start = Self::midnight(monday);
        Self::inclusive(start, start + Duration::days(7))
    }

    /// First through last instant of the calendar month containing `date`
    #[must_use]
    pub fn month_range(date: DateTime<Utc>) -> DateRange {
        let day = date.date_naive();
        let first = day - Days::new(u64::from(day.day0()));
        Self::inclusive(Self::midnight(first), Self::midnight(first + Months::new(1)))
    }

    /// January 1 through December 31 of the year containing `date`
    #[must_use]
    pub fn year_range(date: DateTime<Utc>) -> DateRange {
        let day = date.date_naive();
        let first = day - Days::new(u64::from(day.ordinal0()));
        Self::inclusive(Self::midnight(first), Self::midnight(first + Months::new(12)))
    }

    /// Bounds of the `period_type` period containing `date`
    ///
    /// `Custom` has no calendar rule of its own and is treated as a week.
    #[must_use]
    pub fn period_range(period_type: PeriodType, date: DateTime<Utc>) -> DateRange {
        match period_type {
            PeriodType::Week | PeriodType::Custom => Self::week_range(date),
            PeriodType::Month => Self::month_range(date),
            PeriodType::Year => Self::year_range(date),
        }
    }

    /// Period immediately before the one containing `date`
    #[must_use]
    pub fn previous_period(period_type: PeriodType, date: DateTime<Utc>) -> DateRange {
        let current = Self::period_range(period_type, date);
        Self::period_range(period_type, current.start - Duration::milliseconds(1))
    }

    /// Period immediately after the one containing `date`
    #[must_use]
    pub fn next_period(period_type: PeriodType, date: DateTime<Utc>) -> DateRange {
        let current = Self::period_range(period_type, date);
        Self::period_range(period_type, current.end + Duration::milliseconds(1))
    }

    /// `count` consecutive periods ending with the one containing `anchor`, oldest first
    #[must_use]
    pub fn trailing_periods(
        period_type: PeriodType,
        anchor: DateTime<Utc>,
        count: usize,
    ) -> Vec<DateRange> {
        let mut ranges = Vec::with_capacity(count);
        let mut cursor = anchor;
        for _ in 0..count {
            let range = Self::period_range(period_type, cursor);
            cursor = range.start - Duration::milliseconds(1);
            ranges.push(range);
        }
        ranges.reverse();
        ranges
    }

    /// Activities whose start time lies in `range`, both ends inclusive
    #[must_use]
    pub fn filter_by_range(activities: &[Activity], range: DateRange) -> Vec<&Activity> {
        activities
            .iter()
            .filter(|activity| range.contains(activity.start_time()))
            .collect()
    }

    /// Deterministic grouping key for `date`
    ///
    /// Week keys are `{iso_year}-W{iso_week}`. The ISO week-numbering year can
    /// differ from the calendar year of `date` near New Year: 2024-12-30 keys
    /// as `2025-W1`, and 2021-01-01 keys as `2020-W53`.
    #[must_use]
    pub fn group_key(grouping: Grouping, date: DateTime<Utc>) -> String {
        match grouping {
            Grouping::Day => date.date_naive().to_string(),
            Grouping::Week => {
                let week = date.iso_week();
                format!("{}-W{}", week.year(), week.week())
            }
            Grouping::Month => format!("{}-{:02}", date.year(), date.month()),
            Grouping::Year => date.year().to_string(),
        }
    }

    /// Bucket activities by `grouping` key; keys iterate in lexical order
    #[must_use]
    pub fn group_by(grouping: Grouping, activities: &[Activity]) -> BTreeMap<String, Vec<&Activity>> {
        let mut groups: BTreeMap<String, Vec<&Activity>> = BTreeMap::new();
        for activity in activities {
            groups
                .entry(Self::group_key(grouping, activity.start_time()))
                .or_default()
                .push(activity);
        }
        groups
    }

    /// Display label for a range produced by [`Self::period_range`]
    #[must_use]
    pub fn period_label(period_type: PeriodType, range: DateRange) -> String {
        match period_type {
            PeriodType::Week => Self::group_key(Grouping::Week, range.start),
            PeriodType::Month => Self::group_key(Grouping::Month, range.start),
            PeriodType::Year => Self::group_key(Grouping::Year, range.start),
            PeriodType::Custom => format!(
                "{} to {}",
                range.start.date_naive(),
                range.end.date_naive()
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // Sunday 2024-03-10
        let range = PeriodCalculator::week_range(at(2024, 3, 10, 22));
        assert_eq!(range.start, at(2024, 3, 4, 0));
        assert_eq!(range.end, at(2024, 3, 11, 0) - Duration::milliseconds(1));

        // Monday belongs to its own week
        let monday = PeriodCalculator::week_range(at(2024, 3, 11, 0));
        assert_eq!(monday.start, at(2024, 3, 11, 0));
    }

    #[test]
    fn test_month_range_handles_leap_february() {
        let range = PeriodCalculator::month_range(at(2024, 2, 14, 9));
        assert_eq!(range.start, at(2024, 2, 1, 0));
        assert_eq!(range.end.date_naive().to_string(), "2024-02-29");
    }

    #[test]
    fn test_previous_and_next_cross_year_boundaries() {
        let prev = PeriodCalculator::previous_period(PeriodType::Month, at(2024, 1, 15, 0));
        assert_eq!(prev.start, at(2023, 12, 1, 0));

        let next = PeriodCalculator::next_period(PeriodType::Year, at(2024, 6, 1, 0));
        assert_eq!(next.start, at(2025, 1, 1, 0));
        assert_eq!(next.end.date_naive().to_string(), "2025-12-31");
    }

    #[test]
    fn test_custom_previous_period_is_a_week() {
        let prev = PeriodCalculator::previous_period(PeriodType::Custom, at(2024, 3, 6, 12));
        assert_eq!(prev.start, at(2024, 2, 26, 0));
    }

    #[test]
    fn test_group_keys() {
        let date = at(2024, 5, 1, 8);
        assert_eq!(PeriodCalculator::group_key(Grouping::Day, date), "2024-05-01");
        assert_eq!(PeriodCalculator::group_key(Grouping::Week, date), "2024-W18");
        assert_eq!(PeriodCalculator::group_key(Grouping::Month, date), "2024-05");
        assert_eq!(PeriodCalculator::group_key(Grouping::Year, date), "2024");
        assert_eq!(
            PeriodCalculator::group_key(Grouping::Week, at(2024, 12, 30, 0)),
            "2025-W1"
        );
        assert_eq!(
            PeriodCalculator::group_key(Grouping::Week, at(2021, 1, 1, 0)),
            "2020-W53"
        );
    }

    #[test]
    fn test_trailing_periods_are_contiguous() {
        let ranges = PeriodCalculator::trailing_periods(PeriodType::Week, at(2024, 3, 6, 0), 3);
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[2].start, at(2024, 3, 4, 0));
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end + Duration::milliseconds(1), pair[1].start);
        }
    }
}
