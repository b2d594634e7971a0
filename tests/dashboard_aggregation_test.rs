// ABOUTME: Tests for weekly and monthly calorie bucketing over a meal lookup
// ABOUTME: Sunday-anchored weeks, day-1-anchored month spans and single range lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use gohealth_core::errors::{AppResult, ErrorCode};
use gohealth_core::models::MealCalorieEntry;
use gohealth_intelligence::{
    build_monthly_buckets, build_weekly_buckets, monthly_spans, weekly_spans, MealCalorieSource,
};
use std::sync::Mutex;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(d: NaiveDate, calories: f64) -> MealCalorieEntry {
    MealCalorieEntry {
        date: d,
        total_calories: calories,
    }
}

/// In-memory meal lookup that records each requested range
struct FakeMeals {
    entries: Vec<MealCalorieEntry>,
    calls: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

impl FakeMeals {
    fn new(entries: Vec<MealCalorieEntry>) -> Self {
        Self {
            entries,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MealCalorieSource for FakeMeals {
    async fn meal_calories_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealCalorieEntry>> {
        self.calls.lock().unwrap().push((start, end));
        Ok(self
            .entries
            .iter()
            .filter(|e| start <= e.date && e.date <= end)
            .copied()
            .collect())
    }
}

#[test]
fn test_week_of_a_sunday_starts_that_day() {
    // 2025-03-02 is a Sunday
    let days = weekly_spans(date(2025, 3, 2));
    assert_eq!(days.len(), 7);
    assert_eq!(days[0], date(2025, 3, 2));
    assert_eq!(days[6], date(2025, 3, 8));
}

#[test]
fn test_week_crossing_month_boundary() {
    // 2025-03-01 is a Saturday; its week starts Sunday 2025-02-23
    let days = weekly_spans(date(2025, 3, 1));
    assert_eq!(days[0], date(2025, 2, 23));
    assert_eq!(days[6], date(2025, 3, 1));
}

#[test]
fn test_month_spans_ignore_weekday() {
    let spans = monthly_spans(2025, 3).unwrap();
    let bounds: Vec<(u32, u32)> = spans
        .iter()
        .map(|s| (s.start.day(), s.end.day()))
        .collect();
    assert_eq!(bounds, vec![(1, 7), (8, 14), (15, 21), (22, 28), (29, 31)]);
    assert_eq!(spans[4].days(), 3);
}

#[test]
fn test_28_day_february_has_four_full_spans() {
    let spans = monthly_spans(2026, 2).unwrap();
    assert_eq!(spans.len(), 4);
    assert!(spans.iter().all(|s| s.days() == 7));
}

#[tokio::test]
async fn test_weekly_buckets_sum_per_day_with_one_lookup() {
    let meals = FakeMeals::new(vec![
        entry(date(2025, 3, 10), 400.0),
        entry(date(2025, 3, 10), 350.5),
        entry(date(2025, 3, 13), 900.0),
        entry(date(2025, 3, 20), 1000.0),
    ]);

    // Wednesday 2025-03-12; week is 09..15
    let buckets = build_weekly_buckets(&meals, date(2025, 3, 12)).await.unwrap();
    assert_eq!(meals.calls(), vec![(date(2025, 3, 9), date(2025, 3, 15))]);

    let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);
    assert!((buckets[1].calories - 750.5).abs() < 1e-9);
    assert!((buckets[4].calories - 900.0).abs() < 1e-9);
    assert!(buckets[0].calories.abs() < 1e-9);
    let total: f64 = buckets.iter().map(|b| b.calories).sum();
    assert!((total - 1650.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_monthly_buckets_label_and_sum_spans() {
    let meals = FakeMeals::new(vec![
        entry(date(2025, 3, 1), 500.0),
        entry(date(2025, 3, 7), 700.0),
        entry(date(2025, 3, 8), 300.0),
        entry(date(2025, 3, 31), 250.0),
        entry(date(2025, 4, 1), 9999.0),
    ]);

    let buckets = build_monthly_buckets(&meals, 2025, 3).await.unwrap();
    assert_eq!(meals.calls(), vec![(date(2025, 3, 1), date(2025, 3, 31))]);
    assert_eq!(buckets.len(), 5);
    assert_eq!(buckets[0].label, "Week 1");
    assert_eq!(buckets[4].label, "Week 5");
    assert!((buckets[0].calories - 1200.0).abs() < 1e-9);
    assert!((buckets[1].calories - 300.0).abs() < 1e-9);
    assert!((buckets[4].calories - 250.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_monthly_buckets_reject_invalid_month() {
    let meals = FakeMeals::new(Vec::new());
    let err = build_monthly_buckets(&meals, 2025, 0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert!(meals.calls().is_empty());
}

/// One entry per day from `start`, calories varying with the day of year
fn daily_entries(start: NaiveDate, days: usize) -> Vec<MealCalorieEntry> {
    start
        .iter_days()
        .take(days)
        .map(|d| entry(d, f64::from(100 + d.ordinal() % 17 * 25)))
        .collect()
}

#[test]
fn test_month_spans_tile_every_month() {
    // Century, leap and ordinary years
    for year in [1900, 2000, 2023, 2024, 2025, 2100] {
        for month in 1..=12 {
            let spans = monthly_spans(year, month).unwrap();
            let first = date(year, month, 1);
            let last = gohealth_core::dates::last_of_month(year, month).unwrap();

            assert_eq!(spans.first().unwrap().start, first, "{year}-{month}");
            assert_eq!(spans.last().unwrap().end, last, "{year}-{month}");
            for span in &spans {
                assert!(span.start <= span.end);
                assert!(span.days() <= 7);
                assert_eq!(span.start.month(), month);
                assert_eq!(span.end.month(), month);
            }
            for pair in spans.windows(2) {
                assert_eq!(
                    pair[0].end.checked_add_days(Days::new(1)),
                    Some(pair[1].start),
                    "gap or overlap in {year}-{month}"
                );
            }
            let covered: i64 = spans.iter().map(|s| s.days()).sum();
            assert_eq!(covered, i64::from(last.day()));
        }
    }
}

#[test]
fn test_weekly_spans_start_on_preceding_sunday() {
    for reference in date(2023, 12, 1).iter_days().take(400) {
        let days = weekly_spans(reference);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), Weekday::Sun, "{reference}");
        assert!(days[0] <= reference && reference <= days[6]);
        assert!((reference - days[0]).num_days() < 7);
        for pair in days.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
    }
}

#[tokio::test]
async fn test_weekly_bucket_totals_match_meals_in_range() {
    let meals = FakeMeals::new(daily_entries(date(2024, 12, 1), 90));

    for reference in date(2024, 12, 8).iter_days().take(60) {
        let buckets = build_weekly_buckets(&meals, reference).await.unwrap();
        let (start, end) = (buckets[0].date, buckets[6].date);
        let expected: f64 = meals
            .entries
            .iter()
            .filter(|e| start <= e.date && e.date <= end)
            .map(|e| e.total_calories)
            .sum();
        let total: f64 = buckets.iter().map(|b| b.calories).sum();
        assert!((total - expected).abs() < 1e-9, "{reference}");
    }
}

#[tokio::test]
async fn test_monthly_bucket_totals_match_meals_in_month() {
    let meals = FakeMeals::new(daily_entries(date(2023, 12, 20), 460));

    for (year, month) in (1..=12).map(|m| (2024, m)) {
        let buckets = build_monthly_buckets(&meals, year, month).await.unwrap();
        let expected: f64 = meals
            .entries
            .iter()
            .filter(|e| e.date.year() == year && e.date.month() == month)
            .map(|e| e.total_calories)
            .sum();
        let total: f64 = buckets.iter().map(|b| b.calories).sum();
        assert!((total - expected).abs() < 1e-9, "{year}-{month}");
    }
}
