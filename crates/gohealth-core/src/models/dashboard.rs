// ABOUTME: Dashboard aggregation models for calorie time buckets
// ABOUTME: MealCalorieEntry, DateSpan, DailyCalorieBucket and WeeklyCalorieBucket
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::dates::dd_mm_yyyy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calories of one logged meal on a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCalorieEntry {
    /// Day the meal was logged for
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Calories of the meal
    pub total_calories: f64,
}

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    /// First day
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateSpan {
    /// Whether `date` falls inside the span
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Calories logged on one day of a weekly view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCalorieBucket {
    /// Short weekday name (`Sun` .. `Sat`)
    pub label: String,
    /// The day
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Sum of meal calories on `date`
    pub calories: f64,
}

/// Calories logged over one span of a monthly view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCalorieBucket {
    /// `Week 1`, `Week 2`, ...
    pub label: String,
    /// First day of the span
    #[serde(with = "dd_mm_yyyy")]
    pub start: NaiveDate,
    /// Last day of the span, never past month end
    #[serde(with = "dd_mm_yyyy")]
    pub end: NaiveDate,
    /// Sum of meal calories inside the span
    pub calories: f64,
}
