// ABOUTME: Dashboard aggregation of logged meal calories into calendar buckets
// ABOUTME: Sunday-anchored weekly day buckets and day-1-anchored monthly 7-day spans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Dashboard Aggregator
//!
//! The weekly view is always the Sunday-to-Saturday week containing the reference date.
//! The monthly view walks 7-day spans from the 1st of the month regardless of weekday,
//! clipping the last span to month end. The two anchorings differ and both are kept as
//! clients already render them.
//!
//! Each builder issues a single range lookup to the [`MealCalorieSource`] and then sums
//! in memory.

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate};
use gohealth_core::constants::dashboard::{DAYS_PER_WEEK, WEEK_LABEL_PREFIX};
use gohealth_core::dates::last_of_month;
use gohealth_core::errors::{AppError, AppResult};
use gohealth_core::models::{DailyCalorieBucket, DateSpan, MealCalorieEntry, WeeklyCalorieBucket};
use tracing::debug;

/// Meal lookup collaborator, already scoped to one user
#[async_trait]
pub trait MealCalorieSource: Send + Sync {
    /// Calories of every meal dated within `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    async fn meal_calories_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealCalorieEntry>>;
}

/// The seven consecutive days from the Sunday on or before `reference`
#[must_use]
pub fn weekly_spans(reference: NaiveDate) -> Vec<NaiveDate> {
    let offset = u64::from(reference.weekday().num_days_from_sunday());
    let sunday = reference.checked_sub_days(Days::new(offset)).unwrap_or(reference);
    sunday.iter_days().take(DAYS_PER_WEEK as usize).collect()
}

/// Consecutive 7-day spans starting on day 1 of the month, the last one clipped to month end
///
/// # Errors
///
/// Returns `InvalidInput` if `year`/`month` do not name a calendar month.
pub fn monthly_spans(year: i32, month: u32) -> AppResult<Vec<DateSpan>> {
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, month, 1),
        last_of_month(year, month),
    ) else {
        return Err(AppError::invalid_input(format!(
            "{year}-{month:02} is not a valid month"
        )));
    };

    let step = Days::new(DAYS_PER_WEEK as u64);
    let mut spans = Vec::with_capacity(5);
    let mut start = first;
    while start <= last {
        let end = start
            .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
            .map_or(last, |end| end.min(last));
        spans.push(DateSpan { start, end });
        match start.checked_add_days(step) {
            Some(next) => start = next,
            None => break,
        }
    }
    Ok(spans)
}

/// Day buckets for the week containing `reference`, summed from `entries`
///
/// Entries outside the week are ignored.
#[must_use]
pub fn weekly_buckets_from_entries(
    reference: NaiveDate,
    entries: &[MealCalorieEntry],
) -> Vec<DailyCalorieBucket> {
    weekly_spans(reference)
        .into_iter()
        .map(|date| DailyCalorieBucket {
            label: date.format("%a").to_string(),
            date,
            calories: entries
                .iter()
                .filter(|entry| entry.date == date)
                .map(|entry| entry.total_calories)
                .sum(),
        })
        .collect()
}

/// Span buckets for a month, summed from `entries`
///
/// # Errors
///
/// Returns `InvalidInput` if `year`/`month` do not name a calendar month.
pub fn monthly_buckets_from_entries(
    year: i32,
    month: u32,
    entries: &[MealCalorieEntry],
) -> AppResult<Vec<WeeklyCalorieBucket>> {
    Ok(monthly_spans(year, month)?
        .into_iter()
        .enumerate()
        .map(|(idx, span)| WeeklyCalorieBucket {
            label: format!("{WEEK_LABEL_PREFIX} {}", idx + 1),
            start: span.start,
            end: span.end,
            calories: entries
                .iter()
                .filter(|entry| span.contains(entry.date))
                .map(|entry| entry.total_calories)
                .sum(),
        })
        .collect())
}

/// Weekly view: seven day buckets, Sunday first
///
/// # Errors
///
/// Propagates meal lookup failures.
pub async fn build_weekly_buckets(
    source: &dyn MealCalorieSource,
    reference: NaiveDate,
) -> AppResult<Vec<DailyCalorieBucket>> {
    let days = weekly_spans(reference);
    let (Some(&start), Some(&end)) = (days.first(), days.last()) else {
        return Ok(Vec::new());
    };

    let entries = source.meal_calories_between(start, end).await?;
    debug!(%start, %end, meals = entries.len(), "Building weekly calorie buckets");
    Ok(weekly_buckets_from_entries(reference, &entries))
}

/// Monthly view: 7-day spans from the 1st, labelled `Week 1`, `Week 2`, ...
///
/// # Errors
///
/// Returns `InvalidInput` for an impossible month and propagates meal lookup failures.
pub async fn build_monthly_buckets(
    source: &dyn MealCalorieSource,
    year: i32,
    month: u32,
) -> AppResult<Vec<WeeklyCalorieBucket>> {
    let spans = monthly_spans(year, month)?;
    let (Some(first), Some(last)) = (spans.first(), spans.last()) else {
        return Ok(Vec::new());
    };

    let entries = source.meal_calories_between(first.start, last.end).await?;
    debug!(year, month, meals = entries.len(), "Building monthly calorie buckets");
    monthly_buckets_from_entries(year, month, &entries)
}
