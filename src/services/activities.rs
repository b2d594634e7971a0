// ABOUTME: Activity logging against the MET reference table with calorie burn estimates
// ABOUTME: Range listings and per-day totals broken down by activity category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::profile::require_weight;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{ActivityLog, ActivityType};
use chrono::{NaiveDate, Utc};
use gohealth_core::models::{ActivityCategory, Intensity};
use gohealth_intelligence::calculate_activity_calories;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A new activity entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    /// Reference type slug
    pub activity_type_id: String,
    /// Day of the activity
    pub date: NaiveDate,
    /// Minutes, positive
    pub duration: f64,
    /// Self-reported intensity
    pub intensity: Option<Intensity>,
    /// Notes
    pub notes: Option<String>,
}

/// Edits to a logged activity; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityChanges {
    /// New duration in minutes
    pub duration: Option<f64>,
    /// New intensity
    pub intensity: Option<Intensity>,
    /// New notes
    pub notes: Option<String>,
}

/// Totals for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    /// Minutes
    pub duration: f64,
    /// kcal
    pub calories_burned: i64,
    /// Entries
    pub count: usize,
}

/// Totals over a set of activities
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Minutes
    pub total_duration: f64,
    /// kcal
    pub total_calories_burned: i64,
    /// Entries
    pub activity_count: usize,
    /// Keyed by category name
    pub by_category: BTreeMap<String, CategoryTotals>,
}

/// One day's activities with totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivities {
    /// Totals
    pub summary: ActivitySummary,
    /// Entries, newest first
    pub activities: Vec<ActivityLog>,
}

/// Sum duration and burn overall and per category
#[must_use]
pub fn summarize_activities(activities: &[ActivityLog]) -> ActivitySummary {
    activities
        .iter()
        .fold(ActivitySummary::default(), |mut summary, activity| {
            summary.total_duration += activity.duration;
            summary.total_calories_burned += activity.calories_burned;
            summary.activity_count += 1;

            let totals = summary
                .by_category
                .entry(activity.category.as_str().to_owned())
                .or_default();
            totals.duration += activity.duration;
            totals.calories_burned += activity.calories_burned;
            totals.count += 1;
            summary
        })
}

/// Reference activity types, optionally of one category
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn activity_types(
    database: &Database,
    category: Option<ActivityCategory>,
) -> AppResult<Vec<ActivityType>> {
    database.list_activity_types(category).await
}

/// Log an activity, estimating calories from MET, profile weight and duration
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown activity type and `ProfileIncomplete`
/// when the profile has no weight
pub async fn log_activity(
    database: &Database,
    user_id: Uuid,
    input: NewActivity,
) -> AppResult<ActivityLog> {
    let activity_type = database
        .get_activity_type(&input.activity_type_id)
        .await?
        .ok_or_else(|| AppError::not_found("Activity type"))?;
    let weight = require_weight(database, user_id).await?;

    let activity = ActivityLog {
        id: Uuid::new_v4(),
        user_id,
        calories_burned: calculate_activity_calories(
            activity_type.met_value,
            weight,
            input.duration,
        ),
        activity_type_id: activity_type.id,
        activity_name: activity_type.name,
        category: activity_type.category,
        met_value: activity_type.met_value,
        date: input.date,
        duration: input.duration,
        intensity: input.intensity,
        notes: input.notes,
        created_at: Utc::now(),
    };

    database.insert_activity(&activity).await?;
    AppLogger::log_activity_logged(user_id, &activity.activity_name, activity.calories_burned);
    Ok(activity)
}

/// Edit an activity, recalculating calories when the duration changes
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such activity
pub async fn update_activity(
    database: &Database,
    user_id: Uuid,
    activity_id: Uuid,
    changes: ActivityChanges,
) -> AppResult<ActivityLog> {
    let mut activity = database
        .get_activity(user_id, activity_id)
        .await?
        .ok_or_else(|| AppError::not_found("Activity"))?;

    if let Some(duration) = changes.duration {
        if (duration - activity.duration).abs() > f64::EPSILON {
            let weight = require_weight(database, user_id).await?;
            activity.calories_burned =
                calculate_activity_calories(activity.met_value, weight, duration);
            activity.duration = duration;
        }
    }
    if let Some(intensity) = changes.intensity {
        activity.intensity = Some(intensity);
    }
    if let Some(notes) = changes.notes {
        activity.notes = Some(notes);
    }

    database.update_activity(&activity).await?;
    Ok(activity)
}

/// Delete an activity
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such activity
pub async fn delete_activity(database: &Database, user_id: Uuid, activity_id: Uuid) -> AppResult<()> {
    if database.delete_activity(user_id, activity_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Activity"))
    }
}

/// Activities within `[start, end]`
///
/// # Errors
///
/// Returns `InvalidInput` when `end` precedes `start`
pub async fn list_activities(
    database: &Database,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<ActivityLog>> {
    if end < start {
        return Err(AppError::invalid_input("endDate must not be before startDate"));
    }
    database.activities_between(user_id, start, end).await
}

/// One day's activities and totals
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn daily_summary(
    database: &Database,
    user_id: Uuid,
    date: NaiveDate,
) -> AppResult<DailyActivities> {
    let activities = database.activities_between(user_id, date, date).await?;
    Ok(DailyActivities {
        summary: summarize_activities(&activities),
        activities,
    })
}
