// ABOUTME: Dashboard aggregation for one day plus the weekly or monthly calorie tracker
// ABOUTME: Consumed, burned, BMR-adjusted net and target calories with active goal and latest BMI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::activities::{summarize_activities, ActivitySummary};
use super::bmi::{active_goal, ActiveGoal};
use super::profile::{current_calorie_target, ProfileView};
use crate::database::{Database, UserMealCalories};
use crate::errors::{AppError, AppResult};
use crate::models::{BmiRecord, NutritionTotals};
use chrono::{Datelike, NaiveDate};
use gohealth_core::dates::dd_mm_yyyy;
use gohealth_core::models::{DailyCalorieBucket, WeeklyCalorieBucket};
use gohealth_intelligence::{build_monthly_buckets, build_weekly_buckets};
use serde::Serialize;
use uuid::Uuid;

/// Which calorie tracker to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackerRange {
    /// Seven days, Sunday first
    #[default]
    Week,
    /// 7-day spans from the 1st of the month
    Month,
}

impl TrackerRange {
    /// Parse `week` or `month`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any other value
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(AppError::invalid_input(format!(
                "range must be 'week' or 'month', got '{other}'"
            ))),
        }
    }
}

/// Dashboard request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardQuery {
    /// Day summarised and week reference
    pub date: NaiveDate,
    /// Tracker shape
    pub range: TrackerRange,
    /// `(year, month)` for the monthly tracker, defaulting to the month of `date`
    pub month: Option<(i32, u32)>,
    /// Current day for goal countdowns
    pub today: NaiveDate,
}

/// Calorie buckets for the selected range, serialized as a bare array
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CaloriesTracker {
    /// Seven daily buckets, Sunday to Saturday
    Week(Vec<DailyCalorieBucket>),
    /// `Week 1`, `Week 2`, ... spans of a month
    Month(Vec<WeeklyCalorieBucket>),
}

/// Profile header shown above the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    /// Display name
    pub name: Option<String>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Height in cm
    pub height: Option<f64>,
    /// Present once the biometrics are complete
    pub bmr: Option<i64>,
    /// Present once the biometrics are complete
    pub tdee: Option<i64>,
}

impl From<ProfileView> for DashboardUser {
    fn from(view: ProfileView) -> Self {
        Self {
            name: view.profile.name,
            weight: view.profile.weight,
            height: view.profile.height,
            bmr: view.bmr,
            tdee: view.tdee,
        }
    }
}

/// Calorie balance for the selected day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieBalance {
    /// Eaten
    pub consumed: f64,
    /// Burned through logged activities
    pub burned: i64,
    /// Basal metabolic rate, 0 while the profile is incomplete
    pub bmr: i64,
    /// Total daily energy expenditure, 0 while the profile is incomplete
    pub tdee: i64,
    /// Consumed minus BMR and activity burn
    pub net: f64,
    /// Daily target, 0 while the profile is incomplete
    pub target: i64,
    /// Target minus consumed
    pub remaining: f64,
}

/// Everything the dashboard screen shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Summarised day
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Name, body metrics and metabolic figures
    pub user: DashboardUser,
    /// Calorie balance
    pub calories: CalorieBalance,
    /// Macro totals eaten
    pub nutrition: NutritionTotals,
    /// Activity totals
    pub activity: ActivitySummary,
    /// Active goal with progress
    pub active_goal: Option<ActiveGoal>,
    /// Newest BMI measurement
    pub latest_bmi: Option<BmiRecord>,
    /// Weekly or monthly buckets
    pub calories_tracker: CaloriesTracker,
}

/// Assemble the dashboard for `query.date`
///
/// # Errors
///
/// Returns `InvalidInput` for an impossible month and propagates lookup failures
pub async fn build_dashboard(
    database: &Database,
    user_id: Uuid,
    query: DashboardQuery,
) -> AppResult<Dashboard> {
    let nutrition = database.meal_totals_on(user_id, query.date).await?;
    let activities = database
        .activities_between(user_id, query.date, query.date)
        .await?;
    let activity = summarize_activities(&activities);
    let target = current_calorie_target(database, user_id, query.today)
        .await?
        .unwrap_or(0);

    let user = database
        .get_user_profile(user_id)
        .await?
        .map(|profile| DashboardUser::from(ProfileView::from_profile(profile)))
        .unwrap_or_default();
    let bmr = user.bmr.unwrap_or(0);
    let tdee = user.tdee.unwrap_or(0);

    let calories = CalorieBalance {
        consumed: nutrition.calories,
        burned: activity.total_calories_burned,
        bmr,
        tdee,
        net: nutrition.calories - (bmr + activity.total_calories_burned) as f64,
        target,
        remaining: target as f64 - nutrition.calories,
    };

    let source = UserMealCalories::new(database.clone(), user_id);
    let calories_tracker = match query.range {
        TrackerRange::Week => {
            CaloriesTracker::Week(build_weekly_buckets(&source, query.date).await?)
        }
        TrackerRange::Month => {
            let (year, month) = query
                .month
                .unwrap_or((query.date.year(), query.date.month()));
            CaloriesTracker::Month(build_monthly_buckets(&source, year, month).await?)
        }
    };

    Ok(Dashboard {
        date: query.date,
        user,
        calories,
        nutrition,
        activity,
        active_goal: active_goal(database, user_id, query.today).await?,
        latest_bmi: database.latest_bmi(user_id).await?,
        calories_tracker,
    })
}
