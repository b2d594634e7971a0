// ABOUTME: BMI recording, history and trend analysis, and weight goal management
// ABOUTME: A new measurement updates the profile and reports progress toward the active goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::profile::goal_calorie_target;
use super::Notifier;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{BmiRecord, WeightGoalRecord};
use chrono::NaiveDate;
use gohealth_core::constants::limits;
use gohealth_core::models::{BmiTrend, GoalProgress, NutritionTargetRange, WeightGoal};
use gohealth_intelligence::{
    bmi_trend, calculate_bmi_result, daily_metabolics, nutrition_target_range,
    weight_goal_progress,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

/// Records considered by the trend analysis
pub const ANALYSIS_WINDOW: u32 = limits::BMI_ANALYSIS_WINDOW as u32;

/// Outcome of recording a measurement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiRecorded {
    /// Stored measurement
    pub record: BmiRecord,
    /// Updated guidance band, when the profile is complete
    pub nutrition: Option<NutritionTargetRange>,
}

/// Trend over recent measurements
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiAnalysis {
    /// Number of measurements analysed
    pub count: usize,
    /// Newest measurement
    pub latest: Option<BmiRecord>,
    /// Direction and magnitude, absent without measurements
    pub trend: Option<BmiTrend>,
}

/// Active goal with progress
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGoal {
    /// Stored goal
    #[serde(flatten)]
    pub goal: WeightGoalRecord,
    /// Completion against the current profile weight
    pub progress: GoalProgress,
    /// Goal-adjusted intake, when the profile is complete
    pub daily_calorie_target: Option<i64>,
}

/// Store a measurement, update the profile and report goal progress
///
/// Goal progress delivery failures are logged; the measurement is kept.
///
/// # Errors
///
/// Returns an error if a database write fails
pub async fn record_bmi(
    database: &Database,
    notifier: &Notifier,
    user_id: Uuid,
    height: f64,
    weight: f64,
) -> AppResult<BmiRecorded> {
    let result = calculate_bmi_result(weight, height);
    let record = database
        .insert_bmi_record(user_id, height, weight, &result)
        .await?;
    database.update_body_metrics(user_id, height, weight).await?;
    AppLogger::log_bmi_recorded(user_id, record.bmi, record.status.as_str());

    let nutrition = database
        .get_user_profile(user_id)
        .await?
        .and_then(|profile| profile.snapshot().biometrics().ok())
        .map(|biometrics| nutrition_target_range(daily_metabolics(&biometrics).tdee));

    if let Some(active) = database.active_weight_goal(user_id).await? {
        if let Err(e) = notifier
            .notify_weight_goal_progress(user_id, &active.goal, weight)
            .await
        {
            warn!(user_id = %user_id, error = %e, "Weight goal progress notification failed");
        }
    }

    Ok(BmiRecorded { record, nutrition })
}

/// Newest measurements first
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn history(database: &Database, user_id: Uuid, limit: u32) -> AppResult<Vec<BmiRecord>> {
    database.bmi_history(user_id, limit).await
}

/// Newest measurement
///
/// # Errors
///
/// Returns `ResourceNotFound` when nothing was recorded yet
pub async fn latest(database: &Database, user_id: Uuid) -> AppResult<BmiRecord> {
    database
        .latest_bmi(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("BMI record"))
}

/// Trend over the last [`ANALYSIS_WINDOW`] measurements
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn analysis(database: &Database, user_id: Uuid) -> AppResult<BmiAnalysis> {
    let records = database.bmi_history(user_id, ANALYSIS_WINDOW).await?;
    let oldest_first: Vec<f64> = records.iter().rev().map(|record| record.bmi).collect();

    Ok(BmiAnalysis {
        count: records.len(),
        trend: bmi_trend(&oldest_first),
        latest: records.into_iter().next(),
    })
}

/// Replace the active goal
///
/// # Errors
///
/// Returns `InvalidInput` when the target date is not after the start date
pub async fn create_goal(
    database: &Database,
    user_id: Uuid,
    goal: &WeightGoal,
) -> AppResult<WeightGoalRecord> {
    if goal.target_date.is_some_and(|target| target <= goal.start_date) {
        return Err(AppError::invalid_input(
            "Target date must be after start date",
        ));
    }

    let record = database.create_weight_goal(user_id, goal).await?;
    tracing::info!(user_id = %user_id, goal_id = %record.id, "Weight goal created");
    Ok(record)
}

/// Active goal with progress, `None` without one
///
/// # Errors
///
/// Returns an error if a lookup fails
pub async fn active_goal(
    database: &Database,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<Option<ActiveGoal>> {
    let Some(goal) = database.active_weight_goal(user_id).await? else {
        return Ok(None);
    };

    let profile = database.get_user_profile(user_id).await?;
    let current_weight = profile.as_ref().and_then(|p| p.weight);
    let daily_calorie_target = profile
        .and_then(|p| p.snapshot().biometrics().ok())
        .map(|biometrics| {
            let tdee = daily_metabolics(&biometrics).tdee;
            goal_calorie_target(tdee, &biometrics, Some(&goal.goal), today)
        });

    Ok(Some(ActiveGoal {
        progress: weight_goal_progress(&goal.goal, current_weight),
        goal,
        daily_calorie_target,
    }))
}
