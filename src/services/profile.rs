// ABOUTME: Profile reads and updates enriched with BMR/TDEE, plus nutrition target derivation
// ABOUTME: Resolves the daily calorie target from the profile and the active weight goal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ProfileChanges, UserProfile};
use chrono::NaiveDate;
use gohealth_core::models::{BiometricProfile, MacroGrams, NutritionTargetRange, WeightGoal};
use gohealth_intelligence::{
    calculate_daily_calorie_target_on, calculate_macros, daily_metabolics, nutrition_target_range,
};
use serde::Serialize;
use uuid::Uuid;

/// Profile as returned to the client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Stored profile
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Present only when every biometric is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmr: Option<i64>,
    /// Present only when every biometric is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdee: Option<i64>,
}

impl ProfileView {
    pub(crate) fn from_profile(profile: UserProfile) -> Self {
        let metabolics = profile
            .snapshot()
            .biometrics()
            .ok()
            .map(|biometrics| daily_metabolics(&biometrics));

        Self {
            bmr: metabolics.map(|m| m.bmr),
            tdee: metabolics.map(|m| m.tdee),
            profile,
        }
    }
}

/// Guidance band plus the point targets derived from the active goal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    /// ±10% band around TDEE
    #[serde(flatten)]
    pub range: NutritionTargetRange,
    /// Basal metabolic rate
    pub bmr: i64,
    /// Total daily energy expenditure
    pub tdee: i64,
    /// Goal-adjusted intake, equal to TDEE without a dated goal
    pub daily_calorie_target: i64,
    /// Default-ratio macros for the daily target
    pub macros: MacroGrams,
}

/// Load a profile with its metabolic figures
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has never saved a profile
pub async fn get_profile(database: &Database, user_id: Uuid) -> AppResult<ProfileView> {
    let profile = database.require_user_profile(user_id).await?;
    Ok(ProfileView::from_profile(profile))
}

/// Apply a partial update, creating the profile on first write
///
/// # Errors
///
/// Returns an error if the database write fails
pub async fn update_profile(
    database: &Database,
    user_id: Uuid,
    changes: &ProfileChanges,
) -> AppResult<ProfileView> {
    let profile = database.upsert_user_profile(user_id, changes).await?;
    tracing::info!(user_id = %user_id, "Profile updated");
    Ok(ProfileView::from_profile(profile))
}

/// Intake recommendation for a complete profile and an optional goal
///
/// Without a goal target date the recommendation is TDEE itself.
#[must_use]
pub fn goal_calorie_target(
    tdee: i64,
    profile: &BiometricProfile,
    goal: Option<&WeightGoal>,
    today: NaiveDate,
) -> i64 {
    match goal.and_then(|g| g.target_date.map(|date| (g.target_weight_kg, date))) {
        Some((target_weight, target_date)) => calculate_daily_calorie_target_on(
            tdee,
            profile.weight_kg,
            target_weight,
            target_date,
            profile.sex,
            today,
        ),
        None => tdee,
    }
}

/// Today's calorie target, or `None` while the profile lacks biometrics
///
/// # Errors
///
/// Returns an error if a lookup fails or a stored biometric is out of range
pub async fn current_calorie_target(
    database: &Database,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<Option<i64>> {
    let snapshot = database
        .get_user_profile(user_id)
        .await?
        .map(|profile| profile.snapshot())
        .unwrap_or_default();

    if !snapshot.missing_fields().is_empty() {
        return Ok(None);
    }

    let biometrics = snapshot.biometrics()?;
    let tdee = daily_metabolics(&biometrics).tdee;
    let goal = database.active_weight_goal(user_id).await?;
    Ok(Some(goal_calorie_target(
        tdee,
        &biometrics,
        goal.as_ref().map(|record| &record.goal),
        today,
    )))
}

/// Nutrition band, metabolic figures and macro split for the user
///
/// # Errors
///
/// Returns `ProfileIncomplete` when biometrics are missing
pub async fn nutrition_targets(
    database: &Database,
    user_id: Uuid,
    today: NaiveDate,
) -> AppResult<NutritionTargets> {
    let snapshot = database
        .get_user_profile(user_id)
        .await?
        .map(|profile| profile.snapshot())
        .unwrap_or_default();
    let biometrics = snapshot.biometrics()?;
    let metabolics = daily_metabolics(&biometrics);

    let goal = database.active_weight_goal(user_id).await?;
    let daily_calorie_target = goal_calorie_target(
        metabolics.tdee,
        &biometrics,
        goal.as_ref().map(|record| &record.goal),
        today,
    );

    Ok(NutritionTargets {
        range: nutrition_target_range(metabolics.tdee),
        bmr: metabolics.bmr,
        tdee: metabolics.tdee,
        daily_calorie_target,
        macros: calculate_macros(daily_calorie_target as f64),
    })
}

/// Current body weight from the profile
///
/// # Errors
///
/// Returns `ProfileIncomplete` naming `weight` when the profile has none
pub async fn require_weight(database: &Database, user_id: Uuid) -> AppResult<f64> {
    database
        .get_user_profile(user_id)
        .await?
        .and_then(|profile| profile.weight)
        .ok_or_else(|| AppError::profile_incomplete(&["weight"]))
}
