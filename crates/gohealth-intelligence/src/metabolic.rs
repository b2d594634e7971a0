// ABOUTME: Metabolic calculations using the Mifflin-St Jeor equation and MET tables
// ABOUTME: BMR, TDEE, BMI and category, activity calorie burn, goal-driven daily calorie target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Metabolic Calculator
//!
//! All energy results are whole kcal rounded to the nearest integer; BMI is rounded to
//! one decimal. Inputs are not range-checked here: callers build a
//! [`BiometricProfile`] (which enforces the accepted ranges) or pass stored values that
//! were validated on the way in.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - Ainsworth, B.E., et al. (2011). Compendium of Physical Activities.
//!   *Medicine & Science in Sports & Exercise*, 43(8), 1575-1581.

use chrono::{NaiveDate, Utc};
use gohealth_core::constants::{activity_factors, bmr, calorie_limits, energy};
use gohealth_core::models::{ActivityLevel, BiometricProfile, BmiResult, BmiStatus, Sex};
use serde::{Deserialize, Serialize};

/// BMR and TDEE for one profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetabolicSummary {
    /// Basal metabolic rate (kcal/day)
    pub bmr: i64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: i64,
}

/// Basal Metabolic Rate via Mifflin-St Jeor, rounded to whole kcal/day
///
/// - male: `10*weight + 6.25*height - 5*age + 5`
/// - female: `10*weight + 6.25*height - 5*age - 161`
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> i64 {
    let sex_constant = match sex {
        Sex::Male => bmr::MALE_CONSTANT,
        Sex::Female => bmr::FEMALE_CONSTANT,
    };

    let weight_component = bmr::WEIGHT_COEF * weight_kg;
    let height_component = bmr::HEIGHT_COEF * height_cm;
    let age_component = bmr::AGE_COEF * f64::from(age_years);

    let value = weight_component + height_component - age_component + sex_constant;
    value.round() as i64
}

/// TDEE multiplier for an activity level
#[must_use]
pub const fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => activity_factors::SEDENTARY,
        ActivityLevel::LightlyActive => activity_factors::LIGHTLY_ACTIVE,
        ActivityLevel::ModeratelyActive => activity_factors::MODERATELY_ACTIVE,
        ActivityLevel::VeryActive => activity_factors::VERY_ACTIVE,
        ActivityLevel::ExtraActive => activity_factors::EXTRA_ACTIVE,
    }
}

/// Total Daily Energy Expenditure, rounded to whole kcal/day
///
/// An unknown or missing level (`None`) intentionally uses the sedentary multiplier,
/// the lowest of the five.
#[must_use]
pub fn calculate_tdee(bmr: i64, activity_level: Option<ActivityLevel>) -> i64 {
    let multiplier = activity_level.map_or(activity_factors::SEDENTARY, activity_multiplier);
    (bmr as f64 * multiplier).round() as i64
}

/// BMR and TDEE for a validated profile
#[must_use]
pub fn daily_metabolics(profile: &BiometricProfile) -> MetabolicSummary {
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.sex,
    );
    MetabolicSummary {
        bmr,
        tdee: calculate_tdee(bmr, Some(profile.activity_level)),
    }
}

/// Body Mass Index rounded to one decimal
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    (bmi * 10.0).round() / 10.0
}

/// BMI category; a value exactly on a threshold belongs to the higher category
#[must_use]
pub fn bmi_status(bmi: f64) -> BmiStatus {
    BmiStatus::from_bmi(bmi)
}

/// BMI value together with its category
#[must_use]
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> BmiResult {
    let bmi_value = calculate_bmi(weight_kg, height_cm);
    BmiResult {
        bmi_value,
        status: bmi_status(bmi_value),
    }
}

/// Calories burned by an activity: `MET * weight * hours`, rounded
///
/// The caller guarantees a positive duration.
#[must_use]
pub fn calculate_activity_calories(met_value: f64, weight_kg: f64, duration_minutes: f64) -> i64 {
    let hours = duration_minutes / 60.0;
    (met_value * weight_kg * hours).round() as i64
}

/// Recommended daily intake to reach `target_weight_kg` by `target_date`, counted from today (UTC)
#[must_use]
pub fn calculate_daily_calorie_target(
    tdee: i64,
    current_weight_kg: f64,
    target_weight_kg: f64,
    target_date: NaiveDate,
    sex: Sex,
) -> i64 {
    calculate_daily_calorie_target_on(
        tdee,
        current_weight_kg,
        target_weight_kg,
        target_date,
        sex,
        Utc::now().date_naive(),
    )
}

/// Recommended daily intake to reach `target_weight_kg` by `target_date`, counted from `today`
///
/// A goal due today or earlier returns `tdee` unchanged. Otherwise the weight delta is
/// spread over the remaining days at 7700 kcal/kg and subtracted from `tdee` (a gain goal
/// yields a surplus). Two floors follow, each through `max`: the sex minimum
/// (1500 male, 1200 female) and `tdee - 1000`. The higher floor always wins, so the
/// effective floor is whichever of the two is larger.
#[must_use]
pub fn calculate_daily_calorie_target_on(
    tdee: i64,
    current_weight_kg: f64,
    target_weight_kg: f64,
    target_date: NaiveDate,
    sex: Sex,
    today: NaiveDate,
) -> i64 {
    let days_remaining = (target_date - today).num_days();
    if days_remaining <= 0 {
        return tdee;
    }

    let total_delta_kcal = (current_weight_kg - target_weight_kg) * energy::KCAL_PER_KG_BODY_WEIGHT;
    let daily_delta = total_delta_kcal / days_remaining as f64;
    let tdee_kcal = tdee as f64;

    let min_calories = match sex {
        Sex::Male => calorie_limits::MIN_DAILY_MALE,
        Sex::Female => calorie_limits::MIN_DAILY_FEMALE,
    };

    let unclamped = tdee_kcal - daily_delta;
    let recommended = unclamped
        .max(min_calories as f64)
        .max((tdee - calorie_limits::MAX_DAILY_DEFICIT) as f64);

    if recommended > unclamped {
        tracing::debug!(
            tdee,
            days_remaining,
            unclamped = unclamped.round() as i64,
            floored = recommended.round() as i64,
            "Daily calorie target raised to its floor"
        );
    }

    recommended.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_reference_value() {
        assert_eq!(calculate_bmr(70.0, 175.0, 30, Sex::Male), 1649);
        assert_eq!(calculate_bmr(70.0, 175.0, 30, Sex::Female), 1483);
    }

    #[test]
    fn test_tdee_defaults_to_sedentary() {
        assert_eq!(calculate_tdee(1649, None), 1979);
        assert_eq!(calculate_tdee(1649, Some(ActivityLevel::Sedentary)), 1979);
    }
}
