// ABOUTME: Calculation engine for BMR, TDEE, BMI, macros, goal progress and dashboard buckets
// ABOUTME: Pure functions plus async bucket builders over a meal lookup collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![deny(unsafe_code)]

//! # GoHealth Intelligence
//!
//! Closed-form nutrition arithmetic and calendar bucketing. Nothing here holds state:
//! every function returns the same output for the same input, and the only I/O is the
//! meal lookup the dashboard builders await through [`dashboard::MealCalorieSource`].
//!
//! ## Modules
//!
//! - **metabolic**: BMR (Mifflin-St Jeor), TDEE, BMI, activity burn, daily calorie target
//! - **macros**: Macro grams from a calorie budget and the TDEE guidance band
//! - **dashboard**: Weekly (Sunday-anchored) and monthly (day-1-anchored) calorie buckets
//! - **progress**: Weight goal completion and BMI trend analysis

/// BMR, TDEE, BMI and calorie target calculations
pub mod metabolic;

/// Macronutrient allocation
pub mod macros;

/// Calendar bucketing of logged meal calories
pub mod dashboard;

/// Weight goal progress and BMI trend analysis
pub mod progress;

pub use dashboard::{
    build_monthly_buckets, build_weekly_buckets, monthly_spans, weekly_spans, MealCalorieSource,
};
pub use macros::{calculate_macros, calculate_macros_with, nutrition_target_range};
pub use metabolic::{
    activity_multiplier, bmi_status, calculate_activity_calories, calculate_bmi,
    calculate_bmi_result, calculate_bmr, calculate_daily_calorie_target,
    calculate_daily_calorie_target_on, calculate_tdee, daily_metabolics, MetabolicSummary,
};
pub use progress::{bmi_trend, weight_goal_progress};
