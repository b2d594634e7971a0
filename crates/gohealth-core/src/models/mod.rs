// ABOUTME: Core data models shared by the calculators and the HTTP server
// ABOUTME: Re-exports biometric, nutrition, activity, goal, dashboard and notification types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Data Models
//!
//! Value types exchanged between the stores, the calculators and the REST layer.
//! None of them own persistence; the server's database layer maps rows into them.
//!
//! ## Core Models
//!
//! - `BiometricProfile`: Validated inputs for BMR/TDEE
//! - `ProfileSnapshot`: The profile as stored, every biometric optional
//! - `NutritionTargetRange`: TDEE-derived guidance band
//! - `WeightGoal`: Start/target weights and dates
//! - `DailyCalorieBucket` / `WeeklyCalorieBucket`: Dashboard aggregation output

mod activity;
mod biometrics;
mod dashboard;
mod goal;
mod notification;
mod nutrition;

// Biometrics domain
pub use biometrics::{ActivityLevel, BiometricProfile, BmiResult, BmiStatus, ProfileSnapshot, Sex};

// Nutrition domain
pub use nutrition::{MacroGrams, MacroRatios, MealType, NutritionTargetRange};

// Activity domain
pub use activity::{ActivityCategory, ActivityRecord, Intensity};

// Goal domain
pub use goal::{BmiTrend, GoalProgress, TrendDirection, WeightGoal};

// Dashboard domain
pub use dashboard::{DailyCalorieBucket, DateSpan, MealCalorieEntry, WeeklyCalorieBucket};

// Notification domain
pub use notification::NotificationKind;
