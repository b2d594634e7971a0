// ABOUTME: Physiological constants and accepted input ranges organized by domain
// ABOUTME: Mifflin-St Jeor coefficients, activity multipliers, BMI thresholds, energy densities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat list. The calculator
//! crate reads every coefficient from here so formulas and tests share one source.

/// Mifflin-St Jeor equation coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). "A new predictive equation for resting energy
/// expenditure in healthy individuals." *American Journal of Clinical Nutrition*, 51(2), 241-247.
pub mod bmr {
    /// kcal per kg body weight
    pub const WEIGHT_COEF: f64 = 10.0;
    /// kcal per cm height
    pub const HEIGHT_COEF: f64 = 6.25;
    /// kcal per year of age (subtracted)
    pub const AGE_COEF: f64 = 5.0;
    /// Sex constant for males
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Sex constant for females
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// TDEE activity factors
pub mod activity_factors {
    /// Little or no exercise
    pub const SEDENTARY: f64 = 1.2;
    /// Light exercise 1-3 days/week
    pub const LIGHTLY_ACTIVE: f64 = 1.375;
    /// Moderate exercise 3-5 days/week
    pub const MODERATELY_ACTIVE: f64 = 1.55;
    /// Hard exercise 6-7 days/week
    pub const VERY_ACTIVE: f64 = 1.725;
    /// Very hard exercise or a physical job
    pub const EXTRA_ACTIVE: f64 = 1.9;
}

/// BMI category thresholds (lower bound inclusive for the higher category)
pub mod bmi {
    /// Below this value is underweight
    pub const NORMAL_MIN: f64 = 18.5;
    /// At or above this value is overweight
    pub const OVERWEIGHT_MIN: f64 = 25.0;
    /// At or above this value is obese
    pub const OBESE_MIN: f64 = 30.0;
}

/// Energy content of macronutrients and body mass
pub mod energy {
    /// kcal per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// kcal per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// kcal per gram of fat
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
    /// kcal stored in one kilogram of body weight
    pub const KCAL_PER_KG_BODY_WEIGHT: f64 = 7700.0;
}

/// Daily calorie target safety limits
pub mod calorie_limits {
    /// Minimum daily intake recommended for males
    pub const MIN_DAILY_MALE: i64 = 1500;
    /// Minimum daily intake recommended for females
    pub const MIN_DAILY_FEMALE: i64 = 1200;
    /// Largest daily deficit applied below TDEE
    pub const MAX_DAILY_DEFICIT: i64 = 1000;
}

/// Default macro split for a point estimate
pub mod macro_ratios {
    /// Share of calories from protein
    pub const PROTEIN: f64 = 0.30;
    /// Share of calories from carbohydrates
    pub const CARBS: f64 = 0.40;
    /// Share of calories from fat
    pub const FAT: f64 = 0.30;
}

/// Guidance band around TDEE used for nutrition targets
pub mod nutrition_band {
    /// Lower calorie bound as a fraction of TDEE
    pub const CALORIES_MIN_FACTOR: f64 = 0.9;
    /// Upper calorie bound as a fraction of TDEE
    pub const CALORIES_MAX_FACTOR: f64 = 1.1;
    /// Protein share at the lower bound
    pub const PROTEIN_MIN_SHARE: f64 = 0.15;
    /// Protein share at the upper bound
    pub const PROTEIN_MAX_SHARE: f64 = 0.20;
    /// Carbohydrate share at the lower bound
    pub const CARBS_MIN_SHARE: f64 = 0.50;
    /// Carbohydrate share at the upper bound
    pub const CARBS_MAX_SHARE: f64 = 0.60;
    /// Fat share at the lower bound
    pub const FAT_MIN_SHARE: f64 = 0.20;
    /// Fat share at the upper bound
    pub const FAT_MAX_SHARE: f64 = 0.30;
}

/// Accepted biometric input ranges (inclusive)
pub mod biometric_ranges {
    /// Minimum body weight in kg
    pub const WEIGHT_MIN_KG: f64 = 20.0;
    /// Maximum body weight in kg
    pub const WEIGHT_MAX_KG: f64 = 500.0;
    /// Minimum height in cm
    pub const HEIGHT_MIN_CM: f64 = 50.0;
    /// Maximum height in cm
    pub const HEIGHT_MAX_CM: f64 = 300.0;
    /// Minimum age in years
    pub const AGE_MIN: i64 = 1;
    /// Maximum age in years
    pub const AGE_MAX: i64 = 120;
}

/// Request field limits
pub mod limits {
    /// Minimum display name length
    pub const NAME_MIN_LEN: usize = 2;
    /// Maximum display name length
    pub const NAME_MAX_LEN: usize = 50;
    /// Maximum free-text notes length
    pub const NOTES_MAX_LEN: usize = 500;
    /// Smallest loggable meal quantity (servings)
    pub const MIN_MEAL_QUANTITY: f64 = 0.1;
    /// Default BMI history page
    pub const BMI_HISTORY_DEFAULT: i64 = 10;
    /// Records considered by BMI trend analysis
    pub const BMI_ANALYSIS_WINDOW: i64 = 30;
    /// Default notification page size
    pub const NOTIFICATIONS_PAGE_DEFAULT: i64 = 20;
    /// Largest notification page size
    pub const NOTIFICATIONS_PAGE_MAX: i64 = 100;
}

/// Dashboard bucketing
pub mod dashboard {
    /// Days in a weekly view
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Label prefix of monthly spans
    pub const WEEK_LABEL_PREFIX: &str = "Week";
}
