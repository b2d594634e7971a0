// ABOUTME: Macronutrient allocation from a calorie budget
// ABOUTME: Point estimate from ratios and the TDEE-derived nutrition guidance band
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Macro Allocator
//!
//! Protein and carbohydrate carry 4 kcal/g, fat 9 kcal/g. Ratios are applied as given;
//! nothing checks that they sum to 1.

use gohealth_core::constants::{energy, nutrition_band};
use gohealth_core::models::{MacroGrams, MacroRatios, NutritionTargetRange};

fn grams(calories: f64, share: f64, kcal_per_gram: f64) -> i64 {
    (calories * share / kcal_per_gram).round() as i64
}

/// Macro grams for `total_calories` using the default 30/40/30 split
#[must_use]
pub fn calculate_macros(total_calories: f64) -> MacroGrams {
    calculate_macros_with(total_calories, MacroRatios::default())
}

/// Macro grams for `total_calories` using explicit ratios
#[must_use]
pub fn calculate_macros_with(total_calories: f64, ratios: MacroRatios) -> MacroGrams {
    MacroGrams {
        protein: grams(total_calories, ratios.protein, energy::KCAL_PER_GRAM_PROTEIN),
        carbohydrates: grams(total_calories, ratios.carbs, energy::KCAL_PER_GRAM_CARBS),
        fat: grams(total_calories, ratios.fat, energy::KCAL_PER_GRAM_FAT),
    }
}

/// Nutrition guidance band: calories at 90-110% of TDEE and macro bands within it
///
/// Each macro minimum is taken from the rounded `calories_min`, each maximum from the
/// rounded `calories_max`: protein 15-20% and carbohydrates 50-60% at 4 kcal/g, fat
/// 20-30% at 9 kcal/g.
#[must_use]
pub fn nutrition_target_range(tdee: i64) -> NutritionTargetRange {
    use nutrition_band::{
        CALORIES_MAX_FACTOR, CALORIES_MIN_FACTOR, CARBS_MAX_SHARE, CARBS_MIN_SHARE,
        FAT_MAX_SHARE, FAT_MIN_SHARE, PROTEIN_MAX_SHARE, PROTEIN_MIN_SHARE,
    };

    let tdee = tdee as f64;
    let calories_min = (tdee * CALORIES_MIN_FACTOR).round() as i64;
    let calories_max = (tdee * CALORIES_MAX_FACTOR).round() as i64;
    let low = calories_min as f64;
    let high = calories_max as f64;

    NutritionTargetRange {
        calories_min,
        calories_max,
        protein_min: grams(low, PROTEIN_MIN_SHARE, energy::KCAL_PER_GRAM_PROTEIN),
        protein_max: grams(high, PROTEIN_MAX_SHARE, energy::KCAL_PER_GRAM_PROTEIN),
        carb_min: grams(low, CARBS_MIN_SHARE, energy::KCAL_PER_GRAM_CARBS),
        carb_max: grams(high, CARBS_MAX_SHARE, energy::KCAL_PER_GRAM_CARBS),
        fat_min: grams(low, FAT_MIN_SHARE, energy::KCAL_PER_GRAM_FAT),
        fat_max: grams(high, FAT_MAX_SHARE, energy::KCAL_PER_GRAM_FAT),
    }
}
