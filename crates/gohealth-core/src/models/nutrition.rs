// ABOUTME: Nutrition models for macro allocation and meal logging
// ABOUTME: MacroRatios, MacroGrams, NutritionTargetRange and MealType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::constants::macro_ratios;
use serde::{Deserialize, Serialize};

/// Share of calories assigned to each macronutrient
///
/// Ratios are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroRatios {
    /// Protein share
    pub protein: f64,
    /// Carbohydrate share
    pub carbs: f64,
    /// Fat share
    pub fat: f64,
}

impl Default for MacroRatios {
    fn default() -> Self {
        Self {
            protein: macro_ratios::PROTEIN,
            carbs: macro_ratios::CARBS,
            fat: macro_ratios::FAT,
        }
    }
}

/// Macronutrient targets in whole grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGrams {
    /// Protein grams
    pub protein: i64,
    /// Carbohydrate grams
    pub carbohydrates: i64,
    /// Fat grams
    pub fat: i64,
}

/// Nutrition guidance band derived from TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargetRange {
    /// Lower calorie bound
    pub calories_min: i64,
    /// Upper calorie bound
    pub calories_max: i64,
    /// Lower protein bound (g)
    pub protein_min: i64,
    /// Upper protein bound (g)
    pub protein_max: i64,
    /// Lower carbohydrate bound (g)
    pub carb_min: i64,
    /// Upper carbohydrate bound (g)
    pub carb_max: i64,
    /// Lower fat bound (g)
    pub fat_min: i64,
    /// Upper fat bound (g)
    pub fat_max: i64,
}

/// Meal slot a food entry is logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealType {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snack
    Snack,
}

impl MealType {
    /// Accepted wire names
    pub const NAMES: [&'static str; 4] = ["BREAKFAST", "LUNCH", "DINNER", "SNACK"];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "BREAKFAST",
            Self::Lunch => "LUNCH",
            Self::Dinner => "DINNER",
            Self::Snack => "SNACK",
        }
    }

    /// Parse the wire name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BREAKFAST" => Some(Self::Breakfast),
            "LUNCH" => Some(Self::Lunch),
            "DINNER" => Some(Self::Dinner),
            "SNACK" => Some(Self::Snack),
            _ => None,
        }
    }

    /// Ordering within a day
    #[must_use]
    pub const fn order_index(self) -> u8 {
        match self {
            Self::Breakfast => 1,
            Self::Lunch => 2,
            Self::Dinner => 3,
            Self::Snack => 4,
        }
    }
}
