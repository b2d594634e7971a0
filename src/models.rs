// ABOUTME: Persisted record types for users, BMI history, goals, meals, activities and notifications
// ABOUTME: Rows as returned by the database layer and serialized by the REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Records
//!
//! Calculation inputs and outputs live in `gohealth_core::models`; the types here are what
//! the SQLite store reads and writes. Dates serialize as `DD-MM-YYYY`, timestamps as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use gohealth_core::dates::dd_mm_yyyy;
use gohealth_core::models::{
    ActivityCategory, BmiStatus, Intensity, MealType, NotificationKind, ProfileSnapshot, Sex,
    WeightGoal,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user profile row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id (JWT subject)
    pub id: Uuid,
    /// Display name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Biological sex, serialized as `gender`
    #[serde(rename = "gender")]
    pub sex: Option<Sex>,
    /// Age in years
    pub age: Option<u32>,
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Stored activity level, possibly the legacy `ACTIVE`
    pub activity_level: Option<String>,
    /// Push token, never serialized
    #[serde(skip)]
    pub push_token: Option<String>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Biometric view used by the calculators
    #[must_use]
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            weight_kg: self.weight,
            height_cm: self.height,
            age_years: self.age,
            sex: self.sex,
            activity_level: self.activity_level.clone(),
        }
    }
}

/// Partial profile update; `None` leaves a column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    /// New display name
    pub name: Option<String>,
    /// New age
    pub age: Option<u32>,
    /// New sex
    pub sex: Option<Sex>,
    /// New height (cm)
    pub height: Option<f64>,
    /// New weight (kg)
    pub weight: Option<f64>,
    /// New activity level
    pub activity_level: Option<String>,
}

/// A stored BMI measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiRecord {
    /// Record id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    /// BMI rounded to one decimal
    pub bmi: f64,
    /// Category at recording time
    pub status: BmiStatus,
    /// Measurement time
    pub recorded_at: DateTime<Utc>,
}

/// A stored weight goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoalRecord {
    /// Goal id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Weights and timeline
    #[serde(flatten)]
    pub goal: WeightGoal,
    /// Only one goal per user is active
    pub is_active: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Food catalog entry, nutrients per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Catalog id
    pub id: String,
    /// Food name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Serving description
    pub serving: String,
    /// kcal per serving
    pub calories: f64,
    /// Protein grams per serving
    pub protein: f64,
    /// Carbohydrate grams per serving
    pub carbohydrates: f64,
    /// Fat grams per serving
    pub fat: f64,
}

/// Nutrition totals of a logged meal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTotals {
    /// kcal
    pub calories: f64,
    /// Protein grams
    pub protein: f64,
    /// Carbohydrate grams
    pub carbohydrates: f64,
    /// Fat grams
    pub fat: f64,
}

impl NutritionTotals {
    /// Totals for `quantity` servings of `food`
    #[must_use]
    pub fn for_servings(food: &FoodItem, quantity: f64) -> Self {
        Self {
            calories: food.calories * quantity,
            protein: food.protein * quantity,
            carbohydrates: food.carbohydrates * quantity,
            fat: food.fat * quantity,
        }
    }

    /// Every nutrient multiplied by `factor`
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbohydrates: self.carbohydrates * factor,
            fat: self.fat * factor,
        }
    }

    /// Component-wise sum
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbohydrates: self.carbohydrates + other.carbohydrates,
            fat: self.fat + other.fat,
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecord {
    /// Meal id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Catalog food
    pub food_id: String,
    /// Food name at logging time
    pub food_name: String,
    /// Breakfast, lunch, dinner or snack
    pub meal_type: MealType,
    /// Day the meal was eaten
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Number of servings
    pub quantity: f64,
    /// Serving unit label
    pub unit: String,
    /// Totals for `quantity`
    pub nutrition: NutritionTotals,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Activity type reference entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityType {
    /// Slug id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category
    pub category: ActivityCategory,
    /// Metabolic equivalent
    pub met_value: f64,
    /// Short description
    pub description: String,
}

/// A logged activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Activity id
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Reference type
    pub activity_type_id: String,
    /// Type name
    pub activity_name: String,
    /// Type category
    pub category: ActivityCategory,
    /// MET value used for the calorie estimate
    pub met_value: f64,
    /// Day of the activity
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Duration in minutes
    pub duration: f64,
    /// Estimated kcal burned
    pub calories_burned: i64,
    /// Self-reported intensity
    pub intensity: Option<Intensity>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// A stored notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Notification id
    pub id: Uuid,
    /// Recipient
    pub user_id: Uuid,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// String-valued payload delivered with the push
    pub data: serde_json::Value,
    /// Read by the user
    pub is_read: bool,
    /// Accepted by the push gateway
    pub is_sent: bool,
    /// Delivery time
    pub sent_at: Option<DateTime<Utc>>,
    /// Read time
    pub read_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Filter for notification listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    /// Only read or only unread
    pub is_read: Option<bool>,
    /// Only one kind
    pub kind: Option<NotificationKind>,
}
