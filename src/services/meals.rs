// ABOUTME: Meal logging against the food catalog with per-serving nutrition scaling
// ABOUTME: Daily macro totals and the calorie achievement check after each new meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::Notifier;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{FoodItem, MealRecord, NutritionTotals};
use chrono::{NaiveDate, Utc};
use gohealth_core::dates::dd_mm_yyyy;
use gohealth_core::models::MealType;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// Unit recorded when the client does not name one
pub const DEFAULT_UNIT: &str = "serving";
/// Food search result cap
pub const FOOD_SEARCH_LIMIT: u32 = 50;

/// A new meal entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    /// Catalog food id
    pub food_id: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Day eaten
    pub date: NaiveDate,
    /// Servings
    pub quantity: f64,
    /// Unit label
    pub unit: Option<String>,
}

/// Edits to a logged meal; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealChanges {
    /// New servings
    pub quantity: Option<f64>,
    /// New unit label
    pub unit: Option<String>,
    /// New meal slot
    pub meal_type: Option<MealType>,
}

/// One day's meals with totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMealSummary {
    /// Summarised day
    #[serde(with = "dd_mm_yyyy")]
    pub date: NaiveDate,
    /// Sum over every meal
    pub totals: NutritionTotals,
    /// Meal entries counted
    pub meal_count: usize,
    /// Totals per meal slot
    pub by_meal_type: BTreeMap<String, NutritionTotals>,
    /// Entries, breakfast to snack
    pub meals: Vec<MealRecord>,
}

/// Catalog search by name
///
/// # Errors
///
/// Returns `InvalidInput` for a blank query
pub async fn search_foods(database: &Database, query: &str) -> AppResult<Vec<FoodItem>> {
    if query.trim().is_empty() {
        return Err(AppError::invalid_input("query must not be empty"));
    }
    database.search_foods(query, FOOD_SEARCH_LIMIT).await
}

/// One catalog entry
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id
pub async fn get_food(database: &Database, food_id: &str) -> AppResult<FoodItem> {
    database
        .get_food(food_id)
        .await?
        .ok_or_else(|| AppError::not_found("Food"))
}

/// Log a meal and check the day's calorie achievement
///
/// Achievement failures are logged; the meal is kept.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown food or an error if the insert fails
pub async fn log_meal(
    database: &Database,
    notifier: &Notifier,
    user_id: Uuid,
    input: NewMeal,
) -> AppResult<MealRecord> {
    let food = get_food(database, &input.food_id).await?;
    let now = Utc::now();

    let meal = MealRecord {
        id: Uuid::new_v4(),
        user_id,
        nutrition: NutritionTotals::for_servings(&food, input.quantity),
        food_id: food.id,
        food_name: food.name,
        meal_type: input.meal_type,
        date: input.date,
        quantity: input.quantity,
        unit: input.unit.unwrap_or_else(|| DEFAULT_UNIT.to_owned()),
        created_at: now,
        updated_at: now,
    };

    database.insert_meal(&meal).await?;
    AppLogger::log_meal_logged(user_id, meal.meal_type.as_str(), meal.nutrition.calories);

    if let Err(e) = notifier
        .check_daily_achievement(user_id, meal.date, now.date_naive())
        .await
    {
        warn!(user_id = %user_id, error = %e, "Daily achievement check failed");
    }

    Ok(meal)
}

/// Edit a meal, rescaling its nutrition when the quantity changes
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such meal
pub async fn update_meal(
    database: &Database,
    user_id: Uuid,
    meal_id: Uuid,
    changes: MealChanges,
) -> AppResult<MealRecord> {
    let mut meal = database
        .get_meal(user_id, meal_id)
        .await?
        .ok_or_else(|| AppError::not_found("Meal"))?;

    if let Some(quantity) = changes.quantity {
        if meal.quantity > 0.0 {
            meal.nutrition = meal.nutrition.scaled(quantity / meal.quantity);
        }
        meal.quantity = quantity;
    }
    if let Some(unit) = changes.unit {
        meal.unit = unit;
    }
    if let Some(meal_type) = changes.meal_type {
        meal.meal_type = meal_type;
    }
    meal.updated_at = Utc::now();

    database.update_meal(&meal).await?;
    Ok(meal)
}

/// Delete a meal
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such meal
pub async fn delete_meal(database: &Database, user_id: Uuid, meal_id: Uuid) -> AppResult<()> {
    if database.delete_meal(user_id, meal_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Meal"))
    }
}

/// Meals within `[start, end]`
///
/// # Errors
///
/// Returns `InvalidInput` when `end` precedes `start`
pub async fn list_meals(
    database: &Database,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<MealRecord>> {
    if end < start {
        return Err(AppError::invalid_input("endDate must not be before startDate"));
    }
    database.meals_between(user_id, start, end).await
}

/// One day's meals with overall and per-slot totals
///
/// # Errors
///
/// Returns an error if the query fails
pub async fn daily_summary(
    database: &Database,
    user_id: Uuid,
    date: NaiveDate,
) -> AppResult<DailyMealSummary> {
    let meals = database.meals_between(user_id, date, date).await?;

    let mut totals = NutritionTotals::default();
    let mut by_meal_type: BTreeMap<String, NutritionTotals> = BTreeMap::new();
    for meal in &meals {
        totals = totals.add(meal.nutrition);
        let slot = by_meal_type
            .entry(meal.meal_type.as_str().to_owned())
            .or_default();
        *slot = slot.add(meal.nutrition);
    }

    Ok(DailyMealSummary {
        date,
        totals,
        meal_count: meals.len(),
        by_meal_type,
        meals,
    })
}
