// ABOUTME: Meal log database operations and the meal calorie lookup for dashboards
// ABOUTME: CRUD over logged meals, per-day totals and the MealCalorieSource adapter

use super::{parse_stored, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{MealRecord, NutritionTotals};
use async_trait::async_trait;
use chrono::NaiveDate;
use gohealth_core::models::{MealCalorieEntry, MealType};
use gohealth_intelligence::MealCalorieSource;
use sqlx::Row;
use uuid::Uuid;

const MEAL_COLUMNS: &str = r"
    id, user_id, food_id, food_name, meal_type, date, quantity, unit,
    calories, protein, carbohydrates, fat, created_at, updated_at
";

impl Database {
    /// Create the meals table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_meals(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                food_id TEXT NOT NULL REFERENCES foods(id),
                food_name TEXT NOT NULL,
                meal_type TEXT NOT NULL,
                meal_order INTEGER NOT NULL,
                date TEXT NOT NULL,
                quantity REAL NOT NULL,
                unit TEXT NOT NULL,
                calories REAL NOT NULL,
                protein REAL NOT NULL,
                carbohydrates REAL NOT NULL,
                fat REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_meals_user_date ON meals(user_id, date)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Store a new meal
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_meal(&self, meal: &MealRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO meals (id, user_id, food_id, food_name, meal_type, meal_order, date,
                               quantity, unit, calories, protein, carbohydrates, fat,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(meal.id.to_string())
        .bind(meal.user_id.to_string())
        .bind(&meal.food_id)
        .bind(&meal.food_name)
        .bind(meal.meal_type.as_str())
        .bind(i64::from(meal.meal_type.order_index()))
        .bind(meal.date)
        .bind(meal.quantity)
        .bind(&meal.unit)
        .bind(meal.nutrition.calories)
        .bind(meal.nutrition.protein)
        .bind(meal.nutrition.carbohydrates)
        .bind(meal.nutrition.fat)
        .bind(meal.created_at)
        .bind(meal.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Rewrite the mutable columns of a meal
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_meal(&self, meal: &MealRecord) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE meals SET meal_type = $1, meal_order = $2, quantity = $3, unit = $4,
                             calories = $5, protein = $6, carbohydrates = $7, fat = $8,
                             updated_at = $9
            WHERE id = $10 AND user_id = $11
            ",
        )
        .bind(meal.meal_type.as_str())
        .bind(i64::from(meal.meal_type.order_index()))
        .bind(meal.quantity)
        .bind(&meal.unit)
        .bind(meal.nutrition.calories)
        .bind(meal.nutrition.protein)
        .bind(meal.nutrition.carbohydrates)
        .bind(meal.nutrition.fat)
        .bind(meal.updated_at)
        .bind(meal.id.to_string())
        .bind(meal.user_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// One of the user's meals
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_meal(&self, user_id: Uuid, meal_id: Uuid) -> AppResult<Option<MealRecord>> {
        let query = format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = $1 AND user_id = $2");
        let row = sqlx::query(&query)
            .bind(meal_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_meal).transpose()
    }

    /// Delete one of the user's meals, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Meals dated within `[start, end]`, newest day first, then breakfast to snack
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn meals_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealRecord>> {
        let query = format!(
            r"
            SELECT {MEAL_COLUMNS} FROM meals
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY date DESC, meal_order ASC, created_at ASC
            "
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_meal).collect()
    }

    /// Summed nutrition of the user's meals on `date`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn meal_totals_on(&self, user_id: Uuid, date: NaiveDate) -> AppResult<NutritionTotals> {
        let row = sqlx::query(
            r"
            SELECT COALESCE(SUM(calories), 0.0) AS calories,
                   COALESCE(SUM(protein), 0.0) AS protein,
                   COALESCE(SUM(carbohydrates), 0.0) AS carbohydrates,
                   COALESCE(SUM(fat), 0.0) AS fat
            FROM meals WHERE user_id = $1 AND date = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(NutritionTotals {
            calories: row.try_get("calories")?,
            protein: row.try_get("protein")?,
            carbohydrates: row.try_get("carbohydrates")?,
            fat: row.try_get("fat")?,
        })
    }

    /// Per-meal `(date, calories)` pairs within `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn meal_calories_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealCalorieEntry>> {
        let rows = sqlx::query(
            r"
            SELECT date, calories FROM meals
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ",
        )
        .bind(user_id.to_string())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(MealCalorieEntry {
                    date: row.try_get("date")?,
                    total_calories: row.try_get("calories")?,
                })
            })
            .collect()
    }

    fn row_to_meal(row: &sqlx::sqlite::SqliteRow) -> AppResult<MealRecord> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let meal_type: String = row.try_get("meal_type")?;

        Ok(MealRecord {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            food_id: row.try_get("food_id")?,
            food_name: row.try_get("food_name")?,
            meal_type: parse_stored(&meal_type, "meal type", MealType::parse)?,
            date: row.try_get("date")?,
            quantity: row.try_get("quantity")?,
            unit: row.try_get("unit")?,
            nutrition: NutritionTotals {
                calories: row.try_get("calories")?,
                protein: row.try_get("protein")?,
                carbohydrates: row.try_get("carbohydrates")?,
                fat: row.try_get("fat")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Meal calorie lookup for one user, backed by the meals table
#[derive(Clone)]
pub struct UserMealCalories {
    database: Database,
    user_id: Uuid,
}

impl UserMealCalories {
    /// Scope the lookup to `user_id`
    #[must_use]
    pub fn new(database: Database, user_id: Uuid) -> Self {
        Self { database, user_id }
    }
}

#[async_trait]
impl MealCalorieSource for UserMealCalories {
    async fn meal_calories_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealCalorieEntry>> {
        self.database
            .meal_calories_between(self.user_id, start, end)
            .await
    }
}
