// ABOUTME: Food catalog and activity type reference database operations
// ABOUTME: Catalog search, lookups by id and the activity MET table

use super::{parse_stored, Database};
use crate::errors::AppResult;
use crate::models::{ActivityType, FoodItem};
use gohealth_core::models::ActivityCategory;
use sqlx::Row;

impl Database {
    /// Create the food catalog and activity type tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_foods(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                serving TEXT NOT NULL,
                calories REAL NOT NULL,
                protein REAL NOT NULL,
                carbohydrates REAL NOT NULL,
                fat REAL NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activity_types (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                met_value REAL NOT NULL,
                description TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Case-insensitive name search over the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search_foods(&self, query: &str, limit: u32) -> AppResult<Vec<FoodItem>> {
        let pattern = format!("%{}%", query.trim().to_lowercase());
        let rows = sqlx::query(
            r"
            SELECT id, name, category, serving, calories, protein, carbohydrates, fat
            FROM foods WHERE lower(name) LIKE $1
            ORDER BY name ASC LIMIT $2
            ",
        )
        .bind(pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_food).collect()
    }

    /// Look up one catalog entry
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_food(&self, food_id: &str) -> AppResult<Option<FoodItem>> {
        let row = sqlx::query(
            r"
            SELECT id, name, category, serving, calories, protein, carbohydrates, fat
            FROM foods WHERE id = $1
            ",
        )
        .bind(food_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_food).transpose()
    }

    /// Activity types, optionally restricted to one category, by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_activity_types(
        &self,
        category: Option<ActivityCategory>,
    ) -> AppResult<Vec<ActivityType>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, category, met_value, description
            FROM activity_types WHERE ($1 IS NULL OR category = $1)
            ORDER BY name ASC
            ",
        )
        .bind(category.map(ActivityCategory::as_str))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_activity_type).collect()
    }

    /// Look up one activity type
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_activity_type(&self, type_id: &str) -> AppResult<Option<ActivityType>> {
        let row = sqlx::query(
            "SELECT id, name, category, met_value, description FROM activity_types WHERE id = $1",
        )
        .bind(type_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_activity_type).transpose()
    }

    fn row_to_food(row: &sqlx::sqlite::SqliteRow) -> AppResult<FoodItem> {
        Ok(FoodItem {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            serving: row.try_get("serving")?,
            calories: row.try_get("calories")?,
            protein: row.try_get("protein")?,
            carbohydrates: row.try_get("carbohydrates")?,
            fat: row.try_get("fat")?,
        })
    }

    fn row_to_activity_type(row: &sqlx::sqlite::SqliteRow) -> AppResult<ActivityType> {
        let category: String = row.try_get("category")?;
        Ok(ActivityType {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            category: parse_stored(&category, "activity category", ActivityCategory::parse)?,
            met_value: row.try_get("met_value")?,
            description: row.try_get("description")?,
        })
    }
}
