// ABOUTME: User profile database operations
// ABOUTME: Profile reads, partial upserts, body metric updates and push token storage

use super::{parse_stored, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ProfileChanges, UserProfile};
use chrono::Utc;
use gohealth_core::models::Sex;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT,
                email TEXT,
                gender TEXT CHECK (gender IN ('MALE', 'FEMALE')),
                age INTEGER,
                height REAL,
                weight REAL,
                activity_level TEXT,
                push_token TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT id, name, email, gender, age, height, weight, activity_level,
                   push_token, created_at, updated_at
            FROM users WHERE id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    /// Get a user's profile, failing with `ResourceNotFound` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the user has no profile
    pub async fn require_user_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.get_user_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Apply a partial profile update, creating the row on first write
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        changes: &ProfileChanges,
    ) -> AppResult<UserProfile> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO users (id, name, gender, age, height, weight, activity_level, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT(id) DO UPDATE SET
                name = COALESCE(excluded.name, users.name),
                gender = COALESCE(excluded.gender, users.gender),
                age = COALESCE(excluded.age, users.age),
                height = COALESCE(excluded.height, users.height),
                weight = COALESCE(excluded.weight, users.weight),
                activity_level = COALESCE(excluded.activity_level, users.activity_level),
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(changes.name.as_deref())
        .bind(changes.sex.map(Sex::as_str))
        .bind(changes.age.map(i64::from))
        .bind(changes.height)
        .bind(changes.weight)
        .bind(changes.activity_level.as_deref())
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.require_user_profile(user_id).await
    }

    /// Record the latest measured height and weight on the profile
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn update_body_metrics(&self, user_id: Uuid, height: f64, weight: f64) -> AppResult<()> {
        let changes = ProfileChanges {
            height: Some(height),
            weight: Some(weight),
            ..ProfileChanges::default()
        };
        self.upsert_user_profile(user_id, &changes).await?;
        Ok(())
    }

    /// Store or clear the user's push token
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub async fn set_push_token(&self, user_id: Uuid, token: Option<&str>) -> AppResult<()> {
        let now = Utc::now();
        sqlx::query(
            r"
            INSERT INTO users (id, push_token, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            ON CONFLICT(id) DO UPDATE SET
                push_token = excluded.push_token,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(token)
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Convert a database row to a `UserProfile`
    fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> AppResult<UserProfile> {
        let id: String = row.try_get("id")?;
        let gender: Option<String> = row.try_get("gender")?;
        let age: Option<i64> = row.try_get("age")?;

        Ok(UserProfile {
            id: parse_uuid(&id)?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            sex: gender
                .as_deref()
                .map(|g| parse_stored(g, "gender", Sex::parse))
                .transpose()?,
            age: age.map(|a| a as u32),
            height: row.try_get("height")?,
            weight: row.try_get("weight")?,
            activity_level: row.try_get("activity_level")?,
            push_token: row.try_get("push_token")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
