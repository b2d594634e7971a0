// ABOUTME: Weight goal database operations
// ABOUTME: Creates goals (deactivating the previous one) and loads the active goal

use super::{parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::WeightGoalRecord;
use chrono::{NaiveDate, Utc};
use gohealth_core::models::WeightGoal;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the weight goals table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_goals(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weight_goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                start_weight REAL NOT NULL,
                target_weight REAL NOT NULL,
                start_date TEXT NOT NULL,
                target_date TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_weight_goals_active ON weight_goals(user_id, is_active)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a goal and make it the only active one
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub async fn create_weight_goal(
        &self,
        user_id: Uuid,
        goal: &WeightGoal,
    ) -> AppResult<WeightGoalRecord> {
        let record = WeightGoalRecord {
            id: Uuid::new_v4(),
            user_id,
            goal: *goal,
            is_active: true,
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE weight_goals SET is_active = 0 WHERE user_id = $1 AND is_active = 1")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r"
            INSERT INTO weight_goals
                (id, user_id, start_weight, target_weight, start_date, target_date, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 1, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(goal.start_weight_kg)
        .bind(goal.target_weight_kg)
        .bind(goal.start_date)
        .bind(goal.target_date)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(record)
    }

    /// The user's active goal, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn active_weight_goal(&self, user_id: Uuid) -> AppResult<Option<WeightGoalRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, start_weight, target_weight, start_date, target_date, is_active, created_at
            FROM weight_goals WHERE user_id = $1 AND is_active = 1
            ORDER BY created_at DESC LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_goal).transpose()
    }

    fn row_to_goal(row: &sqlx::sqlite::SqliteRow) -> AppResult<WeightGoalRecord> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let start_date: NaiveDate = row.try_get("start_date")?;
        let target_date: Option<NaiveDate> = row.try_get("target_date")?;

        Ok(WeightGoalRecord {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            goal: WeightGoal {
                start_weight_kg: row.try_get("start_weight")?,
                target_weight_kg: row.try_get("target_weight")?,
                start_date,
                target_date,
            },
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
