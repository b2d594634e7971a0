// ABOUTME: Activity log database operations
// ABOUTME: CRUD over logged activities joined with their reference type

use super::{parse_stored, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::ActivityLog;
use chrono::NaiveDate;
use gohealth_core::models::{ActivityCategory, Intensity};
use sqlx::Row;
use uuid::Uuid;

const ACTIVITY_SELECT: &str = r"
    SELECT a.id, a.user_id, a.activity_type_id, t.name AS activity_name, t.category, t.met_value,
           a.date, a.duration, a.calories_burned, a.intensity, a.notes, a.created_at
    FROM activities a JOIN activity_types t ON t.id = a.activity_type_id
";

impl Database {
    /// Create the activities table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_activities(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                activity_type_id TEXT NOT NULL REFERENCES activity_types(id),
                date TEXT NOT NULL,
                duration REAL NOT NULL CHECK (duration > 0),
                calories_burned INTEGER NOT NULL,
                intensity TEXT,
                notes TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activities_user_date ON activities(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a new activity
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_activity(&self, activity: &ActivityLog) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO activities (id, user_id, activity_type_id, date, duration,
                                    calories_burned, intensity, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(activity.id.to_string())
        .bind(activity.user_id.to_string())
        .bind(&activity.activity_type_id)
        .bind(activity.date)
        .bind(activity.duration)
        .bind(activity.calories_burned)
        .bind(activity.intensity.map(Intensity::as_str))
        .bind(activity.notes.as_deref())
        .bind(activity.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Rewrite the mutable columns of an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_activity(&self, activity: &ActivityLog) -> AppResult<()> {
        sqlx::query(
            r"
            UPDATE activities SET duration = $1, calories_burned = $2, intensity = $3, notes = $4
            WHERE id = $5 AND user_id = $6
            ",
        )
        .bind(activity.duration)
        .bind(activity.calories_burned)
        .bind(activity.intensity.map(Intensity::as_str))
        .bind(activity.notes.as_deref())
        .bind(activity.id.to_string())
        .bind(activity.user_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// One of the user's activities
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_activity(
        &self,
        user_id: Uuid,
        activity_id: Uuid,
    ) -> AppResult<Option<ActivityLog>> {
        let query = format!("{ACTIVITY_SELECT} WHERE a.id = $1 AND a.user_id = $2");
        let row = sqlx::query(&query)
            .bind(activity_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_activity).transpose()
    }

    /// Delete one of the user's activities, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_activity(&self, user_id: Uuid, activity_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND user_id = $2")
            .bind(activity_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Activities dated within `[start, end]`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn activities_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ActivityLog>> {
        let query = format!(
            "{ACTIVITY_SELECT} WHERE a.user_id = $1 AND a.date >= $2 AND a.date <= $3 \
             ORDER BY a.date DESC, a.created_at DESC"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_activity).collect()
    }

    fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> AppResult<ActivityLog> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let category: String = row.try_get("category")?;
        let intensity: Option<String> = row.try_get("intensity")?;

        Ok(ActivityLog {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            activity_type_id: row.try_get("activity_type_id")?,
            activity_name: row.try_get("activity_name")?,
            category: parse_stored(&category, "activity category", ActivityCategory::parse)?,
            met_value: row.try_get("met_value")?,
            date: row.try_get("date")?,
            duration: row.try_get("duration")?,
            calories_burned: row.try_get("calories_burned")?,
            intensity: intensity
                .as_deref()
                .map(|i| parse_stored(i, "intensity", Intensity::parse))
                .transpose()?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
