// ABOUTME: BMI history database operations
// ABOUTME: Records measurements and lists them newest first

use super::{parse_stored, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::BmiRecord;
use chrono::Utc;
use gohealth_core::models::{BmiResult, BmiStatus};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the BMI records table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_bmi(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bmi_records (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                height REAL NOT NULL,
                weight REAL NOT NULL,
                bmi REAL NOT NULL,
                status TEXT NOT NULL,
                recorded_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bmi_records_user ON bmi_records(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a BMI measurement
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_bmi_record(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
        result: &BmiResult,
    ) -> AppResult<BmiRecord> {
        let record = BmiRecord {
            id: Uuid::new_v4(),
            user_id,
            height,
            weight,
            bmi: result.bmi_value,
            status: result.status,
            recorded_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO bmi_records (id, user_id, height, weight, bmi, status, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(height)
        .bind(weight)
        .bind(record.bmi)
        .bind(record.status.as_str())
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// The user's most recent measurements, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn bmi_history(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<BmiRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, height, weight, bmi, status, recorded_at
            FROM bmi_records WHERE user_id = $1
            ORDER BY recorded_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_bmi).collect()
    }

    /// The user's latest measurement
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest_bmi(&self, user_id: Uuid) -> AppResult<Option<BmiRecord>> {
        Ok(self.bmi_history(user_id, 1).await?.into_iter().next())
    }

    fn row_to_bmi(row: &sqlx::sqlite::SqliteRow) -> AppResult<BmiRecord> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let status: String = row.try_get("status")?;

        Ok(BmiRecord {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            height: row.try_get("height")?,
            weight: row.try_get("weight")?,
            bmi: row.try_get("bmi")?,
            status: parse_stored(&status, "BMI status", BmiStatus::parse)?,
            recorded_at: row.try_get("recorded_at")?,
        })
    }
}
