// ABOUTME: Notification database operations
// ABOUTME: Persisted notifications with paging, read state and delivery state

use super::{parse_stored, parse_uuid, Database};
use crate::errors::AppResult;
use crate::models::{NotificationFilter, NotificationRecord};
use chrono::Utc;
use gohealth_core::models::NotificationKind;
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the notifications table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_notifications(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                data TEXT NOT NULL DEFAULT '{}',
                is_read INTEGER NOT NULL DEFAULT 0,
                is_sent INTEGER NOT NULL DEFAULT 0,
                sent_at TEXT,
                read_at TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store a new unsent, unread notification
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_notification(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        body: &str,
        data: &serde_json::Value,
    ) -> AppResult<NotificationRecord> {
        let record = NotificationRecord {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: title.to_owned(),
            body: body.to_owned(),
            data: data.clone(),
            is_read: false,
            is_sent: false,
            sent_at: None,
            read_at: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, kind, title, body, data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(kind.as_str())
        .bind(title)
        .bind(body)
        .bind(serde_json::to_string(data)?)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Flag a notification as accepted by the push gateway
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_notification_sent(&self, notification_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET is_sent = 1, sent_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(notification_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// One page of the user's notifications, newest first, with the filtered total
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_notifications(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        offset: u32,
        limit: u32,
    ) -> AppResult<(Vec<NotificationRecord>, i64)> {
        let is_read = filter.is_read;
        let kind = filter.kind.map(NotificationKind::as_str);

        let rows = sqlx::query(
            r"
            SELECT id, user_id, kind, title, body, data, is_read, is_sent, sent_at, read_at, created_at
            FROM notifications
            WHERE user_id = $1 AND ($2 IS NULL OR is_read = $2) AND ($3 IS NULL OR kind = $3)
            ORDER BY created_at DESC, rowid DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(user_id.to_string())
        .bind(is_read)
        .bind(kind)
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND ($2 IS NULL OR is_read = $2) AND ($3 IS NULL OR kind = $3)
            ",
        )
        .bind(user_id.to_string())
        .bind(is_read)
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        let records = rows
            .iter()
            .map(Self::row_to_notification)
            .collect::<AppResult<Vec<_>>>()?;
        Ok((records, total))
    }

    /// Number of unread notifications
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn unread_notification_count(&self, user_id: Uuid) -> AppResult<i64> {
        let count = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = 0",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Mark one notification read, returning it, or `None` if the user has no such notification
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_notification_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> AppResult<Option<NotificationRecord>> {
        sqlx::query(
            r"
            UPDATE notifications SET is_read = 1, read_at = COALESCE(read_at, $1)
            WHERE id = $2 AND user_id = $3
            ",
        )
        .bind(Utc::now())
        .bind(notification_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        self.get_notification(user_id, notification_id).await
    }

    /// Mark every unread notification read, returning how many changed
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn mark_all_notifications_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1, read_at = $1 WHERE user_id = $2 AND is_read = 0",
        )
        .bind(Utc::now())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete one notification, returning whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_notification(&self, user_id: Uuid, notification_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(notification_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One of the user's notifications
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_notification(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> AppResult<Option<NotificationRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, kind, title, body, data, is_read, is_sent, sent_at, read_at, created_at
            FROM notifications WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(notification_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_notification).transpose()
    }

    fn row_to_notification(row: &sqlx::sqlite::SqliteRow) -> AppResult<NotificationRecord> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let kind: String = row.try_get("kind")?;
        let data: String = row.try_get("data")?;

        Ok(NotificationRecord {
            id: parse_uuid(&id)?,
            user_id: parse_uuid(&user_id)?,
            kind: parse_stored(&kind, "notification kind", NotificationKind::parse)?,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            data: serde_json::from_str(&data)?,
            is_read: row.try_get("is_read")?,
            is_sent: row.try_get("is_sent")?,
            sent_at: row.try_get("sent_at")?,
            read_at: row.try_get("read_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
