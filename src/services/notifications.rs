// ABOUTME: Notification service: persist, deliver through the push gateway, list and mark read
// ABOUTME: Sends the daily calorie achievement at most once per user, day and kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::profile::current_calorie_target;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{NotificationFilter, NotificationRecord};
use crate::notifications::{
    AchievementDeduplicator, AchievementKey, PushGateway, PushMessage, PushOutcome,
};
use chrono::{NaiveDate, Utc};
use gohealth_core::constants::limits;
use gohealth_core::models::{NotificationKind, WeightGoal};
use gohealth_intelligence::weight_goal_progress;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

const ACHIEVEMENT_TITLE: &str = "🎉 Daily Calory Goal Achieved!";
const WEIGHT_PROGRESS_TITLE: &str = "📊 Weight Goal Progress Update";
const TEST_TITLE: &str = "🧪 Test Notification";
const TEST_BODY: &str =
    "This is a test notification to verify that your notification system is working properly!";

/// Default page size for notification listings
pub const DEFAULT_PAGE_SIZE: u32 = limits::NOTIFICATIONS_PAGE_DEFAULT as u32;
/// Largest accepted page size
pub const MAX_PAGE_SIZE: u32 = limits::NOTIFICATIONS_PAGE_MAX as u32;

/// Paging metadata for notification listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Matching notifications across all pages
    pub total: i64,
    /// Number of pages
    pub total_pages: i64,
}

/// One page of notifications
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    /// Notifications, newest first
    pub notifications: Vec<NotificationRecord>,
    /// Paging metadata
    pub pagination: Pagination,
}

/// Persists notifications and hands them to the push gateway
#[derive(Clone)]
pub struct Notifier {
    database: Database,
    gateway: Arc<dyn PushGateway>,
    dedup: AchievementDeduplicator,
}

impl Notifier {
    /// Create a notifier
    #[must_use]
    pub fn new(
        database: Database,
        gateway: Arc<dyn PushGateway>,
        dedup: AchievementDeduplicator,
    ) -> Self {
        Self {
            database,
            gateway,
            dedup,
        }
    }

    /// Name of the configured gateway
    #[must_use]
    pub fn gateway_name(&self) -> &'static str {
        self.gateway.name()
    }

    /// Store a notification and push it to the user's device when a token is registered
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails or the push service rejects the message.
    /// The notification stays stored and unsent in the latter case.
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        title: &str,
        body: &str,
        data: BTreeMap<String, String>,
    ) -> AppResult<NotificationRecord> {
        let payload = serde_json::to_value(&data)?;
        let mut record = self
            .database
            .insert_notification(user_id, kind, title, body, &payload)
            .await?;

        let token = self
            .database
            .get_user_profile(user_id)
            .await?
            .and_then(|profile| profile.push_token);
        let Some(token) = token else {
            debug!(user_id = %user_id, kind = kind.as_str(), "No push token, notification stored only");
            AppLogger::log_notification(user_id, kind.as_str(), false);
            return Ok(record);
        };

        let unread = self.database.unread_notification_count(user_id).await?;
        let mut data = data;
        data.insert("notificationId".to_owned(), record.id.to_string());
        let message = PushMessage {
            token,
            title: title.to_owned(),
            body: body.to_owned(),
            data,
            badge: u32::try_from(unread).unwrap_or(u32::MAX),
        };

        match self.gateway.send(&message).await? {
            PushOutcome::Delivered { message_id } => {
                debug!(message_id = ?message_id, gateway = self.gateway.name(), "Push delivered");
                self.database.mark_notification_sent(record.id).await?;
                record.is_sent = true;
                record.sent_at = Some(Utc::now());
                AppLogger::log_notification(user_id, kind.as_str(), true);
            }
            PushOutcome::TokenNotRegistered => {
                warn!(user_id = %user_id, "Push token not registered, clearing it");
                self.database.set_push_token(user_id, None).await?;
                AppLogger::log_notification(user_id, kind.as_str(), false);
            }
            PushOutcome::Disabled => {
                AppLogger::log_notification(user_id, kind.as_str(), false);
            }
        }

        Ok(record)
    }

    /// Send a test push with optional custom text
    ///
    /// # Errors
    ///
    /// Returns an error if persistence or delivery fails
    pub async fn send_test(
        &self,
        user_id: Uuid,
        title: Option<&str>,
        body: Option<&str>,
    ) -> AppResult<NotificationRecord> {
        let kind = NotificationKind::TestNotification;
        let data = BTreeMap::from([
            ("type".to_owned(), kind.as_str().to_owned()),
            ("timestamp".to_owned(), Utc::now().to_rfc3339()),
        ]);
        self.notify(
            user_id,
            kind,
            title.unwrap_or(TEST_TITLE),
            body.unwrap_or(TEST_BODY),
            data,
        )
        .await
    }

    /// Notify once the day's consumed calories reach the target
    ///
    /// Only meals logged for `today` count. Returns whether a notification was sent.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup or delivery fails; a failed delivery releases the
    /// claim so a later meal can retry.
    pub async fn check_daily_achievement(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<bool> {
        if date != today {
            return Ok(false);
        }

        let Some(target) = current_calorie_target(&self.database, user_id, today)
            .await?
            .filter(|target| *target > 0)
        else {
            return Ok(false);
        };

        let consumed = self.database.meal_totals_on(user_id, date).await?.calories;
        if consumed < target as f64 {
            return Ok(false);
        }

        let kind = NotificationKind::DailyCaloryAchievement;
        let key = AchievementKey {
            user_id,
            date,
            kind,
        };
        if !self.dedup.try_claim(key).await {
            debug!(user_id = %user_id, %date, "Daily achievement already sent");
            return Ok(false);
        }

        let percentage = (consumed / target as f64 * 100.0).round() as i64;
        let body = format!(
            "Congratulations! You've consumed {consumed:.0} out of {target} calories ({percentage}%). Keep up the great work!"
        );
        let data = BTreeMap::from([
            ("type".to_owned(), kind.as_str().to_owned()),
            ("currentCalories".to_owned(), format!("{consumed:.0}")),
            ("targetCalories".to_owned(), target.to_string()),
            ("percentage".to_owned(), percentage.to_string()),
            ("timestamp".to_owned(), Utc::now().to_rfc3339()),
        ]);

        if let Err(e) = self
            .notify(user_id, kind, ACHIEVEMENT_TITLE, &body, data)
            .await
        {
            self.dedup.release(&key).await;
            return Err(e);
        }
        Ok(true)
    }

    /// Report progress toward the active goal after a new weight measurement
    ///
    /// # Errors
    ///
    /// Returns an error if persistence or delivery fails
    pub async fn notify_weight_goal_progress(
        &self,
        user_id: Uuid,
        goal: &WeightGoal,
        current_weight: f64,
    ) -> AppResult<NotificationRecord> {
        let kind = NotificationKind::WeightGoalProgress;
        let progress = weight_goal_progress(goal, Some(current_weight));
        let percent = progress.progress.round() as i64;
        let body = format!(
            "You're {percent}% closer to your goal! Current: {current_weight}kg, Target: {}kg",
            goal.target_weight_kg
        );
        let data = BTreeMap::from([
            ("type".to_owned(), kind.as_str().to_owned()),
            ("progress".to_owned(), percent.to_string()),
            ("currentWeight".to_owned(), current_weight.to_string()),
            ("targetWeight".to_owned(), goal.target_weight_kg.to_string()),
            ("timestamp".to_owned(), Utc::now().to_rfc3339()),
        ]);
        self.notify(user_id, kind, WEIGHT_PROGRESS_TITLE, &body, data)
            .await
    }
}

/// One page of the user's notifications
///
/// # Errors
///
/// Returns `InvalidInput` for page 0 or a page size outside `1..=100`
pub async fn list_notifications(
    database: &Database,
    user_id: Uuid,
    filter: NotificationFilter,
    page: u32,
    limit: u32,
) -> AppResult<NotificationPage> {
    if page == 0 {
        return Err(AppError::invalid_input("page must be at least 1"));
    }
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(AppError::invalid_input(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    let offset = (page - 1).saturating_mul(limit);
    let (notifications, total) = database
        .list_notifications(user_id, filter, offset, limit)
        .await?;
    let limit_wide = i64::from(limit);

    Ok(NotificationPage {
        notifications,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: (total + limit_wide - 1) / limit_wide,
        },
    })
}

/// Mark one notification read
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such notification
pub async fn mark_read(
    database: &Database,
    user_id: Uuid,
    notification_id: Uuid,
) -> AppResult<NotificationRecord> {
    database
        .mark_notification_read(user_id, notification_id)
        .await?
        .ok_or_else(|| AppError::not_found("Notification"))
}

/// Delete one notification
///
/// # Errors
///
/// Returns `ResourceNotFound` when the user has no such notification
pub async fn delete(database: &Database, user_id: Uuid, notification_id: Uuid) -> AppResult<()> {
    if database.delete_notification(user_id, notification_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Notification"))
    }
}
