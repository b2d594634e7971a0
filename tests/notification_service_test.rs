// ABOUTME: Integration tests for notification delivery, achievements and listing
// ABOUTME: Uses a recording push gateway to observe deliveries, token cleanup and de-duplication
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Days, NaiveDate, Utc};
use common::{create_complete_user, create_test_server_resources, GatewayMode};
use gohealth_core::errors::ErrorCode;
use gohealth_core::models::{MealType, NotificationKind, WeightGoal};
use gohealth_server::models::NotificationFilter;
use gohealth_server::notifications::{AchievementDeduplicator, AchievementKey};
use gohealth_server::services::{bmi, meals, notifications};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn meal_on(food_id: &str, date: NaiveDate, quantity: f64) -> meals::NewMeal {
    meals::NewMeal {
        food_id: food_id.to_owned(),
        meal_type: MealType::Lunch,
        date,
        quantity,
        unit: None,
    }
}

fn key(user_id: Uuid) -> AchievementKey {
    AchievementKey {
        user_id,
        date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        kind: NotificationKind::DailyCaloryAchievement,
    }
}

#[tokio::test]
async fn test_dedup_release_allows_reclaim() {
    let dedup = AchievementDeduplicator::new(10, Duration::from_secs(3600));
    let user_id = Uuid::new_v4();

    assert!(dedup.try_claim(key(user_id)).await);
    assert!(!dedup.try_claim(key(user_id)).await);
    dedup.release(&key(user_id)).await;
    assert!(dedup.try_claim(key(user_id)).await);
    assert_eq!(dedup.len().await, 1);
}

#[tokio::test]
async fn test_dedup_capacity_evicts_oldest() {
    let dedup = AchievementDeduplicator::new(2, Duration::from_secs(3600));
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    assert!(dedup.try_claim(key(a)).await);
    assert!(dedup.try_claim(key(b)).await);
    assert!(dedup.try_claim(key(c)).await);
    assert_eq!(dedup.len().await, 2);
    assert!(dedup.try_claim(key(a)).await);
}

#[tokio::test]
async fn test_notify_without_token_stores_only() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let (user_id, _) = create_complete_user(&resources.database).await.unwrap();

    let record = resources
        .notifier
        .send_test(user_id, None, None)
        .await
        .unwrap();
    assert_eq!(record.kind, NotificationKind::TestNotification);
    assert!(!record.is_sent);
    assert_eq!(gateway.sent_count(), 0);
}

#[tokio::test]
async fn test_notify_delivers_with_badge_and_marks_sent() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let (user_id, _) = create_complete_user(&resources.database).await.unwrap();
    resources
        .database
        .set_push_token(user_id, Some("device-1"))
        .await
        .unwrap();

    let record = resources
        .notifier
        .send_test(user_id, Some("Hello"), Some("World"))
        .await
        .unwrap();
    assert!(record.is_sent);
    assert!(record.sent_at.is_some());

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "device-1");
    assert_eq!(sent[0].title, "Hello");
    assert_eq!(sent[0].badge, 1);
    assert_eq!(
        sent[0].data.get("notificationId"),
        Some(&record.id.to_string())
    );

    let stored = resources
        .database
        .get_notification(user_id, record.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_sent);
}

#[tokio::test]
async fn test_unregistered_token_is_cleared() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let (user_id, _) = create_complete_user(&resources.database).await.unwrap();
    resources
        .database
        .set_push_token(user_id, Some("stale"))
        .await
        .unwrap();
    gateway.set_mode(GatewayMode::Unregistered);

    let record = resources
        .notifier
        .notify(
            user_id,
            NotificationKind::MealReminder,
            "Lunch time",
            "Log your lunch",
            BTreeMap::new(),
        )
        .await
        .unwrap();
    assert!(!record.is_sent);

    let profile = resources.database.require_user_profile(user_id).await.unwrap();
    assert!(profile.push_token.is_none());
}

#[tokio::test]
async fn test_gateway_failure_keeps_notification_unsent() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let (user_id, _) = create_complete_user(&resources.database).await.unwrap();
    resources
        .database
        .set_push_token(user_id, Some("device-1"))
        .await
        .unwrap();
    gateway.set_mode(GatewayMode::Fail);

    let err = resources
        .notifier
        .send_test(user_id, None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);

    let (stored, total) = resources
        .database
        .list_notifications(user_id, NotificationFilter::default(), 0, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert!(!stored[0].is_sent);
}

#[tokio::test]
async fn test_daily_achievement_sent_once() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_complete_user(db).await.unwrap();
    db.set_push_token(user_id, Some("device-1")).await.unwrap();

    meals::log_meal(db, &resources.notifier, user_id, meal_on("banana", today(), 1.0))
        .await
        .unwrap();
    assert_eq!(gateway.sent_count(), 0);

    // 14 cups of rice clears the ~2711 kcal target of the test profile
    meals::log_meal(db, &resources.notifier, user_id, meal_on("white-rice", today(), 14.0))
        .await
        .unwrap();
    assert_eq!(gateway.sent_count(), 1);
    let push = &gateway.sent()[0];
    assert_eq!(
        push.data.get("type").map(String::as_str),
        Some("DAILY_CALORY_ACHIEVEMENT")
    );
    assert!(push.body.contains("out of"));

    meals::log_meal(db, &resources.notifier, user_id, meal_on("apple", today(), 1.0))
        .await
        .unwrap();
    assert_eq!(gateway.sent_count(), 1);

    let filter = NotificationFilter {
        is_read: None,
        kind: Some(NotificationKind::DailyCaloryAchievement),
    };
    let (_, total) = db.list_notifications(user_id, filter, 0, 10).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_achievement_ignores_other_days_and_incomplete_profiles() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let db = &resources.database;

    let (user_id, _) = create_complete_user(db).await.unwrap();
    db.set_push_token(user_id, Some("device-1")).await.unwrap();
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
    meals::log_meal(db, &resources.notifier, user_id, meal_on("white-rice", yesterday, 20.0))
        .await
        .unwrap();

    let incomplete = Uuid::new_v4();
    db.set_push_token(incomplete, Some("device-2")).await.unwrap();
    meals::log_meal(db, &resources.notifier, incomplete, meal_on("white-rice", today(), 20.0))
        .await
        .unwrap();

    assert_eq!(gateway.sent_count(), 0);
}

#[tokio::test]
async fn test_failed_achievement_delivery_is_retried_on_next_meal() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_complete_user(db).await.unwrap();
    db.set_push_token(user_id, Some("device-1")).await.unwrap();

    gateway.set_mode(GatewayMode::Fail);
    let meal = meals::log_meal(db, &resources.notifier, user_id, meal_on("white-rice", today(), 14.0))
        .await
        .unwrap();
    assert!(meal.nutrition.calories > 2800.0);

    gateway.set_mode(GatewayMode::Deliver);
    meals::log_meal(db, &resources.notifier, user_id, meal_on("banana", today(), 1.0))
        .await
        .unwrap();

    let sent = gateway.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent[1].data.get("type").map(String::as_str),
        Some("DAILY_CALORY_ACHIEVEMENT")
    );
}

#[tokio::test]
async fn test_bmi_record_reports_goal_progress() {
    let (resources, gateway) = create_test_server_resources().await.unwrap();
    let db = &resources.database;
    let (user_id, _) = create_complete_user(db).await.unwrap();
    db.set_push_token(user_id, Some("device-1")).await.unwrap();

    let goal = WeightGoal {
        start_weight_kg: 90.0,
        target_weight_kg: 80.0,
        start_date: today(),
        target_date: None,
    };
    bmi::create_goal(db, user_id, &goal).await.unwrap();

    let recorded = bmi::record_bmi(db, &resources.notifier, user_id, 175.0, 85.0)
        .await
        .unwrap();
    assert!((recorded.record.bmi - 27.8).abs() < 1e-9);
    assert!(recorded.nutrition.is_some());

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].data.get("progress").map(String::as_str), Some("50"));
    assert!(sent[0].body.contains("50% closer"));
}

#[tokio::test]
async fn test_listing_pages_are_one_based() {
    let (resources, _) = create_test_server_resources().await.unwrap();
    let db = &resources.database;
    let user_id = Uuid::new_v4();
    for _ in 0..3 {
        resources.notifier.send_test(user_id, None, None).await.unwrap();
    }

    let page = notifications::list_notifications(db, user_id, NotificationFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(page.notifications.len(), 1);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);

    for (page, limit) in [(0, 20), (1, 0), (1, 101)] {
        let err = notifications::list_notifications(db, user_id, NotificationFilter::default(), page, limit)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}

#[tokio::test]
async fn test_mark_read_and_delete_unknown_notification() {
    let (resources, _) = create_test_server_resources().await.unwrap();
    let db = &resources.database;
    let user_id = Uuid::new_v4();

    let err = notifications::mark_read(db, user_id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    let err = notifications::delete(db, user_id, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
