// ABOUTME: Integration tests for the SQLite store
// ABOUTME: Profiles, BMI history, goals, catalog lookups, meals, activities and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{NaiveDate, Utc};
use common::{create_complete_user, create_test_database};
use gohealth_core::models::{
    ActivityCategory, BmiResult, BmiStatus, MealType, NotificationKind, Sex, WeightGoal,
};
use gohealth_server::models::{
    MealRecord, NotificationFilter, NutritionTotals, ProfileChanges,
};
use serde_json::json;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn meal(user_id: Uuid, day: NaiveDate, calories: f64) -> MealRecord {
    let now = Utc::now();
    MealRecord {
        id: Uuid::new_v4(),
        user_id,
        food_id: "banana".to_owned(),
        food_name: "Banana".to_owned(),
        meal_type: MealType::Snack,
        date: day,
        quantity: 1.0,
        unit: "serving".to_owned(),
        nutrition: NutritionTotals {
            calories,
            protein: 1.0,
            carbohydrates: 20.0,
            fat: 0.5,
        },
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_partial_profile_update_keeps_other_fields() {
    let db = create_test_database().await.unwrap();
    let (user_id, profile) = create_complete_user(&db).await.unwrap();
    assert_eq!(profile.sex, Some(Sex::Male));

    let changes = ProfileChanges {
        weight: Some(78.5),
        ..ProfileChanges::default()
    };
    let updated = db.upsert_user_profile(user_id, &changes).await.unwrap();
    assert_eq!(updated.weight, Some(78.5));
    assert_eq!(updated.height, Some(175.0));
    assert_eq!(updated.age, Some(30));
    assert_eq!(updated.activity_level.as_deref(), Some("MODERATELY_ACTIVE"));
}

#[tokio::test]
async fn test_missing_profile() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    assert!(db.get_user_profile(user_id).await.unwrap().is_none());
    assert!(db.require_user_profile(user_id).await.is_err());
}

#[tokio::test]
async fn test_push_token_set_and_clear() {
    let db = create_test_database().await.unwrap();
    let (user_id, _) = create_complete_user(&db).await.unwrap();

    db.set_push_token(user_id, Some("device-token")).await.unwrap();
    let profile = db.require_user_profile(user_id).await.unwrap();
    assert_eq!(profile.push_token.as_deref(), Some("device-token"));
    assert_eq!(profile.weight, Some(80.0));

    db.set_push_token(user_id, None).await.unwrap();
    assert!(db.require_user_profile(user_id).await.unwrap().push_token.is_none());
}

#[tokio::test]
async fn test_bmi_history_newest_first_with_limit() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    for (bmi, status) in [
        (26.1, BmiStatus::Overweight),
        (25.4, BmiStatus::Overweight),
        (24.8, BmiStatus::Normal),
    ] {
        let result = BmiResult {
            bmi_value: bmi,
            status,
        };
        db.insert_bmi_record(user_id, 175.0, 80.0, &result).await.unwrap();
    }

    let history = db.bmi_history(user_id, 2).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!((history[0].bmi - 24.8).abs() < 1e-9);
    assert!((history[1].bmi - 25.4).abs() < 1e-9);

    let latest = db.latest_bmi(user_id).await.unwrap().unwrap();
    assert_eq!(latest.status, BmiStatus::Normal);
    assert!(db.latest_bmi(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_new_goal_deactivates_previous() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    let first = WeightGoal {
        start_weight_kg: 90.0,
        target_weight_kg: 85.0,
        start_date: date(2025, 1, 1),
        target_date: Some(date(2025, 3, 1)),
    };
    let second = WeightGoal {
        target_weight_kg: 80.0,
        target_date: None,
        ..first
    };

    db.create_weight_goal(user_id, &first).await.unwrap();
    let created = db.create_weight_goal(user_id, &second).await.unwrap();

    let active = db.active_weight_goal(user_id).await.unwrap().unwrap();
    assert_eq!(active.id, created.id);
    assert_eq!(active.goal, second);
    assert!(active.is_active);
}

#[tokio::test]
async fn test_catalog_lookups() {
    let db = create_test_database().await.unwrap();

    let results = db.search_foods("EGG", 50).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|f| f.id.as_str()).collect();
    assert!(ids.contains(&"boiled-egg"));
    assert!(ids.contains(&"fried-egg"));

    let chicken = db.get_food("chicken-breast").await.unwrap().unwrap();
    assert!((chicken.calories - 165.0).abs() < 1e-9);
    assert!(db.get_food("unicorn-steak").await.unwrap().is_none());

    let running = db.get_activity_type("running").await.unwrap().unwrap();
    assert!((running.met_value - 9.8).abs() < 1e-9);

    let flexibility = db
        .list_activity_types(Some(ActivityCategory::Flexibility))
        .await
        .unwrap();
    assert!(!flexibility.is_empty());
    assert!(flexibility
        .iter()
        .all(|t| t.category == ActivityCategory::Flexibility));
    assert!(db.list_activity_types(None).await.unwrap().len() > flexibility.len());
}

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = create_test_database().await.unwrap();
    let before = db.list_activity_types(None).await.unwrap().len();
    db.seed_reference_data().await.unwrap();
    assert_eq!(db.list_activity_types(None).await.unwrap().len(), before);
}

#[tokio::test]
async fn test_meal_totals_and_ranges_are_per_user() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let other = Uuid::new_v4();

    db.insert_meal(&meal(user_id, date(2025, 3, 10), 400.0)).await.unwrap();
    db.insert_meal(&meal(user_id, date(2025, 3, 10), 250.0)).await.unwrap();
    db.insert_meal(&meal(user_id, date(2025, 3, 12), 900.0)).await.unwrap();
    db.insert_meal(&meal(other, date(2025, 3, 10), 5000.0)).await.unwrap();

    let totals = db.meal_totals_on(user_id, date(2025, 3, 10)).await.unwrap();
    assert!((totals.calories - 650.0).abs() < 1e-9);
    assert!((totals.carbohydrates - 40.0).abs() < 1e-9);

    let empty = db.meal_totals_on(user_id, date(2025, 3, 11)).await.unwrap();
    assert!(empty.calories.abs() < 1e-9);

    let entries = db
        .meal_calories_between(user_id, date(2025, 3, 9), date(2025, 3, 15))
        .await
        .unwrap();
    let total: f64 = entries.iter().map(|e| e.total_calories).sum();
    assert!((total - 1550.0).abs() < 1e-9);

    let meals = db
        .meals_between(user_id, date(2025, 3, 10), date(2025, 3, 10))
        .await
        .unwrap();
    assert_eq!(meals.len(), 2);
}

#[tokio::test]
async fn test_meal_delete_is_scoped_to_owner() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let record = meal(user_id, date(2025, 3, 10), 300.0);
    db.insert_meal(&record).await.unwrap();

    assert!(!db.delete_meal(Uuid::new_v4(), record.id).await.unwrap());
    assert!(db.delete_meal(user_id, record.id).await.unwrap());
    assert!(db.get_meal(user_id, record.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_notification_listing_filters_and_counts() {
    let db = create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    let mut ids = Vec::new();
    for kind in [
        NotificationKind::TestNotification,
        NotificationKind::DailyCaloryAchievement,
        NotificationKind::TestNotification,
    ] {
        let record = db
            .insert_notification(user_id, kind, "title", "body", &json!({}))
            .await
            .unwrap();
        assert!(!record.is_read);
        assert!(!record.is_sent);
        ids.push(record.id);
    }
    assert_eq!(db.unread_notification_count(user_id).await.unwrap(), 3);

    let read = db.mark_notification_read(user_id, ids[0]).await.unwrap().unwrap();
    assert!(read.is_read);
    assert!(read.read_at.is_some());
    assert!(db
        .mark_notification_read(Uuid::new_v4(), ids[1])
        .await
        .unwrap()
        .is_none());

    let unread_tests = NotificationFilter {
        is_read: Some(false),
        kind: Some(NotificationKind::TestNotification),
    };
    let (page, total) = db
        .list_notifications(user_id, unread_tests, 0, 20)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(page[0].id, ids[2]);

    let (first_page, total) = db
        .list_notifications(user_id, NotificationFilter::default(), 0, 2)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(first_page.len(), 2);

    assert_eq!(db.mark_all_notifications_read(user_id).await.unwrap(), 2);
    assert_eq!(db.unread_notification_count(user_id).await.unwrap(), 0);

    assert!(db.delete_notification(user_id, ids[1]).await.unwrap());
    assert!(!db.delete_notification(user_id, ids[1]).await.unwrap());
    assert!(db.get_notification(user_id, ids[1]).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("gohealth.db").display());
    let user_id = Uuid::new_v4();

    {
        let db = gohealth_server::database::Database::new(&url).await.unwrap();
        db.seed_reference_data().await.unwrap();
        db.insert_meal(&meal(user_id, date(2025, 3, 10), 420.0)).await.unwrap();
        db.pool().close().await;
    }

    let reopened = gohealth_server::database::Database::new(&url).await.unwrap();
    let totals = reopened.meal_totals_on(user_id, date(2025, 3, 10)).await.unwrap();
    assert!((totals.calories - 420.0).abs() < 1e-9);
    assert!(reopened.get_food("banana").await.unwrap().is_some());
}
