// ABOUTME: Tests for weight goal progress and BMI trend analysis
// ABOUTME: Clamping, zero-length goals, fallback to start weight and trend direction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use gohealth_core::models::{TrendDirection, WeightGoal};
use gohealth_intelligence::{bmi_trend, weight_goal_progress};

fn goal(start: f64, target: f64) -> WeightGoal {
    WeightGoal {
        start_weight_kg: start,
        target_weight_kg: target,
        start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        target_date: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_halfway_loss_goal() {
    let progress = weight_goal_progress(&goal(90.0, 80.0), Some(85.0));
    assert!(approx(progress.progress, 50.0));
    assert!(approx(progress.weight_lost, 5.0));
    assert!(approx(progress.weight_remaining, 5.0));
    assert!(approx(progress.current_weight, 85.0));
}

#[test]
fn test_progress_is_clamped() {
    let regressed = weight_goal_progress(&goal(90.0, 80.0), Some(95.0));
    assert!(approx(regressed.progress, 0.0));
    assert!(approx(regressed.weight_lost, -5.0));

    let overshot = weight_goal_progress(&goal(90.0, 80.0), Some(78.0));
    assert!(approx(overshot.progress, 100.0));
    assert!(approx(overshot.weight_remaining, -2.0));
}

#[test]
fn test_gain_goal_progress() {
    let progress = weight_goal_progress(&goal(60.0, 70.0), Some(62.5));
    assert!(approx(progress.progress, 25.0));
}

#[test]
fn test_zero_length_goal_is_complete() {
    let progress = weight_goal_progress(&goal(75.0, 75.0), Some(75.0));
    assert!(approx(progress.progress, 100.0));
}

#[test]
fn test_missing_weight_falls_back_to_start() {
    let progress = weight_goal_progress(&goal(90.0, 80.0), None);
    assert!(approx(progress.current_weight, 90.0));
    assert!(approx(progress.progress, 0.0));
}

#[test]
fn test_decreasing_bmi_trend() {
    let trend = bmi_trend(&[25.0, 24.0, 23.0]).unwrap();
    assert_eq!(trend.direction, TrendDirection::Decreasing);
    assert!(approx(trend.change, 2.0));
    assert!((trend.percentage - 8.0).abs() < 1e-6);
    assert!(approx(trend.average, 24.0));
}

#[test]
fn test_increasing_and_stable_trends() {
    let rising = bmi_trend(&[20.0, 22.0]).unwrap();
    assert_eq!(rising.direction, TrendDirection::Increasing);

    let single = bmi_trend(&[23.5]).unwrap();
    assert_eq!(single.direction, TrendDirection::Stable);
    assert!(approx(single.change, 0.0));
    assert!(approx(single.average, 23.5));
}

#[test]
fn test_empty_history_has_no_trend() {
    assert!(bmi_trend(&[]).is_none());
}
