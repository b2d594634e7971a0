// ABOUTME: Weight goal progress and BMI trend analysis
// ABOUTME: Clamped goal completion percentage and oldest-to-newest BMI direction/average
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use gohealth_core::models::{BmiTrend, GoalProgress, TrendDirection, WeightGoal};

/// Progress toward `goal` given the latest known weight
///
/// `current_weight_kg` falls back to the goal's start weight when no measurement exists.
/// Completion is clamped to `[0, 100]`; a goal whose start equals its target is complete.
#[must_use]
pub fn weight_goal_progress(goal: &WeightGoal, current_weight_kg: Option<f64>) -> GoalProgress {
    let current = current_weight_kg.unwrap_or(goal.start_weight_kg);
    let total = goal.start_weight_kg - goal.target_weight_kg;
    let covered = goal.start_weight_kg - current;

    let progress = if total == 0.0 {
        100.0
    } else {
        (covered / total * 100.0).clamp(0.0, 100.0)
    };

    GoalProgress {
        current_weight: current,
        progress,
        weight_lost: covered,
        weight_remaining: current - goal.target_weight_kg,
    }
}

/// Trend over BMI values ordered oldest to newest, `None` when empty
#[must_use]
pub fn bmi_trend(values: &[f64]) -> Option<BmiTrend> {
    let (&oldest, &latest) = (values.first()?, values.last()?);
    let change = latest - oldest;

    let direction = if change > 0.0 {
        TrendDirection::Increasing
    } else if change < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    let percentage = if oldest == 0.0 {
        0.0
    } else {
        (change / oldest * 100.0).abs()
    };

    Some(BmiTrend {
        direction,
        change: change.abs(),
        percentage,
        average: values.iter().sum::<f64>() / values.len() as f64,
    })
}
