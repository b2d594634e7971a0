// ABOUTME: Weight goal and BMI progress models
// ABOUTME: WeightGoal, GoalProgress, BmiTrend and TrendDirection definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::dates::{dd_mm_yyyy, option_dd_mm_yyyy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A weight goal with its timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightGoal {
    /// Weight when the goal was set (kg)
    pub start_weight_kg: f64,
    /// Desired weight (kg)
    pub target_weight_kg: f64,
    /// Day the goal starts
    #[serde(with = "dd_mm_yyyy")]
    pub start_date: NaiveDate,
    /// Deadline, absent for open-ended goals
    #[serde(with = "option_dd_mm_yyyy")]
    pub target_date: Option<NaiveDate>,
}

/// Progress of a weight goal at a given current weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Most recent known weight (kg)
    pub current_weight: f64,
    /// Completion percentage clamped to [0, 100]
    pub progress: f64,
    /// Signed change from the start weight toward the target (kg)
    pub weight_lost: f64,
    /// Signed distance still to cover (kg)
    pub weight_remaining: f64,
}

/// Direction of BMI over a window of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Newest value above oldest
    Increasing,
    /// Newest value below oldest
    Decreasing,
    /// Newest value equals oldest
    Stable,
}

/// BMI trend over a window of records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiTrend {
    /// Direction from oldest to newest
    pub direction: TrendDirection,
    /// Absolute BMI change
    pub change: f64,
    /// Absolute change relative to the oldest value, in percent
    pub percentage: f64,
    /// Mean BMI over the window
    pub average: f64,
}
