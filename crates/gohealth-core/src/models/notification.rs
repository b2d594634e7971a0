// ABOUTME: Notification kind model shared by storage, delivery and de-duplication
// ABOUTME: NotificationKind with its storage names and default titles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use serde::{Deserialize, Serialize};

/// Kind of user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// Consumed calories reached the daily target
    DailyCaloryAchievement,
    /// Reminder to log a meal
    MealReminder,
    /// Weight goal progress update
    WeightGoalProgress,
    /// Manually triggered test push
    TestNotification,
}

impl NotificationKind {
    /// Accepted wire names
    pub const NAMES: [&'static str; 4] = [
        "DAILY_CALORY_ACHIEVEMENT",
        "MEAL_REMINDER",
        "WEIGHT_GOAL_PROGRESS",
        "TEST_NOTIFICATION",
    ];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyCaloryAchievement => "DAILY_CALORY_ACHIEVEMENT",
            Self::MealReminder => "MEAL_REMINDER",
            Self::WeightGoalProgress => "WEIGHT_GOAL_PROGRESS",
            Self::TestNotification => "TEST_NOTIFICATION",
        }
    }

    /// Parse the wire name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DAILY_CALORY_ACHIEVEMENT" => Some(Self::DailyCaloryAchievement),
            "MEAL_REMINDER" => Some(Self::MealReminder),
            "WEIGHT_GOAL_PROGRESS" => Some(Self::WeightGoalProgress),
            "TEST_NOTIFICATION" => Some(Self::TestNotification),
            _ => None,
        }
    }
}
