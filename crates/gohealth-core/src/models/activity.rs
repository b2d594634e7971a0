// ABOUTME: Activity models for MET-based calorie burn estimation
// ABOUTME: ActivityRecord, ActivityCategory and Intensity definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use serde::{Deserialize, Serialize};

/// MET value and duration of one logged activity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Metabolic equivalent of the activity type
    pub met_value: f64,
    /// Duration in minutes, expected to be positive
    pub duration_minutes: f64,
}

/// Category of an activity type in the reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    /// Endurance work
    Cardio,
    /// Resistance work
    Strength,
    /// Mobility work
    Flexibility,
    /// Team and racket sports
    Sports,
    /// Household and everyday tasks
    Daily,
}

impl ActivityCategory {
    /// Accepted wire names
    pub const NAMES: [&'static str; 5] = ["CARDIO", "STRENGTH", "FLEXIBILITY", "SPORTS", "DAILY"];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cardio => "CARDIO",
            Self::Strength => "STRENGTH",
            Self::Flexibility => "FLEXIBILITY",
            Self::Sports => "SPORTS",
            Self::Daily => "DAILY",
        }
    }

    /// Parse the wire name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CARDIO" => Some(Self::Cardio),
            "STRENGTH" => Some(Self::Strength),
            "FLEXIBILITY" => Some(Self::Flexibility),
            "SPORTS" => Some(Self::Sports),
            "DAILY" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Self-reported effort of a logged activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    /// Easy
    Low,
    /// Moderate
    Moderate,
    /// Hard
    High,
}

impl Intensity {
    /// Accepted wire names
    pub const NAMES: [&'static str; 3] = ["LOW", "MODERATE", "HIGH"];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }

    /// Parse the wire name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOW" => Some(Self::Low),
            "MODERATE" => Some(Self::Moderate),
            "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}
