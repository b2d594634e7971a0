// ABOUTME: Biometric profile models used by the metabolic calculator
// ABOUTME: Sex, ActivityLevel, BiometricProfile, ProfileSnapshot, BmiStatus and BmiResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::constants::{biometric_ranges, bmi};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl Sex {
    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
        }
    }

    /// Parse the wire name, `None` for anything else
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MALE" => Some(Self::Male),
            "FEMALE" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Little or no exercise (multiplier 1.2)
    #[default]
    #[serde(rename = "SEDENTARY")]
    Sedentary,
    /// Light exercise 1-3 days/week (multiplier 1.375)
    #[serde(rename = "LIGHTLY")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week (multiplier 1.55)
    #[serde(rename = "MODERATELY_ACTIVE")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week (multiplier 1.725)
    #[serde(rename = "VERY_ACTIVE")]
    VeryActive,
    /// Very hard exercise or a physical job (multiplier 1.9)
    #[serde(rename = "EXTRA_ACTIVE")]
    ExtraActive,
}

impl ActivityLevel {
    /// All recognised levels
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Values accepted by profile updates, including the legacy `ACTIVE`
    pub const ACCEPTED_INPUT: [&'static str; 6] = [
        "SEDENTARY",
        "LIGHTLY",
        "ACTIVE",
        "MODERATELY_ACTIVE",
        "VERY_ACTIVE",
        "EXTRA_ACTIVE",
    ];

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "SEDENTARY",
            Self::LightlyActive => "LIGHTLY",
            Self::ModeratelyActive => "MODERATELY_ACTIVE",
            Self::VeryActive => "VERY_ACTIVE",
            Self::ExtraActive => "EXTRA_ACTIVE",
        }
    }

    /// Lenient parse of a stored level
    ///
    /// Returns `None` for values without a multiplier, such as the legacy `ACTIVE`.
    /// Callers treat `None` as sedentary.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }
}

/// Validated inputs for BMR/TDEE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricProfile {
    /// Body weight in kg, within [20, 500]
    pub weight_kg: f64,
    /// Height in cm, within [50, 300]
    pub height_cm: f64,
    /// Age in years, within [1, 120]
    pub age_years: u32,
    /// Biological sex
    pub sex: Sex,
    /// Activity level
    pub activity_level: ActivityLevel,
}

impl BiometricProfile {
    /// Build a profile, enforcing the accepted biometric ranges
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first field outside its range.
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> AppResult<Self> {
        use biometric_ranges::{
            AGE_MAX, AGE_MIN, HEIGHT_MAX_CM, HEIGHT_MIN_CM, WEIGHT_MAX_KG, WEIGHT_MIN_KG,
        };

        if !(WEIGHT_MIN_KG..=WEIGHT_MAX_KG).contains(&weight_kg) {
            return Err(AppError::out_of_range(format!(
                "weight must be between {WEIGHT_MIN_KG} and {WEIGHT_MAX_KG} kg"
            )));
        }
        if !(HEIGHT_MIN_CM..=HEIGHT_MAX_CM).contains(&height_cm) {
            return Err(AppError::out_of_range(format!(
                "height must be between {HEIGHT_MIN_CM} and {HEIGHT_MAX_CM} cm"
            )));
        }
        if !(AGE_MIN..=AGE_MAX).contains(&i64::from(age_years)) {
            return Err(AppError::out_of_range(format!(
                "age must be between {AGE_MIN} and {AGE_MAX} years"
            )));
        }

        Ok(Self {
            weight_kg,
            height_cm,
            age_years,
            sex,
            activity_level,
        })
    }
}

/// The biometric part of a stored user profile, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    /// Body weight in kg
    pub weight_kg: Option<f64>,
    /// Height in cm
    pub height_cm: Option<f64>,
    /// Age in years
    pub age_years: Option<u32>,
    /// Biological sex
    pub sex: Option<Sex>,
    /// Raw stored activity level
    pub activity_level: Option<String>,
}

impl ProfileSnapshot {
    /// Names of the biometric fields still missing
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.weight_kg.is_none() {
            missing.push("weight");
        }
        if self.height_cm.is_none() {
            missing.push("height");
        }
        if self.age_years.is_none() {
            missing.push("age");
        }
        if self.sex.is_none() {
            missing.push("gender");
        }
        if self.activity_level.is_none() {
            missing.push("activityLevel");
        }
        missing
    }

    /// Convert to a validated profile
    ///
    /// A stored activity level without a multiplier maps to sedentary.
    ///
    /// # Errors
    ///
    /// Returns `ProfileIncomplete` when any biometric is absent, or `ValueOutOfRange`
    /// when a stored value violates the accepted ranges.
    pub fn biometrics(&self) -> AppResult<BiometricProfile> {
        let (Some(weight), Some(height), Some(age), Some(sex), Some(raw_level)) = (
            self.weight_kg,
            self.height_cm,
            self.age_years,
            self.sex,
            self.activity_level.as_deref(),
        ) else {
            return Err(AppError::profile_incomplete(&self.missing_fields()));
        };

        let level = ActivityLevel::parse(raw_level).unwrap_or_else(|| {
            tracing::debug!(
                activity_level = raw_level,
                "Unrecognised activity level, using sedentary"
            );
            ActivityLevel::Sedentary
        });

        BiometricProfile::new(weight, height, age, sex, level)
    }
}

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BmiStatus {
    /// BMI below 18.5
    Underweight,
    /// BMI in [18.5, 25)
    Normal,
    /// BMI in [25, 30)
    Overweight,
    /// BMI of 30 or more
    Obese,
}

impl BmiStatus {
    /// Classify a BMI value; each threshold belongs to the higher category
    #[must_use]
    pub fn from_bmi(value: f64) -> Self {
        if value < bmi::NORMAL_MIN {
            Self::Underweight
        } else if value < bmi::OVERWEIGHT_MIN {
            Self::Normal
        } else if value < bmi::OBESE_MIN {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Wire and storage name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "UNDERWEIGHT",
            Self::Normal => "NORMAL",
            Self::Overweight => "OVERWEIGHT",
            Self::Obese => "OBESE",
        }
    }

    /// Parse the storage name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "UNDERWEIGHT" => Some(Self::Underweight),
            "NORMAL" => Some(Self::Normal),
            "OVERWEIGHT" => Some(Self::Overweight),
            "OBESE" => Some(Self::Obese),
            _ => None,
        }
    }
}

/// BMI value rounded to one decimal with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// BMI rounded to one decimal
    pub bmi_value: f64,
    /// Category of `bmi_value`
    pub status: BmiStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_parse_rejects_legacy_active() {
        assert_eq!(ActivityLevel::parse("LIGHTLY"), Some(ActivityLevel::LightlyActive));
        assert_eq!(ActivityLevel::parse("ACTIVE"), None);
        assert_eq!(ActivityLevel::parse("sedentary"), None);
    }

    #[test]
    fn test_snapshot_reports_missing_fields() {
        let snapshot = ProfileSnapshot {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            ..ProfileSnapshot::default()
        };
        assert_eq!(snapshot.missing_fields(), vec!["age", "gender", "activityLevel"]);
        let err = snapshot.biometrics().unwrap_err();
        assert_eq!(err.http_status(), 412);
    }

    #[test]
    fn test_snapshot_unknown_level_is_sedentary() {
        let snapshot = ProfileSnapshot {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age_years: Some(30),
            sex: Some(Sex::Male),
            activity_level: Some("ACTIVE".to_owned()),
        };
        let profile = snapshot.biometrics().unwrap();
        assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
    }

    #[test]
    fn test_profile_range_enforced() {
        assert!(BiometricProfile::new(19.9, 175.0, 30, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(BiometricProfile::new(70.0, 301.0, 30, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(BiometricProfile::new(70.0, 175.0, 0, Sex::Male, ActivityLevel::Sedentary).is_err());
        assert!(BiometricProfile::new(20.0, 50.0, 120, Sex::Female, ActivityLevel::ExtraActive).is_ok());
    }
}
