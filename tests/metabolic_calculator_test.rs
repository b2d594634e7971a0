// ABOUTME: Tests for BMR, TDEE, BMI, activity burn and the goal-driven daily calorie target
// ABOUTME: Reference values worked by hand from Mifflin-St Jeor and the MET formula
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use gohealth_core::errors::ErrorCode;
use gohealth_core::models::{ActivityLevel, BiometricProfile, BmiStatus, ProfileSnapshot, Sex};
use gohealth_intelligence::{
    activity_multiplier, bmi_status, calculate_activity_calories, calculate_bmi,
    calculate_bmi_result, calculate_bmr, calculate_daily_calorie_target_on, calculate_macros,
    calculate_tdee, daily_metabolics, nutrition_target_range,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_bmr_mifflin_st_jeor() {
    // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
    assert_eq!(calculate_bmr(70.0, 175.0, 30, Sex::Male), 1649);
    // 10*70 + 6.25*175 - 5*30 - 161 = 1482.75
    assert_eq!(calculate_bmr(70.0, 175.0, 30, Sex::Female), 1483);
    // 10*55 + 6.25*160 - 5*45 - 161 = 1164
    assert_eq!(calculate_bmr(55.0, 160.0, 45, Sex::Female), 1164);
}

#[test]
fn test_tdee_per_activity_level() {
    let bmr = 1649;
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::Sedentary)), 1979);
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::LightlyActive)), 2267);
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::ModeratelyActive)), 2556);
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::VeryActive)), 2845);
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::ExtraActive)), 3133);
}

#[test]
fn test_unknown_activity_level_uses_sedentary() {
    assert_eq!(calculate_tdee(1649, None), calculate_tdee(1649, Some(ActivityLevel::Sedentary)));

    let snapshot = ProfileSnapshot {
        weight_kg: Some(70.0),
        height_cm: Some(175.0),
        age_years: Some(30),
        sex: Some(Sex::Male),
        activity_level: Some("COUCH_POTATO".to_owned()),
    };
    let profile = snapshot.biometrics().unwrap();
    assert_eq!(profile.activity_level, ActivityLevel::Sedentary);
    assert_eq!(daily_metabolics(&profile).tdee, 1979);
}

#[test]
fn test_activity_multipliers_increase_with_level() {
    let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| activity_multiplier(*l)).collect();
    assert!(multipliers.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_daily_metabolics_for_profile() {
    let profile =
        BiometricProfile::new(70.0, 175.0, 30, Sex::Male, ActivityLevel::ModeratelyActive).unwrap();
    let summary = daily_metabolics(&profile);
    assert_eq!(summary.bmr, 1649);
    assert_eq!(summary.tdee, 2556);
}

#[test]
fn test_biometric_profile_rejects_out_of_range_values() {
    let too_light = BiometricProfile::new(19.9, 175.0, 30, Sex::Male, ActivityLevel::Sedentary);
    assert_eq!(too_light.unwrap_err().code, ErrorCode::ValueOutOfRange);

    let too_tall = BiometricProfile::new(70.0, 300.1, 30, Sex::Male, ActivityLevel::Sedentary);
    assert_eq!(too_tall.unwrap_err().code, ErrorCode::ValueOutOfRange);

    let too_young = BiometricProfile::new(70.0, 175.0, 0, Sex::Male, ActivityLevel::Sedentary);
    assert_eq!(too_young.unwrap_err().code, ErrorCode::ValueOutOfRange);

    assert!(BiometricProfile::new(20.0, 50.0, 1, Sex::Female, ActivityLevel::Sedentary).is_ok());
    assert!(BiometricProfile::new(500.0, 300.0, 120, Sex::Male, ActivityLevel::Sedentary).is_ok());
}

#[test]
fn test_incomplete_snapshot_lists_missing_fields() {
    let snapshot = ProfileSnapshot {
        weight_kg: Some(70.0),
        ..ProfileSnapshot::default()
    };
    let err = snapshot.biometrics().unwrap_err();
    assert_eq!(err.code, ErrorCode::ProfileIncomplete);
    assert_eq!(
        snapshot.missing_fields(),
        vec!["height", "age", "gender", "activityLevel"]
    );
}

#[test]
fn test_bmi_rounded_to_one_decimal() {
    // 70 / 1.75^2 = 22.857...
    assert!((calculate_bmi(70.0, 175.0) - 22.9).abs() < 1e-9);
    // 100 / 2.0^2 = 25.0
    assert!((calculate_bmi(100.0, 200.0) - 25.0).abs() < 1e-9);

    let result = calculate_bmi_result(70.0, 175.0);
    assert_eq!(result.status, BmiStatus::Normal);
}

#[test]
fn test_bmi_for_fractional_measurements() {
    // 70.2 / 1.755^2 = 22.79...
    assert!((calculate_bmi(70.2, 175.5) - 22.8).abs() < 1e-9);
    assert_eq!(bmi_status(calculate_bmi(70.2, 175.5)), BmiStatus::Normal);
}

#[test]
fn test_bmi_thresholds_belong_to_higher_category() {
    assert_eq!(bmi_status(18.4), BmiStatus::Underweight);
    assert_eq!(bmi_status(18.5), BmiStatus::Normal);
    assert_eq!(bmi_status(24.9), BmiStatus::Normal);
    assert_eq!(bmi_status(25.0), BmiStatus::Overweight);
    assert_eq!(bmi_status(29.9), BmiStatus::Overweight);
    assert_eq!(bmi_status(30.0), BmiStatus::Obese);
}

#[test]
fn test_activity_calories_from_met() {
    // 7.0 MET * 70 kg * 0.5 h
    assert_eq!(calculate_activity_calories(7.0, 70.0, 30.0), 245);
    // 9.8 MET * 70 kg * 0.5 h
    assert_eq!(calculate_activity_calories(9.8, 70.0, 30.0), 343);
    // 3.5 MET * 80 kg * 0.75 h
    assert_eq!(calculate_activity_calories(3.5, 80.0, 45.0), 210);
}

#[test]
fn test_calorie_target_spreads_deficit_over_remaining_days() {
    let today = date(2025, 1, 1);
    // 60 days to lose 5 kg: 38500 / 60 = 641.67 kcal/day below 2556
    let target =
        calculate_daily_calorie_target_on(2556, 80.0, 75.0, date(2025, 3, 2), Sex::Male, today);
    assert_eq!(target, 1914);
}

#[test]
fn test_calorie_target_floors_at_max_deficit() {
    let today = date(2025, 1, 1);
    // 20 kg in 30 days asks for 5133 kcal/day; tdee - 1000 = 1556 beats the male minimum
    let target =
        calculate_daily_calorie_target_on(2556, 100.0, 80.0, date(2025, 1, 31), Sex::Male, today);
    assert_eq!(target, 1556);
}

#[test]
fn test_calorie_target_floors_at_sex_minimum() {
    let today = date(2025, 1, 1);
    // Female minimum 1200 beats tdee - 1000 = 800
    let target =
        calculate_daily_calorie_target_on(1800, 90.0, 60.0, date(2025, 2, 1), Sex::Female, today);
    assert_eq!(target, 1200);
}

#[test]
fn test_calorie_target_for_weight_gain_adds_surplus() {
    let today = date(2025, 1, 1);
    // Gain 5 kg over 50 days: +770 kcal/day
    let target =
        calculate_daily_calorie_target_on(2000, 60.0, 65.0, date(2025, 2, 20), Sex::Male, today);
    assert_eq!(target, 2770);
}

#[test]
fn test_calorie_target_due_today_or_past_returns_tdee() {
    let today = date(2025, 6, 15);
    assert_eq!(
        calculate_daily_calorie_target_on(2300, 80.0, 70.0, today, Sex::Male, today),
        2300
    );
    assert_eq!(
        calculate_daily_calorie_target_on(2300, 80.0, 70.0, date(2025, 6, 1), Sex::Female, today),
        2300
    );
}

#[test]
fn test_calculators_are_repeatable() {
    let today = date(2025, 1, 1);
    let profile =
        BiometricProfile::new(82.5, 178.0, 34, Sex::Female, ActivityLevel::LightlyActive).unwrap();

    for _ in 0..3 {
        assert_eq!(
            calculate_bmr(82.5, 178.0, 34, Sex::Female),
            calculate_bmr(82.5, 178.0, 34, Sex::Female)
        );
        assert_eq!(daily_metabolics(&profile), daily_metabolics(&profile));
        assert_eq!(
            calculate_tdee(1649, Some(ActivityLevel::VeryActive)),
            calculate_tdee(1649, Some(ActivityLevel::VeryActive))
        );
        assert!((calculate_bmi(82.5, 178.0) - calculate_bmi(82.5, 178.0)).abs() < f64::EPSILON);
        assert_eq!(
            calculate_activity_calories(6.0, 82.5, 40.0),
            calculate_activity_calories(6.0, 82.5, 40.0)
        );
        let target_date = date(2025, 4, 1);
        assert_eq!(
            calculate_daily_calorie_target_on(2400, 82.5, 75.0, target_date, Sex::Female, today),
            calculate_daily_calorie_target_on(2400, 82.5, 75.0, target_date, Sex::Female, today)
        );
        assert_eq!(calculate_macros(2000.0), calculate_macros(2000.0));
        assert_eq!(nutrition_target_range(2400), nutrition_target_range(2400));
    }
}

#[test]
fn test_tdee_never_below_bmr_for_any_level() {
    for bmr in [0, 1, 1164, 1649, 2500] {
        for level in ActivityLevel::ALL {
            assert!(calculate_tdee(bmr, Some(level)) >= bmr, "{level:?} at {bmr}");
        }
        assert!(calculate_tdee(bmr, None) >= bmr);
    }
}
