// ABOUTME: Domain service layer shared by the REST routes
// ABOUTME: Combines database collaborators with the intelligence calculators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Services
//!
//! Route handlers stay thin: they authenticate, validate and then call one function
//! here. Services take the [`Database`](crate::database::Database) by reference and
//! return `AppResult`, so the same flows can be driven from tests without HTTP.

/// Activity logging with MET-based calorie estimates
pub mod activities;
/// BMI measurements and weight goals
pub mod bmi;
/// Dashboard aggregation
pub mod dashboard;
/// Meal logging and daily nutrition totals
pub mod meals;
/// Notification persistence, delivery and achievements
pub mod notifications;
/// Profile, metabolic figures and nutrition targets
pub mod profile;

pub use notifications::Notifier;
