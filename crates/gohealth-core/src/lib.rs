// ABOUTME: Core types and constants for the GoHealth tracking backend
// ABOUTME: Foundation crate with error handling, date codec, validation, models and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![deny(unsafe_code)]

//! # GoHealth Core
//!
//! Foundation crate providing shared types and constants for the GoHealth nutrition,
//! activity and weight-goal platform. It changes rarely so the calculation crate and the
//! server can compile against a stable base.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **dates**: The `DD-MM-YYYY` wire format for calendar dates
//! - **validation**: Declarative field-level request validation
//! - **models**: Biometric, nutrition, activity, goal and dashboard value types
//! - **constants**: Physiological constants and accepted input ranges

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// `DD-MM-YYYY` parsing, formatting and serde adapters
pub mod dates;

/// Declarative schema validation producing field-level error lists
pub mod validation;

/// Core data models shared by the calculators and the server
pub mod models;
