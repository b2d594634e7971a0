// ABOUTME: Declarative request validation producing field-level error lists
// ABOUTME: Validator rule builder, FieldError/ValidationErrors and the Validate trait for DTOs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Request Validation
//!
//! A single validation abstraction for every request body and query. DTOs implement
//! [`Validate`] by running a [`Validator`] over their fields; each rule appends a
//! [`FieldError`] instead of failing fast, so clients see every problem at once.
//!
//! Rules other than [`Validator::required`] ignore absent values, which lets the same
//! rules serve both create (all fields required) and partial update bodies.
//!
//! ```
//! use gohealth_core::validation::Validator;
//!
//! let mut v = Validator::new();
//! v.number_range("weight", Some(10.0), 20.0, 500.0)
//!     .one_of("gender", Some("MALE"), &["MALE", "FEMALE"]);
//! let errors = v.finish(()).unwrap_err();
//! assert_eq!(errors.errors()[0].field, "weight");
//! ```

use crate::dates;
use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears on the wire
    pub field: String,
    /// Human-readable message
    pub message: String,
}

/// Non-empty list of field errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// The collected errors in rule order
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether any error concerns `field`
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors.0).unwrap_or(serde_json::Value::Null);
        Self::new(ErrorCode::ValidationFailed, "Validation failed").with_details(details)
    }
}

/// Accumulating rule runner
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    /// Create an empty validator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: String) -> &mut Self {
        self.errors.push(FieldError {
            field: field.to_owned(),
            message,
        });
        self
    }

    /// Record a failure when `condition` is false
    pub fn check(&mut self, field: &str, condition: bool, message: &str) -> &mut Self {
        if condition {
            self
        } else {
            self.push(field, message.to_owned())
        }
    }

    /// Field must be present
    pub fn required<T>(&mut self, field: &str, value: Option<&T>) -> &mut Self {
        if value.is_some() {
            self
        } else {
            self.push(field, format!("{field} is required"))
        }
    }

    /// Numeric field must lie in `[min, max]`
    pub fn number_range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) -> &mut Self {
        match value {
            Some(v) if !v.is_finite() || v < min || v > max => {
                self.push(field, format!("{field} must be between {min} and {max}"))
            }
            _ => self,
        }
    }

    /// Integer field must lie in `[min, max]`
    pub fn int_range(&mut self, field: &str, value: Option<i64>, min: i64, max: i64) -> &mut Self {
        match value {
            Some(v) if v < min || v > max => {
                self.push(field, format!("{field} must be between {min} and {max}"))
            }
            _ => self,
        }
    }

    /// Numeric field must be strictly greater than zero
    pub fn positive(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        match value {
            Some(v) if !v.is_finite() || v <= 0.0 => {
                self.push(field, format!("{field} must be a positive number"))
            }
            _ => self,
        }
    }

    /// Numeric field must be at least `min`
    pub fn min_value(&mut self, field: &str, value: Option<f64>, min: f64) -> &mut Self {
        match value {
            Some(v) if !v.is_finite() || v < min => {
                self.push(field, format!("{field} must be at least {min}"))
            }
            _ => self,
        }
    }

    /// String field must be one of `allowed`
    pub fn one_of(&mut self, field: &str, value: Option<&str>, allowed: &[&str]) -> &mut Self {
        match value {
            Some(v) if !allowed.contains(&v) => self.push(
                field,
                format!("{field} must be one of [{}]", allowed.join(", ")),
            ),
            _ => self,
        }
    }

    /// String field must have at least `min` characters
    pub fn min_len(&mut self, field: &str, value: Option<&str>, min: usize) -> &mut Self {
        match value {
            Some(v) if v.chars().count() < min => self.push(
                field,
                format!("{field} must be at least {min} characters long"),
            ),
            _ => self,
        }
    }

    /// String field must have at most `max` characters
    pub fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        match value {
            Some(v) if v.chars().count() > max => self.push(
                field,
                format!("{field} must be at most {max} characters long"),
            ),
            _ => self,
        }
    }

    /// String field must be a `DD-MM-YYYY` date
    pub fn date(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if dates::parse_date(v).is_err() => {
                self.push(field, dates::INVALID_DATE_MESSAGE.to_owned())
            }
            _ => self,
        }
    }

    /// Whether no rule has failed so far
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation, yielding `value` when every rule passed
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ValidationErrors`] when any rule failed.
    pub fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Implemented by request DTOs
pub trait Validate {
    /// Run all rules for this value
    ///
    /// # Errors
    ///
    /// Returns field-level errors when any rule fails.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Validate and hand the value back, converting failures into `AppError`
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailed` error carrying the field list.
    fn validated(self) -> Result<Self, AppError>
    where
        Self: Sized,
    {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_skip_absent_values() {
        let mut v = Validator::new();
        v.number_range("height", None, 50.0, 300.0)
            .one_of("gender", None, &["MALE", "FEMALE"])
            .date("startDate", None);
        assert!(v.finish(()).is_ok());
    }

    #[test]
    fn test_errors_accumulate_in_rule_order() {
        let mut v = Validator::new();
        v.required::<String>("name", None)
            .int_range("age", Some(0), 1, 120)
            .date("date", Some("2024-01-31"));
        let errors = v.finish(()).unwrap_err();
        let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "age", "date"]);
    }

    #[test]
    fn test_conversion_to_app_error() {
        let mut v = Validator::new();
        v.positive("duration", Some(0.0));
        let error: AppError = v.finish(()).unwrap_err().into();
        assert_eq!(error.code, ErrorCode::ValidationFailed);
        assert_eq!(error.details[0]["field"], "duration");
    }
}
