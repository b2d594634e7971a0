// ABOUTME: Route module organization for the GoHealth REST API
// ABOUTME: Response envelope, shared query types and the assembled router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Route module for the GoHealth API
//!
//! Each domain module contains only route definitions and thin handlers that
//! authenticate, validate and delegate to [`crate::services`]. Successful answers use
//! the [`ApiResponse`] envelope; failures use the `ErrorResponse` body of `AppError`.

/// Activity logging routes
pub mod activities;
/// BMI and weight goal routes
pub mod bmi;
/// Health check routes
pub mod health;
/// Meal and food catalog routes
pub mod meals;
/// Notification routes
pub mod notifications;
/// Profile, dashboard and nutrition target routes
pub mod users;

pub use activities::ActivityRoutes;
pub use bmi::BmiRoutes;
pub use health::HealthRoutes;
pub use meals::MealRoutes;
pub use notifications::NotificationRoutes;
pub use users::UserRoutes;

use crate::config::environment::ServerConfig;
use crate::errors::AppError;
use crate::middleware::{apply_http_layers, AuthResult};
use crate::resources::ServerResources;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use gohealth_core::dates::parse_date;
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope
    pub success: bool,
    /// Short human-readable outcome
    pub message: String,
    /// Payload
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap `data` in a success envelope
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// Envelope with `200 OK`
    pub fn ok(message: impl Into<String>, data: T) -> Response {
        (StatusCode::OK, Json(Self::new(message, data))).into_response()
    }

    /// Envelope with `201 Created`
    pub fn created(message: impl Into<String>, data: T) -> Response {
        (StatusCode::CREATED, Json(Self::new(message, data))).into_response()
    }
}

/// `startDate`/`endDate` query pair in `DD-MM-YYYY`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    /// First day, inclusive
    pub start_date: Option<String>,
    /// Last day, inclusive
    pub end_date: Option<String>,
}

impl Validate for DateRangeQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("startDate", self.start_date.as_ref())
            .required("endDate", self.end_date.as_ref())
            .date("startDate", self.start_date.as_deref())
            .date("endDate", self.end_date.as_deref());
        v.finish(())
    }
}

impl DateRangeQuery {
    /// Validated `(start, end)` dates
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` when either date is missing or malformed
    pub fn dates(&self) -> Result<(chrono::NaiveDate, chrono::NaiveDate), AppError> {
        self.validate()?;
        Ok((
            parse_date(self.start_date.as_deref().unwrap_or_default())?,
            parse_date(self.end_date.as_deref().unwrap_or_default())?,
        ))
    }
}

/// Single `date` query in `DD-MM-YYYY`
#[derive(Debug, Clone, Deserialize)]
pub struct DateQuery {
    /// Day to summarise
    pub date: Option<String>,
}

impl DateQuery {
    /// The requested day, or today (UTC) when absent
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` for a malformed date
    pub fn date_or_today(&self) -> Result<chrono::NaiveDate, AppError> {
        match self.date.as_deref() {
            Some(date) => parse_date(date),
            None => Ok(chrono::Utc::now().date_naive()),
        }
    }
}

/// Authenticate the request from its `Authorization` header
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthResult, AppError> {
    resources
        .auth_middleware
        .authenticate_request_with_headers(headers)
}

/// Central route registry
pub struct ApiRoutes;

impl ApiRoutes {
    /// Assemble every route group and the HTTP layer stack
    pub fn router(resources: Arc<ServerResources>) -> Router {
        let config: Arc<ServerConfig> = resources.config.clone();

        let router = Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(UserRoutes::routes(resources.clone()))
            .merge(BmiRoutes::routes(resources.clone()))
            .merge(ActivityRoutes::routes(resources.clone()))
            .merge(MealRoutes::routes(resources.clone()))
            .merge(NotificationRoutes::routes(resources));

        apply_http_layers(router, &config)
    }
}
