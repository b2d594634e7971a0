// ABOUTME: Route handlers for the user profile, dashboard and nutrition targets
// ABOUTME: Profile updates are validated once and stored as a partial upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! User routes
//!
//! All endpoints require a bearer token; the token subject is the user id.

use super::{authenticate, ApiResponse};
use crate::errors::AppError;
use crate::models::ProfileChanges;
use crate::resources::ServerResources;
use crate::services::dashboard::{build_dashboard, DashboardQuery, TrackerRange};
use crate::services::profile;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use gohealth_core::constants::{biometric_ranges, limits};
use gohealth_core::dates::{parse_date, parse_month};
use gohealth_core::models::{ActivityLevel, Sex};
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::Deserialize;
use std::sync::Arc;

/// Partial profile update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Display name, 2 to 50 characters
    pub name: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    /// `MALE` or `FEMALE`
    pub gender: Option<String>,
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
    /// Activity level, legacy `ACTIVE` accepted
    pub activity_level: Option<String>,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.min_len("name", self.name.as_deref(), limits::NAME_MIN_LEN)
            .max_len("name", self.name.as_deref(), limits::NAME_MAX_LEN)
            .int_range(
                "age",
                self.age,
                biometric_ranges::AGE_MIN,
                biometric_ranges::AGE_MAX,
            )
            .one_of("gender", self.gender.as_deref(), &["MALE", "FEMALE"])
            .number_range(
                "height",
                self.height,
                biometric_ranges::HEIGHT_MIN_CM,
                biometric_ranges::HEIGHT_MAX_CM,
            )
            .number_range(
                "weight",
                self.weight,
                biometric_ranges::WEIGHT_MIN_KG,
                biometric_ranges::WEIGHT_MAX_KG,
            )
            .one_of(
                "activityLevel",
                self.activity_level.as_deref(),
                &ActivityLevel::ACCEPTED_INPUT,
            );
        v.finish(())
    }
}

impl UpdateProfileRequest {
    fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            name: self.name.map(|name| name.trim().to_owned()),
            age: self.age.and_then(|age| u32::try_from(age).ok()),
            sex: self.gender.as_deref().and_then(Sex::parse),
            height: self.height,
            weight: self.weight,
            activity_level: self.activity_level,
        }
    }
}

/// Dashboard query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    /// Day in `DD-MM-YYYY`, defaults to today
    pub date: Option<String>,
    /// `week` (default) or `month`
    pub range: Option<String>,
    /// `YYYY-MM` for the monthly tracker
    pub month: Option<String>,
}

impl Validate for DashboardParams {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.date("date", self.date.as_deref())
            .one_of("range", self.range.as_deref(), &["week", "month"]);
        v.finish(())
    }
}

/// User routes
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/users/profile",
                get(Self::handle_get_profile).put(Self::handle_update_profile),
            )
            .route("/api/users/dashboard", get(Self::handle_dashboard))
            .route(
                "/api/users/nutrition-targets",
                get(Self::handle_nutrition_targets),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let view = profile::get_profile(&resources.database, auth.user_id).await?;
        Ok(ApiResponse::ok("Profile retrieved", view))
    }

    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let changes = request.validated()?.into_changes();
        let view = profile::update_profile(&resources.database, auth.user_id, &changes).await?;
        Ok(ApiResponse::ok("Profile updated", view))
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<DashboardParams>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let params = params.validated()?;

        let today = Utc::now().date_naive();
        let query = DashboardQuery {
            date: params.date.as_deref().map(parse_date).transpose()?.unwrap_or(today),
            range: params
                .range
                .as_deref()
                .map(TrackerRange::parse)
                .transpose()?
                .unwrap_or_default(),
            month: params.month.as_deref().map(parse_month).transpose()?,
            today,
        };

        let dashboard = build_dashboard(&resources.database, auth.user_id, query).await?;
        Ok(ApiResponse::ok("Dashboard retrieved", dashboard))
    }

    async fn handle_nutrition_targets(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let targets = profile::nutrition_targets(
            &resources.database,
            auth.user_id,
            Utc::now().date_naive(),
        )
        .await?;
        Ok(ApiResponse::ok("Nutrition targets calculated", targets))
    }
}
