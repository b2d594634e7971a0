// ABOUTME: Route handlers for BMI measurements, history, trend analysis and weight goals
// ABOUTME: Recording a BMI also updates the profile's height and weight
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::{authenticate, ApiResponse};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::bmi;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use gohealth_core::constants::{biometric_ranges, limits};
use gohealth_core::dates::{parse_date, parse_optional_date};
use gohealth_core::models::WeightGoal;
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::Deserialize;
use std::sync::Arc;

/// New BMI measurement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordBmiRequest {
    /// Height in cm
    pub height: Option<f64>,
    /// Weight in kg
    pub weight: Option<f64>,
}

impl Validate for RecordBmiRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("height", self.height.as_ref())
            .required("weight", self.weight.as_ref())
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
            );
        v.finish(())
    }
}

/// New weight goal
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    /// Weight at the start, kg
    pub start_weight: Option<f64>,
    /// Weight to reach, kg
    pub target_weight: Option<f64>,
    /// `DD-MM-YYYY`
    pub start_date: Option<String>,
    /// `DD-MM-YYYY`, after `startDate`
    pub target_date: Option<String>,
}

impl Validate for CreateGoalRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("startWeight", self.start_weight.as_ref())
            .required("targetWeight", self.target_weight.as_ref())
            .required("startDate", self.start_date.as_ref())
            .number_range(
                "startWeight",
                self.start_weight,
                biometric_ranges::WEIGHT_MIN_KG,
                biometric_ranges::WEIGHT_MAX_KG,
            )
            .number_range(
                "targetWeight",
                self.target_weight,
                biometric_ranges::WEIGHT_MIN_KG,
                biometric_ranges::WEIGHT_MAX_KG,
            )
            .date("startDate", self.start_date.as_deref())
            .date("targetDate", self.target_date.as_deref());

        if let (Ok(Some(start)), Ok(Some(target))) = (
            parse_optional_date(self.start_date.as_deref()),
            parse_optional_date(self.target_date.as_deref()),
        ) {
            v.check(
                "targetDate",
                target > start,
                "targetDate must be after startDate",
            );
        }
        v.finish(())
    }
}

/// `limit` query for history
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    /// Number of records, default 10
    pub limit: Option<u32>,
}

/// BMI routes
pub struct BmiRoutes;

impl BmiRoutes {
    /// Create all BMI and goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/bmi", post(Self::handle_record))
            .route("/api/bmi/history", get(Self::handle_history))
            .route("/api/bmi/latest", get(Self::handle_latest))
            .route("/api/bmi/analysis", get(Self::handle_analysis))
            .route("/api/bmi/goals", post(Self::handle_create_goal))
            .route("/api/bmi/goals/active", get(Self::handle_active_goal))
            .with_state(resources)
    }

    async fn handle_record(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<RecordBmiRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let (Some(height), Some(weight)) = (request.height, request.weight) else {
            return Err(AppError::missing_field("height"));
        };

        let recorded = bmi::record_bmi(
            &resources.database,
            &resources.notifier,
            auth.user_id,
            height,
            weight,
        )
        .await?;
        Ok(ApiResponse::created("BMI recorded", recorded))
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let limit = query
            .limit
            .unwrap_or(limits::BMI_HISTORY_DEFAULT as u32)
            .clamp(1, limits::NOTIFICATIONS_PAGE_MAX as u32);
        let records = bmi::history(&resources.database, auth.user_id, limit).await?;
        Ok(ApiResponse::ok("BMI history retrieved", records))
    }

    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let record = bmi::latest(&resources.database, auth.user_id).await?;
        Ok(ApiResponse::ok("Latest BMI retrieved", record))
    }

    async fn handle_analysis(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let analysis = bmi::analysis(&resources.database, auth.user_id).await?;
        Ok(ApiResponse::ok("BMI analysis calculated", analysis))
    }

    async fn handle_create_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<CreateGoalRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let (Some(start_weight_kg), Some(target_weight_kg), Some(start_date)) = (
            request.start_weight,
            request.target_weight,
            request.start_date.as_deref(),
        ) else {
            return Err(AppError::missing_field("startDate"));
        };

        let goal = WeightGoal {
            start_weight_kg,
            target_weight_kg,
            start_date: parse_date(start_date)?,
            target_date: parse_optional_date(request.target_date.as_deref())?,
        };
        let record = bmi::create_goal(&resources.database, auth.user_id, &goal).await?;
        Ok(ApiResponse::created("Weight goal created", record))
    }

    async fn handle_active_goal(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let goal =
            bmi::active_goal(&resources.database, auth.user_id, Utc::now().date_naive()).await?;
        let message = if goal.is_some() {
            "Active weight goal retrieved"
        } else {
            "No active weight goal"
        };
        Ok(ApiResponse::ok(message, goal))
    }
}
