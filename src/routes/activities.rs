// ABOUTME: Route handlers for the activity type catalog and the user's activity log
// ABOUTME: Calories burned are estimated from MET, profile weight and duration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::{authenticate, ApiResponse, DateQuery, DateRangeQuery};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::activities::{self, ActivityChanges, NewActivity};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use gohealth_core::constants::limits;
use gohealth_core::dates::parse_date;
use gohealth_core::models::{ActivityCategory, Intensity};
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Activity type listing filter
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityTypesQuery {
    /// Category name, e.g. `CARDIO`
    pub category: Option<String>,
}

/// New activity
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogActivityRequest {
    /// Reference activity type id
    pub activity_type_id: Option<String>,
    /// `DD-MM-YYYY`
    pub date: Option<String>,
    /// Minutes
    pub duration: Option<f64>,
    /// `LOW`, `MODERATE` or `HIGH`
    pub intensity: Option<String>,
    /// Up to 500 characters
    pub notes: Option<String>,
}

impl Validate for LogActivityRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("activityTypeId", self.activity_type_id.as_ref())
            .required("date", self.date.as_ref())
            .required("duration", self.duration.as_ref())
            .date("date", self.date.as_deref())
            .positive("duration", self.duration)
            .one_of("intensity", self.intensity.as_deref(), &Intensity::NAMES)
            .max_len("notes", self.notes.as_deref(), limits::NOTES_MAX_LEN);
        v.finish(())
    }
}

/// Partial activity edit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivityRequest {
    /// Minutes
    pub duration: Option<f64>,
    /// `LOW`, `MODERATE` or `HIGH`
    pub intensity: Option<String>,
    /// Up to 500 characters
    pub notes: Option<String>,
}

impl Validate for UpdateActivityRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.positive("duration", self.duration)
            .one_of("intensity", self.intensity.as_deref(), &Intensity::NAMES)
            .max_len("notes", self.notes.as_deref(), limits::NOTES_MAX_LEN);
        v.finish(())
    }
}

/// Activity routes
pub struct ActivityRoutes;

impl ActivityRoutes {
    /// Create all activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/activities/types", get(Self::handle_types))
            .route(
                "/api/activities",
                get(Self::handle_list).post(Self::handle_log),
            )
            .route("/api/activities/summary", get(Self::handle_summary))
            .route(
                "/api/activities/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_types(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ActivityTypesQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let category = match query.category.as_deref() {
            Some(name) => Some(ActivityCategory::parse(name).ok_or_else(|| {
                AppError::invalid_input(format!(
                    "category must be one of {}",
                    ActivityCategory::NAMES.join(", ")
                ))
            })?),
            None => None,
        };
        let types = activities::activity_types(&resources.database, category).await?;
        Ok(ApiResponse::ok("Activity types retrieved", types))
    }

    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogActivityRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let (Some(activity_type_id), Some(date), Some(duration)) =
            (request.activity_type_id, request.date, request.duration)
        else {
            return Err(AppError::missing_field("activityTypeId"));
        };

        let input = NewActivity {
            activity_type_id,
            date: parse_date(&date)?,
            duration,
            intensity: request.intensity.as_deref().and_then(Intensity::parse),
            notes: request.notes,
        };
        let activity = activities::log_activity(&resources.database, auth.user_id, input).await?;
        Ok(ApiResponse::created("Activity logged", activity))
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateRangeQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let (start, end) = query.dates()?;
        let logged =
            activities::list_activities(&resources.database, auth.user_id, start, end).await?;
        Ok(ApiResponse::ok("Activities retrieved", logged))
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let date = query.date_or_today()?;
        let summary = activities::daily_summary(&resources.database, auth.user_id, date).await?;
        Ok(ApiResponse::ok("Activity summary retrieved", summary))
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(activity_id): Path<Uuid>,
        Json(request): Json<UpdateActivityRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let changes = ActivityChanges {
            duration: request.duration,
            intensity: request.intensity.as_deref().and_then(Intensity::parse),
            notes: request.notes,
        };
        let activity = activities::update_activity(
            &resources.database,
            auth.user_id,
            activity_id,
            changes,
        )
        .await?;
        Ok(ApiResponse::ok("Activity updated", activity))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(activity_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        activities::delete_activity(&resources.database, auth.user_id, activity_id).await?;
        Ok(ApiResponse::ok("Activity deleted", serde_json::Value::Null))
    }
}
