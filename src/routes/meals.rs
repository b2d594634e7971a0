// ABOUTME: Route handlers for the food catalog and the user's meal log
// ABOUTME: Logging a meal may trigger the daily calorie achievement notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::{authenticate, ApiResponse, DateQuery, DateRangeQuery};
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::meals::{self, MealChanges, NewMeal};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use gohealth_core::constants::limits;
use gohealth_core::dates::parse_date;
use gohealth_core::models::MealType;
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Catalog search query
#[derive(Debug, Clone, Deserialize)]
pub struct FoodSearchQuery {
    /// Case-insensitive name fragment
    pub query: Option<String>,
}

/// New meal
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMealRequest {
    /// Catalog food id
    pub food_id: Option<String>,
    /// `BREAKFAST`, `LUNCH`, `DINNER` or `SNACK`
    pub meal_type: Option<String>,
    /// `DD-MM-YYYY`
    pub date: Option<String>,
    /// Servings, at least 0.1
    pub quantity: Option<f64>,
    /// Serving unit label
    pub unit: Option<String>,
}

impl Validate for LogMealRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("foodId", self.food_id.as_ref())
            .required("mealType", self.meal_type.as_ref())
            .required("date", self.date.as_ref())
            .required("quantity", self.quantity.as_ref())
            .one_of("mealType", self.meal_type.as_deref(), &MealType::NAMES)
            .date("date", self.date.as_deref())
            .min_value("quantity", self.quantity, limits::MIN_MEAL_QUANTITY);
        v.finish(())
    }
}

/// Partial meal edit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    /// Servings, at least 0.1
    pub quantity: Option<f64>,
    /// Serving unit label
    pub unit: Option<String>,
    /// Meal slot
    pub meal_type: Option<String>,
}

impl Validate for UpdateMealRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.min_value("quantity", self.quantity, limits::MIN_MEAL_QUANTITY)
            .one_of("mealType", self.meal_type.as_deref(), &MealType::NAMES);
        v.finish(())
    }
}

/// Meal routes
pub struct MealRoutes;

impl MealRoutes {
    /// Create all meal and food catalog routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meals/foods/search", get(Self::handle_search_foods))
            .route("/api/meals/foods/:id", get(Self::handle_get_food))
            .route("/api/meals", get(Self::handle_list).post(Self::handle_log))
            .route("/api/meals/summary", get(Self::handle_summary))
            .route(
                "/api/meals/:id",
                put(Self::handle_update).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    async fn handle_search_foods(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<FoodSearchQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let foods =
            meals::search_foods(&resources.database, query.query.as_deref().unwrap_or_default())
                .await?;
        Ok(ApiResponse::ok("Foods retrieved", foods))
    }

    async fn handle_get_food(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(food_id): Path<String>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;
        let food = meals::get_food(&resources.database, &food_id).await?;
        Ok(ApiResponse::ok("Food retrieved", food))
    }

    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<LogMealRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let (Some(food_id), Some(meal_type), Some(date), Some(quantity)) = (
            request.food_id,
            request.meal_type.as_deref().and_then(MealType::parse),
            request.date,
            request.quantity,
        ) else {
            return Err(AppError::missing_field("foodId"));
        };

        let input = NewMeal {
            food_id,
            meal_type,
            date: parse_date(&date)?,
            quantity,
            unit: request.unit,
        };
        let meal =
            meals::log_meal(&resources.database, &resources.notifier, auth.user_id, input).await?;
        Ok(ApiResponse::created("Meal logged", meal))
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateRangeQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let (start, end) = query.dates()?;
        let logged = meals::list_meals(&resources.database, auth.user_id, start, end).await?;
        Ok(ApiResponse::ok("Meals retrieved", logged))
    }

    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<DateQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let date = query.date_or_today()?;
        let summary = meals::daily_summary(&resources.database, auth.user_id, date).await?;
        Ok(ApiResponse::ok("Meal summary retrieved", summary))
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(meal_id): Path<Uuid>,
        Json(request): Json<UpdateMealRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let changes = MealChanges {
            quantity: request.quantity,
            unit: request.unit,
            meal_type: request.meal_type.as_deref().and_then(MealType::parse),
        };
        let meal = meals::update_meal(&resources.database, auth.user_id, meal_id, changes).await?;
        Ok(ApiResponse::ok("Meal updated", meal))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(meal_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        meals::delete_meal(&resources.database, auth.user_id, meal_id).await?;
        Ok(ApiResponse::ok("Meal deleted", serde_json::Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_request_enforces_minimum_quantity() {
        let request = LogMealRequest {
            food_id: Some("apple".into()),
            meal_type: Some("SNACK".into()),
            date: Some("05-05-2025".into()),
            quantity: Some(0.05),
            unit: None,
        };
        assert!(request.validate().unwrap_err().has_field("quantity"));
    }

    #[test]
    fn test_log_request_lists_every_missing_field() {
        let errors = LogMealRequest::default().validate().unwrap_err();
        for field in ["foodId", "mealType", "date", "quantity"] {
            assert!(errors.has_field(field), "missing error for {field}");
        }
    }
}
