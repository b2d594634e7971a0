// ABOUTME: Route handlers for stored notifications, read state, push token registration and test pushes
// ABOUTME: Listings are paged and may be filtered by read state and notification kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::{authenticate, ApiResponse};
use crate::errors::AppError;
use crate::models::NotificationFilter;
use crate::resources::ServerResources;
use crate::services::notifications::{self, DEFAULT_PAGE_SIZE};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use gohealth_core::models::NotificationKind;
use gohealth_core::validation::{Validate, ValidationErrors, Validator};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Listing parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    /// 1-based page, default 1
    pub page: Option<u32>,
    /// Page size, default 20
    pub limit: Option<u32>,
    /// `true` or `false`
    pub is_read: Option<bool>,
    /// Notification kind
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Validate for ListNotificationsQuery {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.one_of("type", self.kind.as_deref(), &NotificationKind::NAMES);
        v.finish(())
    }
}

/// Push token registration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushTokenRequest {
    /// Device token issued by the push service
    pub push_token: Option<String>,
}

impl Validate for PushTokenRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.required("pushToken", self.push_token.as_ref()).check(
            "pushToken",
            self.push_token
                .as_deref()
                .is_none_or(|token| !token.trim().is_empty()),
            "pushToken must not be empty",
        );
        v.finish(())
    }
}

/// Optional custom text for a test push
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestNotificationRequest {
    /// Title override
    pub title: Option<String>,
    /// Body override
    pub body: Option<String>,
}

/// Notification routes
pub struct NotificationRoutes;

impl NotificationRoutes {
    /// Create all notification routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/notifications", get(Self::handle_list))
            .route(
                "/api/notifications/unread-count",
                get(Self::handle_unread_count),
            )
            .route(
                "/api/notifications/read-all",
                patch(Self::handle_mark_all_read),
            )
            .route(
                "/api/notifications/token",
                put(Self::handle_register_token).delete(Self::handle_remove_token),
            )
            .route("/api/notifications/test", post(Self::handle_test))
            .route("/api/notifications/:id/read", patch(Self::handle_mark_read))
            .route("/api/notifications/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListNotificationsQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let query = query.validated()?;
        let filter = NotificationFilter {
            is_read: query.is_read,
            kind: query.kind.as_deref().and_then(NotificationKind::parse),
        };
        let page = notifications::list_notifications(
            &resources.database,
            auth.user_id,
            filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;
        Ok(ApiResponse::ok("Notifications retrieved", page))
    }

    async fn handle_unread_count(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let count = resources
            .database
            .unread_notification_count(auth.user_id)
            .await?;
        Ok(ApiResponse::ok(
            "Unread count retrieved",
            json!({ "unreadCount": count }),
        ))
    }

    async fn handle_mark_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(notification_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let record =
            notifications::mark_read(&resources.database, auth.user_id, notification_id).await?;
        Ok(ApiResponse::ok("Notification marked as read", record))
    }

    async fn handle_mark_all_read(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let updated = resources
            .database
            .mark_all_notifications_read(auth.user_id)
            .await?;
        Ok(ApiResponse::ok(
            "All notifications marked as read",
            json!({ "updated": updated }),
        ))
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(notification_id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        notifications::delete(&resources.database, auth.user_id, notification_id).await?;
        Ok(ApiResponse::ok("Notification deleted", serde_json::Value::Null))
    }

    async fn handle_register_token(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<PushTokenRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = request.validated()?;
        let token = request.push_token.unwrap_or_default();
        resources
            .database
            .set_push_token(auth.user_id, Some(token.trim()))
            .await?;
        info!(user_id = %auth.user_id, "Push token registered");
        Ok(ApiResponse::ok("Push token registered", serde_json::Value::Null))
    }

    async fn handle_remove_token(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        resources.database.set_push_token(auth.user_id, None).await?;
        info!(user_id = %auth.user_id, "Push token removed");
        Ok(ApiResponse::ok("Push token removed", serde_json::Value::Null))
    }

    async fn handle_test(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Option<Json<TestNotificationRequest>>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let request = body.map(|Json(request)| request).unwrap_or_default();
        let record = resources
            .notifier
            .send_test(
                auth.user_id,
                request.title.as_deref(),
                request.body.as_deref(),
            )
            .await?;
        Ok(ApiResponse::ok("Test notification sent", record))
    }
}
