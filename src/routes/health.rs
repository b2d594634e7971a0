// ABOUTME: Health check route handler for liveness monitoring
// ABOUTME: Reports service version and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::constants::routes::HEALTH;
use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};
use crate::resources::ServerResources;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(HEALTH, get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let database_ok = resources.database.ping().await.is_ok();
        let status = if database_ok {
            StatusCode::OK
        } else {
            tracing::warn!("Health check: database unreachable");
            StatusCode::SERVICE_UNAVAILABLE
        };

        (
            status,
            Json(serde_json::json!({
                "status": if database_ok { "healthy" } else { "degraded" },
                "service": SERVICE_NAME,
                "version": SERVICE_VERSION,
                "database": if database_ok { "ok" } else { "unreachable" },
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
            .into_response()
    }
}
