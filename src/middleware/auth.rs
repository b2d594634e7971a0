// ABOUTME: Bearer token authentication for the REST API
// ABOUTME: Validates HS256 JWTs and yields the authenticated user id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::auth::AuthManager;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated request context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthResult {
    /// Token subject
    pub user_id: Uuid,
    /// Token expiry
    pub expires_at: Option<DateTime<Utc>>,
}

/// Middleware for bearer token authentication
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub fn new(auth_manager: Arc<AuthManager>) -> Self {
        Self { auth_manager }
    }

    /// Authenticate a request from its `Authorization` header
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or the token is invalid or expired
    pub fn authenticate_request_with_headers(&self, headers: &HeaderMap) -> AppResult<AuthResult> {
        let auth_header = headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header)
    }

    /// Authenticate a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a header, `AuthInvalid` for a non-bearer or
    /// invalid token and `AuthExpired` for an expired one
    #[tracing::instrument(
        skip(self, auth_header),
        fields(user_id = tracing::field::Empty, success = tracing::field::Empty)
    )]
    pub fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let Some(header) = auth_header else {
            tracing::debug!("Authentication failed: missing authorization header");
            return Err(AppError::auth_required());
        };

        let Some(token) = header.strip_prefix("Bearer ").map(str::trim) else {
            AppLogger::log_auth_event(None, "bearer_scheme", false);
            return Err(AppError::auth_invalid(
                "Authorization header must use the Bearer scheme",
            ));
        };

        let claims = match self.auth_manager.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::Span::current().record("success", false);
                AppLogger::log_auth_event(None, "jwt_validation", false);
                return Err(e.into());
            }
        };
        let user_id = claims.user_id()?;

        tracing::Span::current()
            .record("user_id", user_id.to_string())
            .record("success", true);

        Ok(AuthResult {
            user_id,
            expires_at: DateTime::from_timestamp(claims.exp, 0),
        })
    }
}
