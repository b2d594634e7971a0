// ABOUTME: Server-wide constants and environment-backed defaults for the GoHealth API
// ABOUTME: Service identity, ports, route prefixes, JWT and notification defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Constants Module
//!
//! Hardcoded server constants plus the environment lookups that back
//! [`crate::config::environment::ServerConfig`]. Domain constants (formula coefficients,
//! biometric ranges) live in `gohealth_core::constants`.

use std::env;

pub use gohealth_core::constants::*;

/// Service identity
pub mod service {
    /// Service name used in logs and the health endpoint
    pub const SERVICE_NAME: &str = "gohealth-server";
    /// Version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// API routes
pub mod routes {
    /// Health route
    pub const HEALTH: &str = "/health";
    /// Prefix for authenticated routes
    pub const API_BASE: &str = "/api";
}

/// Defaults for configuration values
pub mod defaults {
    /// Default SQLite location
    pub const DATABASE_URL: &str = "sqlite:./data/gohealth.db";
    /// JWT lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Development-only JWT secret, rejected in production
    pub const DEV_JWT_SECRET: &str = "gohealth-development-secret-change-me";
    /// Default FCM-style send endpoint
    pub const FCM_ENDPOINT: &str = "https://fcm.googleapis.com/fcm/send";
    /// Achievement de-duplication window (one day)
    pub const ACHIEVEMENT_DEDUP_TTL_SECS: u64 = 86_400;
    /// Bounded number of remembered achievement keys
    pub const ACHIEVEMENT_DEDUP_CAPACITY: usize = 10_000;
    /// Push gateway request timeout
    pub const PUSH_TIMEOUT_SECS: u64 = 10;
    /// Interval of the expired-entry sweep in the de-duplication cache
    pub const DEDUP_CLEANUP_INTERVAL_SECS: u64 = 3600;
    /// Per-request timeout applied by the HTTP stack
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Largest accepted request body
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}

/// Push notification wire constants
pub mod push {
    /// Android notification channel
    pub const ANDROID_CHANNEL_ID: &str = "gohealth_notifications";
    /// Gateway error meaning the device token is no longer valid
    pub const TOKEN_NOT_REGISTERED: &str = "registration-token-not-registered";
    /// Legacy spelling of the same error
    pub const TOKEN_NOT_REGISTERED_LEGACY: &str = "NotRegistered";
    /// HTTP v1 error status for the same condition
    pub const TOKEN_UNREGISTERED_STATUS: &str = "UNREGISTERED";
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env, ports};

    /// `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(ports::DEFAULT_HTTP_PORT)
    }

    /// Database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.into())
    }

    /// Log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    }

    /// Deployment environment name
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }

    /// JWT secret, if configured
    #[must_use]
    pub fn jwt_secret() -> Option<String> {
        env::var("JWT_SECRET").ok().filter(|s| !s.is_empty())
    }

    /// JWT expiry from environment or default
    #[must_use]
    pub fn jwt_expiry_hours() -> i64 {
        env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(defaults::JWT_EXPIRY_HOURS)
    }
}
