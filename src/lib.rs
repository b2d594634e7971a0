// ABOUTME: Main library entry point for the GoHealth calorie and weight tracking API
// ABOUTME: REST routes over profiles, BMI history, goals, meals, activities and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![deny(unsafe_code)]

//! # GoHealth Server
//!
//! Backend for a calorie tracking app. Users keep a biometric profile, log meals from a
//! food catalog and physical activities, record BMI measurements and set weight goals.
//! The server derives daily calorie targets and macro splits from the profile and builds
//! a dashboard that compares consumption against the target.
//!
//! ## Architecture
//!
//! - **`gohealth_core`**: shared models, error codes, dates, validation and constants
//! - **`gohealth_intelligence`**: pure metabolic, macro, progress and dashboard calculations
//! - **Services**: domain operations over the [`database::Database`]
//! - **Routes**: thin axum handlers that authenticate, validate and delegate
//! - **Notifications**: persisted notifications delivered through a push gateway
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gohealth_server::config::environment::ServerConfig;
//! use gohealth_server::database::Database;
//! use gohealth_server::resources::ServerResources;
//! use gohealth_server::routes::ApiRoutes;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     let resources = Arc::new(ServerResources::new(database, config)?);
//!     let _router = ApiRoutes::router(resources);
//!     Ok(())
//! }
//! ```

/// JWT issuing and validation
pub mod auth;

/// Configuration management
pub mod config;

/// Server constants and environment-backed defaults
pub mod constants;

/// SQLite persistence
pub mod database;

/// Error types shared with `gohealth_core`
pub mod errors;

/// Logging setup and domain event helpers
pub mod logging;

/// HTTP middleware: authentication, CORS, tracing and limits
pub mod middleware;

/// Persisted record types
pub mod models;

/// Push delivery and achievement de-duplication
pub mod notifications;

/// Shared state handed to route handlers
pub mod resources;

/// REST route definitions
pub mod routes;

/// Domain operations behind the routes
pub mod services;
