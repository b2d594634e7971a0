// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Database, JWT manager, auth middleware, configuration and notifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::constants::defaults::DEDUP_CLEANUP_INTERVAL_SECS;
use crate::database::Database;
use crate::errors::AppResult;
use crate::middleware::AuthMiddleware;
use crate::notifications::fcm::gateway_from_config;
use crate::notifications::{AchievementDeduplicator, PushGateway};
use crate::services::Notifier;
use std::sync::Arc;
use std::time::Duration;

/// Everything a request handler needs
#[derive(Clone)]
pub struct ServerResources {
    /// SQLite store
    pub database: Database,
    /// Token issuer and validator
    pub auth_manager: Arc<AuthManager>,
    /// Bearer token authentication
    pub auth_middleware: AuthMiddleware,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Notification persistence and delivery
    pub notifier: Notifier,
}

impl ServerResources {
    /// Build resources with the push gateway selected by configuration
    ///
    /// Must be called inside a Tokio runtime; the achievement de-duplicator starts
    /// its expiry sweep here.
    ///
    /// # Errors
    ///
    /// Returns an error if the push gateway cannot be built
    pub fn new(database: Database, config: ServerConfig) -> AppResult<Self> {
        let gateway = gateway_from_config(&config.notifications)?;
        Ok(Self::with_gateway(database, config, gateway))
    }

    /// Build resources around an explicit push gateway
    #[must_use]
    pub fn with_gateway(
        database: Database,
        config: ServerConfig,
        gateway: Arc<dyn PushGateway>,
    ) -> Self {
        let auth_manager = Arc::new(AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        ));
        let dedup = AchievementDeduplicator::with_cleanup(
            config.notifications.achievement_dedup_capacity,
            Duration::from_secs(config.notifications.achievement_dedup_ttl_secs),
            Duration::from_secs(DEDUP_CLEANUP_INTERVAL_SECS),
        );

        Self {
            notifier: Notifier::new(database.clone(), gateway, dedup),
            auth_middleware: AuthMiddleware::new(auth_manager.clone()),
            auth_manager,
            database,
            config: Arc::new(config),
        }
    }
}
