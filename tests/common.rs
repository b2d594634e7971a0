// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory databases, server resources with a recording push gateway, tokens and profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `gohealth_server`

use anyhow::Result;
use async_trait::async_trait;
use gohealth_core::errors::{AppError, AppResult};
use gohealth_core::models::Sex;
use gohealth_server::{
    config::environment::ServerConfig,
    database::Database,
    models::{ProfileChanges, UserProfile},
    notifications::{PushGateway, PushMessage, PushOutcome},
    resources::ServerResources,
};
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Secret used to sign test tokens
pub const TEST_JWT_SECRET: &str = "gohealth-test-secret";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// In-memory database with the food catalog and activity types seeded
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    database.seed_reference_data().await?;
    Ok(database)
}

/// How the recording gateway answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Accept every message
    Deliver,
    /// Report the device token as unregistered
    Unregistered,
    /// Fail with an external service error
    Fail,
}

/// Push gateway that records every message it is handed
pub struct RecordingGateway {
    mode: Mutex<GatewayMode>,
    sent: Mutex<Vec<PushMessage>>,
}

impl RecordingGateway {
    pub fn new(mode: GatewayMode) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(mode),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn set_mode(&self, mode: GatewayMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PushGateway for RecordingGateway {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &PushMessage) -> AppResult<PushOutcome> {
        let mode = *self.mode.lock().unwrap();
        self.sent.lock().unwrap().push(message.clone());
        match mode {
            GatewayMode::Deliver => Ok(PushOutcome::Delivered {
                message_id: Some(format!("msg-{}", self.sent_count())),
            }),
            GatewayMode::Unregistered => Ok(PushOutcome::TokenNotRegistered),
            GatewayMode::Fail => Err(AppError::external_service("push", "gateway unavailable")),
        }
    }
}

/// Server resources over a fresh database and a delivering recording gateway
pub async fn create_test_server_resources() -> Result<(Arc<ServerResources>, Arc<RecordingGateway>)>
{
    let database = create_test_database().await?;
    let gateway = RecordingGateway::new(GatewayMode::Deliver);
    let resources = ServerResources::with_gateway(
        database,
        ServerConfig::for_testing(TEST_JWT_SECRET),
        gateway.clone(),
    );
    Ok((Arc::new(resources), gateway))
}

/// `Authorization` header value for `user_id`
pub fn bearer_for(resources: &ServerResources, user_id: Uuid) -> String {
    let token = resources.auth_manager.generate_token(user_id).unwrap();
    format!("Bearer {token}")
}

/// Profile changes for a 30 year old, 175 cm, 80 kg moderately active male
pub fn complete_profile_changes() -> ProfileChanges {
    ProfileChanges {
        name: Some("Test User".to_owned()),
        age: Some(30),
        sex: Some(Sex::Male),
        height: Some(175.0),
        weight: Some(80.0),
        activity_level: Some("MODERATELY_ACTIVE".to_owned()),
    }
}

/// Create a user with a complete biometric profile
pub async fn create_complete_user(database: &Database) -> Result<(Uuid, UserProfile)> {
    let user_id = Uuid::new_v4();
    let profile = database
        .upsert_user_profile(user_id, &complete_profile_changes())
        .await?;
    Ok((user_id, profile))
}
