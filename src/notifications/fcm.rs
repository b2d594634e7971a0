// ABOUTME: FCM-style HTTP push gateway and the disabled gateway used when push is off
// ABOUTME: Maps "token not registered" answers to PushOutcome::TokenNotRegistered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

use super::{PushGateway, PushMessage, PushOutcome};
use crate::config::environment::NotificationConfig;
use crate::constants::defaults::PUSH_TIMEOUT_SECS;
use crate::constants::push::{
    TOKEN_NOT_REGISTERED, TOKEN_NOT_REGISTERED_LEGACY, TOKEN_UNREGISTERED_STATUS,
};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const SERVICE: &str = "FCM";

/// Posts messages to an FCM-compatible HTTP endpoint
#[derive(Clone)]
pub struct FcmGateway {
    client: Client,
    endpoint: String,
    server_key: String,
}

impl FcmGateway {
    /// Create a gateway for `endpoint` authenticated with `server_key`
    ///
    /// # Errors
    ///
    /// Returns a config error if the HTTP client cannot be built
    pub fn new(endpoint: impl Into<String>, server_key: impl Into<String>) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PUSH_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build push HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            server_key: server_key.into(),
        })
    }
}

/// Whether a push service answer says the device token is gone
#[must_use]
pub fn is_token_not_registered(body: &str) -> bool {
    body.contains(TOKEN_NOT_REGISTERED)
        || body.contains(TOKEN_NOT_REGISTERED_LEGACY)
        || body.contains(TOKEN_UNREGISTERED_STATUS)
}

/// Message id from either the v1 (`name`) or legacy (`results[0].message_id`) answer
fn message_id(body: &Value) -> Option<String> {
    body.get("name")
        .or_else(|| body.pointer("/results/0/message_id"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

#[async_trait]
impl PushGateway for FcmGateway {
    fn name(&self) -> &'static str {
        "fcm"
    }

    async fn send(&self, message: &PushMessage) -> AppResult<PushOutcome> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.server_key)
            .json(&message.to_fcm_payload())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if is_token_not_registered(&text) {
            debug!(status = %status, "Push token no longer registered");
            return Ok(PushOutcome::TokenNotRegistered);
        }

        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("push rejected with status {status}: {text}"),
            ));
        }

        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(PushOutcome::Delivered {
            message_id: message_id(&body),
        })
    }
}

/// Gateway used when push delivery is off; notifications stay stored and unsent
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PushGateway for DisabledGateway {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, message: &PushMessage) -> AppResult<PushOutcome> {
        debug!(title = %message.title, "Push disabled, notification saved but not sent");
        Ok(PushOutcome::Disabled)
    }
}

/// Build the gateway selected by configuration
///
/// # Errors
///
/// Returns a config error if the HTTP gateway cannot be built
pub fn gateway_from_config(config: &NotificationConfig) -> AppResult<Arc<dyn PushGateway>> {
    match (config.fcm_enabled, config.fcm_server_key.as_deref()) {
        (true, Some(key)) => Ok(Arc::new(FcmGateway::new(config.fcm_endpoint.clone(), key)?)),
        (true, None) => {
            warn!("FCM_ENABLED is set but FCM_SERVER_KEY is missing; push delivery disabled");
            Ok(Arc::new(DisabledGateway))
        }
        (false, _) => Ok(Arc::new(DisabledGateway)),
    }
}
