// ABOUTME: Push notification delivery: gateway abstraction, message shape and achievement de-duplication
// ABOUTME: Notifications are persisted first and then handed to a PushGateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Push notifications
//!
//! [`PushGateway`] is the seam between stored notifications and a device push service.
//! [`fcm::FcmGateway`] posts FCM-style JSON over HTTPS; [`fcm::DisabledGateway`] logs and
//! reports that nothing was sent.

/// Expiring per-day de-duplication of achievement notifications
pub mod dedup;
/// HTTP and disabled gateways
pub mod fcm;

pub use dedup::{AchievementDeduplicator, AchievementKey};
pub use fcm::{DisabledGateway, FcmGateway};

use crate::constants::push::ANDROID_CHANNEL_ID;
use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A push message addressed to one device token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Device registration token
    pub token: String,
    /// Title shown by the device
    pub title: String,
    /// Body shown by the device
    pub body: String,
    /// String-valued payload
    pub data: BTreeMap<String, String>,
    /// iOS badge count
    pub badge: u32,
}

impl PushMessage {
    /// FCM message body, including Android channel and APNs alert settings
    #[must_use]
    pub fn to_fcm_payload(&self) -> Value {
        json!({
            "message": {
                "token": self.token,
                "notification": {
                    "title": self.title,
                    "body": self.body
                },
                "data": self.data,
                "android": {
                    "priority": "high",
                    "notification": {
                        "channel_id": ANDROID_CHANNEL_ID,
                        "default_sound": true,
                        "default_vibrate_timings": true
                    }
                },
                "apns": {
                    "payload": {
                        "aps": {
                            "alert": {
                                "title": self.title,
                                "body": self.body
                            },
                            "sound": "default",
                            "badge": self.badge
                        }
                    }
                }
            }
        })
    }
}

/// Result of handing a message to a gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Accepted by the push service
    Delivered {
        /// Message id assigned by the service, when reported
        message_id: Option<String>,
    },
    /// The device token is no longer registered and should be cleared
    TokenNotRegistered,
    /// No gateway is configured; nothing was sent
    Disabled,
}

/// Device push delivery
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Gateway name for logs
    fn name(&self) -> &'static str;

    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError`/`ExternalServiceUnavailable` when the push service
    /// fails for reasons other than an unregistered token.
    async fn send(&self, message: &PushMessage) -> AppResult<PushOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcm_payload_carries_channel_and_data() {
        let message = PushMessage {
            token: "device-token".into(),
            title: "Title".into(),
            body: "Body".into(),
            data: BTreeMap::from([("type".to_owned(), "TEST_NOTIFICATION".to_owned())]),
            badge: 0,
        };

        let payload = message.to_fcm_payload();
        assert_eq!(payload["message"]["token"], "device-token");
        assert_eq!(payload["message"]["data"]["type"], "TEST_NOTIFICATION");
        assert_eq!(
            payload["message"]["android"]["notification"]["channel_id"],
            ANDROID_CHANNEL_ID
        );
        assert_eq!(payload["message"]["apns"]["payload"]["aps"]["alert"]["title"], "Title");
    }
}
