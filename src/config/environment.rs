// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, env_config};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    ///
    /// Accepts a bare level or an `EnvFilter` directive list whose first entry is a bare level.
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        let head = s.split(',').next().unwrap_or_default().trim();
        match head.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path of the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` schemes or an empty path.
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            anyhow::bail!("DATABASE_URL must not be empty");
        }
        if trimmed.contains("://") && !trimmed.starts_with("sqlite://") {
            anyhow::bail!("Unsupported database URL '{trimmed}': only sqlite is supported");
        }

        let path_str = trimmed
            .strip_prefix("sqlite://")
            .or_else(|| trimmed.strip_prefix("sqlite:"))
            .unwrap_or(trimmed);

        if path_str == ":memory:" {
            Ok(Self::Memory)
        } else if path_str.is_empty() {
            anyhow::bail!("DATABASE_URL has an empty sqlite path")
        } else {
            Ok(Self::SQLite {
                path: PathBuf::from(path_str),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/gohealth.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
    /// Seed the food catalog and activity types on startup
    pub seed_reference_data: bool,
}

/// JWT settings
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .finish()
    }
}

/// Push notification delivery settings
#[derive(Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Deliver through the HTTP gateway; when false notifications are stored only
    pub fcm_enabled: bool,
    /// Gateway send endpoint
    pub fcm_endpoint: String,
    /// Gateway server key
    pub fcm_server_key: Option<String>,
    /// How long an achievement key suppresses repeats
    pub achievement_dedup_ttl_secs: u64,
    /// Maximum remembered achievement keys
    pub achievement_dedup_capacity: usize,
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("fcm_enabled", &self.fcm_enabled)
            .field("fcm_endpoint", &self.fcm_endpoint)
            .field(
                "fcm_server_key",
                &self.fcm_server_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("achievement_dedup_ttl_secs", &self.achievement_dedup_ttl_secs)
            .field("achievement_dedup_capacity", &self.achievement_dedup_capacity)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// CORS allowed origins (`*` for any)
    pub cors_origins: Vec<String>,
    /// Push notification configuration
    pub notifications: NotificationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is malformed or validation fails.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_config::environment());
        let jwt_secret = match env_config::jwt_secret() {
            Some(secret) => secret,
            None if environment.is_production() => {
                anyhow::bail!("JWT_SECRET must be set in production")
            }
            None => {
                warn!("JWT_SECRET not set, using the development secret");
                defaults::DEV_JWT_SECRET.to_owned()
            }
        };

        let config = Self {
            http_port: env_config::http_port(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_config::database_url())?,
                seed_reference_data: env_var_or("SEED_REFERENCE_DATA", "true")
                    .parse()
                    .context("Invalid SEED_REFERENCE_DATA value")?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_config::jwt_expiry_hours(),
            },
            cors_origins: parse_origins(&env_var_or("CORS_ORIGINS", "*")),
            notifications: NotificationConfig {
                fcm_enabled: env_var_or("FCM_ENABLED", "false")
                    .parse()
                    .context("Invalid FCM_ENABLED value")?,
                fcm_endpoint: env_var_or("FCM_ENDPOINT", defaults::FCM_ENDPOINT),
                fcm_server_key: env::var("FCM_SERVER_KEY").ok().filter(|k| !k.is_empty()),
                achievement_dedup_ttl_secs: env_var_or(
                    "ACHIEVEMENT_DEDUP_TTL_SECS",
                    &defaults::ACHIEVEMENT_DEDUP_TTL_SECS.to_string(),
                )
                .parse()
                .context("Invalid ACHIEVEMENT_DEDUP_TTL_SECS value")?,
                achievement_dedup_capacity: env_var_or(
                    "ACHIEVEMENT_DEDUP_CAPACITY",
                    &defaults::ACHIEVEMENT_DEDUP_CAPACITY.to_string(),
                )
                .parse()
                .context("Invalid ACHIEVEMENT_DEDUP_CAPACITY value")?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Configuration for in-process tests: in-memory database, delivery disabled
    #[must_use]
    pub fn for_testing(jwt_secret: &str) -> Self {
        Self {
            http_port: 0,
            log_level: LogLevel::Debug,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
                seed_reference_data: true,
            },
            auth: AuthConfig {
                jwt_secret: jwt_secret.to_owned(),
                jwt_expiry_hours: defaults::JWT_EXPIRY_HOURS,
            },
            cors_origins: vec!["*".to_owned()],
            notifications: NotificationConfig {
                fcm_enabled: false,
                fcm_endpoint: defaults::FCM_ENDPOINT.to_owned(),
                fcm_server_key: None,
                achievement_dedup_ttl_secs: defaults::ACHIEVEMENT_DEDUP_TTL_SECS,
                achievement_dedup_capacity: defaults::ACHIEVEMENT_DEDUP_CAPACITY,
            },
        }
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be served.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }

        if self.environment.is_production() && self.auth.jwt_secret == defaults::DEV_JWT_SECRET {
            anyhow::bail!("The development JWT secret cannot be used in production");
        }

        if self.notifications.achievement_dedup_capacity == 0 {
            anyhow::bail!("ACHIEVEMENT_DEDUP_CAPACITY must be at least 1");
        }

        if self.notifications.fcm_enabled && self.notifications.fcm_server_key.is_none() {
            warn!("FCM is enabled but FCM_SERVER_KEY is missing; pushes will be rejected");
        }

        Ok(())
    }

    /// Human-readable summary without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "GoHealth Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - JWT Expiry: {}h\n\
             - CORS Origins: {}\n\
             - Push Delivery: {}\n\
             - Achievement De-dup: {}s / {} keys",
            self.http_port,
            self.environment,
            self.log_level,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.auth.jwt_expiry_hours,
            self.cors_origins.join(","),
            if self.notifications.fcm_enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.notifications.achievement_dedup_ttl_secs,
            self.notifications.achievement_dedup_capacity,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
