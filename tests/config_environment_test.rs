// ABOUTME: Unit tests for environment-driven server configuration
// ABOUTME: Parsing of levels, environments and database URLs plus from_env defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use gohealth_server::config::environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const CONFIG_VARS: [&str; 13] = [
    "HTTP_PORT",
    "DATABASE_URL",
    "RUST_LOG",
    "ENVIRONMENT",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "SEED_REFERENCE_DATA",
    "CORS_ORIGINS",
    "FCM_ENABLED",
    "FCM_ENDPOINT",
    "FCM_SERVER_KEY",
    "ACHIEVEMENT_DEDUP_TTL_SECS",
    "ACHIEVEMENT_DEDUP_CAPACITY",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("trace,sqlx=warn"), LogLevel::Trace);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    );
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(DatabaseUrl::parse_url("sqlite::memory:").unwrap(), DatabaseUrl::Memory);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/app.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/app.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("sqlite://tmp/app.db")
            .unwrap()
            .to_connection_string(),
        "sqlite:tmp/app.db"
    );
    assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
    assert!(DatabaseUrl::parse_url("  ").is_err());
    assert!(DatabaseUrl::parse_url("sqlite:").is_err());
}

#[test]
fn test_testing_config_is_valid() {
    let config = ServerConfig::for_testing("secret");
    config.validate().unwrap();
    assert!(config.database.url.is_memory());
    assert!(!config.notifications.fcm_enabled);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.cors_origins, vec!["*".to_owned()]);
    assert!(config.database.seed_reference_data);
    assert!(!config.notifications.fcm_enabled);
    assert_eq!(config.notifications.achievement_dedup_ttl_secs, 86_400);
    assert_eq!(config.notifications.achievement_dedup_capacity, 10_000);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_config_env();
    env::set_var("HTTP_PORT", "8181");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", "override-secret");
    env::set_var("CORS_ORIGINS", "http://a.example, http://b.example");
    env::set_var("FCM_ENABLED", "true");
    env::set_var("FCM_SERVER_KEY", "server-key");
    env::set_var("ACHIEVEMENT_DEDUP_TTL_SECS", "60");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.http_port, 8181);
    assert!(config.database.url.is_memory());
    assert_eq!(config.auth.jwt_secret, "override-secret");
    assert_eq!(config.cors_origins.len(), 2);
    assert!(config.notifications.fcm_enabled);
    assert_eq!(config.notifications.achievement_dedup_ttl_secs, 60);

    let summary = config.summary();
    assert!(summary.contains("8181"));
    assert!(!summary.contains("override-secret"));
    assert!(!format!("{:?}", config.notifications).contains("server-key"));
}

#[test]
#[serial]
fn test_production_requires_jwt_secret() {
    clear_config_env();
    env::set_var("ENVIRONMENT", "production");

    let result = ServerConfig::from_env();
    clear_config_env();
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_config_env();
    env::set_var("FCM_ENABLED", "maybe");
    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
    env::set_var("ACHIEVEMENT_DEDUP_CAPACITY", "0");
    assert!(ServerConfig::from_env().is_err());
    clear_config_env();
}
