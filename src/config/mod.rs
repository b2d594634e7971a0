// ABOUTME: Configuration management module for server settings
// ABOUTME: Exposes the environment-driven ServerConfig and its typed parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Configuration module for the GoHealth server
//!
//! - **Environment**: Server configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, NotificationConfig,
    ServerConfig,
};
