// ABOUTME: GoHealth API server binary with JWT authentication and SQLite storage
// ABOUTME: Also issues development tokens and generates signing secrets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # GoHealth API Server Binary
//!
//! Starts the REST API. The `generate-secret` and `issue-token` subcommands help with
//! local setup and do not start the server.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gohealth_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    routes::ApiRoutes,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "gohealth-server")]
#[command(about = "GoHealth API - calorie, activity and weight goal tracking backend")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a new random JWT signing secret
    GenerateSecret,
    /// Print a bearer token for a user id signed with the configured secret
    IssueToken {
        /// User id; a new one is generated when omitted
        #[arg(long)]
        user_id: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if matches!(args.command, Some(Command::GenerateSecret)) {
        println!("{}", generate_jwt_secret());
        return Ok(());
    }

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }

    if let Some(Command::IssueToken { user_id }) = args.command {
        let user_id = user_id.unwrap_or_else(Uuid::new_v4);
        let manager = AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        );
        println!("user_id: {user_id}");
        println!("token:   {}", manager.generate_token(user_id)?);
        return Ok(());
    }

    logging::init_from_env()?;
    info!("Starting GoHealth API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    if config.database.seed_reference_data {
        database.seed_reference_data().await?;
        info!("Reference data seeded");
    }

    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(database, config)?);
    info!(gateway = resources.notifier.gateway_name(), "Push gateway ready");
    let router = ApiRoutes::router(resources);

    let address = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server listening on http://{address}");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
