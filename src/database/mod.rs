// ABOUTME: SQLite persistence for profiles, BMI history, goals, meals, activities and notifications
// ABOUTME: Connection pool setup, schema migrations and shared row helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! # Database Management
//!
//! A single [`Database`] handle wraps the `sqlx` SQLite pool. Each table group lives in its
//! own file as an `impl Database` block with a `migrate_*` function and its queries.
//! Calendar dates are stored as ISO `TEXT` so range filters compare lexically; the
//! `DD-MM-YYYY` wire format is applied only at the API edge.

mod activities;
mod bmi;
mod foods;
mod goals;
mod meals;
mod notifications;
mod seed;
mod users;

pub use meals::UserMealCalories;

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use uuid::Uuid;

/// Database manager for all GoHealth records
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // An in-memory database lives only as long as its connection
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(url = %database_url, "Database initialized");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_bmi().await?;
        self.migrate_goals().await?;
        self.migrate_foods().await?;
        self.migrate_meals().await?;
        self.migrate_activities().await?;
        self.migrate_notifications().await?;
        Ok(())
    }

    /// Liveness probe used by the health route
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Parse a stored UUID column
pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::database(format!("Corrupt id '{value}' in database: {e}")))
}

/// Map a stored enum column through its parser
pub(crate) fn parse_stored<T>(value: &str, column: &str, parse: fn(&str) -> Option<T>) -> AppResult<T> {
    parse(value).ok_or_else(|| AppError::database(format!("Unknown {column} '{value}' in database")))
}
