// ABOUTME: SQLite database manager for recommendations and training sessions
// ABOUTME: Owns the connection pool and runs idempotent schema migrations at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # Database Management
//!
//! Persistence for the recommendation pipeline. The pipeline itself only sees
//! the repository traits in [`repositories`]; this module provides the SQLite
//! implementation behind them.

mod recommendations;
/// Repository traits consumed by the pipeline and their SQLite implementations
pub mod repositories;
mod training_sessions;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Database manager for recommendation storage
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a database connection and run migrations
    ///
    /// `sqlite::memory:` opens a single-connection pool so every query sees the
    /// same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let is_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if !is_memory && database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(if is_memory { 1 } else { 5 })
            .connect(&connection_options)
            .await
            .with_context(|| format!("Failed to connect to {database_url}"))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {database_url}");
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
    /// Returns an error if a table or index cannot be created
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_recommendations().await?;
        self.migrate_training_sessions().await?;
        Ok(())
    }

    async fn migrate_recommendations(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recommendations (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                recommendation_type TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                original_query TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 1 CHECK (priority IN (0, 1, 2)),
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create recommendations table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recommendations_user_id ON recommendations(user_id)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create recommendations index")?;

        Ok(())
    }

    async fn migrate_training_sessions(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                session_start TEXT NOT NULL,
                session_end TEXT NOT NULL,
                accelerometer_data TEXT,
                gyroscope_data TEXT,
                heart_rate_data TEXT,
                gps_data TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create training_sessions table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_training_sessions_user_id ON training_sessions(user_id)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create training_sessions index")?;

        Ok(())
    }
}

/// Fixed-width RFC 3339 so stored timestamps sort lexically
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: &str, raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid {column} timestamp '{raw}': {e}")))
}
