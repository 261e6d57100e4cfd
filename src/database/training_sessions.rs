// ABOUTME: Database operations for stored training sessions
// ABOUTME: Insert, lookup by id, and per-user listing in insertion order for the digest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use pitchside_core::models::TrainingSession;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{format_timestamp, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};

impl Database {
    /// Store a training session
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create_training_session(&self, session: &TrainingSession) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO training_sessions (id, user_id, session_start, session_end,
                                           accelerometer_data, gyroscope_data, heart_rate_data,
                                           gps_data, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(format_timestamp(&session.session_start))
        .bind(format_timestamp(&session.session_end))
        .bind(&session.accelerometer_data)
        .bind(&session.gyroscope_data)
        .bind(&session.heart_rate_data)
        .bind(&session.gps_data)
        .bind(format_timestamp(&session.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create training session: {e}")))?;

        Ok(())
    }

    /// Get a training session by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or the row is malformed
    pub async fn get_training_session(&self, id: &str) -> AppResult<Option<TrainingSession>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, session_start, session_end, accelerometer_data, gyroscope_data,
                   heart_rate_data, gps_data, created_at
            FROM training_sessions
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get training session: {e}")))?;

        row.as_ref().map(row_to_training_session).transpose()
    }

    /// All sessions of a user in the order they were stored
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn list_training_sessions_by_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<TrainingSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, session_start, session_end, accelerometer_data, gyroscope_data,
                   heart_rate_data, gps_data, created_at
            FROM training_sessions
            WHERE user_id = $1
            ORDER BY rowid ASC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list training sessions: {e}")))?;

        rows.iter().map(row_to_training_session).collect()
    }
}

fn row_to_training_session(row: &SqliteRow) -> AppResult<TrainingSession> {
    let session_start: String = row.get("session_start");
    let session_end: String = row.get("session_end");
    let created_at: String = row.get("created_at");

    Ok(TrainingSession {
        id: row.get("id"),
        user_id: row.get("user_id"),
        session_start: parse_timestamp("session_start", &session_start)?,
        session_end: parse_timestamp("session_end", &session_end)?,
        accelerometer_data: row.get("accelerometer_data"),
        gyroscope_data: row.get("gyroscope_data"),
        heart_rate_data: row.get("heart_rate_data"),
        gps_data: row.get("gps_data"),
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
