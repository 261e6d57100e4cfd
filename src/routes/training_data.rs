// ABOUTME: Training data route handlers for recording and reading sessions
// ABOUTME: Sessions stored here are what the analysis stage digests for context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use pitchside_core::models::TrainingSession;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::services::TrainingDataService;

/// Body of `POST /api/training-data`
///
/// Channel payloads may be JSON strings or raw JSON values; non-string values
/// are stored as their JSON text.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest {
    /// Owner of the session
    #[serde(default)]
    pub user_id: Option<String>,
    /// Session start (RFC 3339)
    #[serde(default)]
    pub session_start: Option<DateTime<Utc>>,
    /// Session end (RFC 3339)
    #[serde(default)]
    pub session_end: Option<DateTime<Utc>>,
    /// Accelerometer samples
    #[serde(default)]
    pub accelerometer_data: Option<Value>,
    /// Gyroscope samples
    #[serde(default)]
    pub gyroscope_data: Option<Value>,
    /// Heart-rate samples
    #[serde(default)]
    pub heart_rate_data: Option<Value>,
    /// GPS track
    #[serde(default)]
    pub gps_data: Option<Value>,
}

impl RecordSessionRequest {
    fn into_draft(self) -> Result<TrainingSession, AppError> {
        let session_start = self
            .session_start
            .ok_or_else(|| AppError::invalid_input("sessionStart is required"))?;
        let session_end = self
            .session_end
            .ok_or_else(|| AppError::invalid_input("sessionEnd is required"))?;

        Ok(TrainingSession {
            accelerometer_data: payload_text(self.accelerometer_data),
            gyroscope_data: payload_text(self.gyroscope_data),
            heart_rate_data: payload_text(self.heart_rate_data),
            gps_data: payload_text(self.gps_data),
            ..TrainingSession::new(
                self.user_id.unwrap_or_default(),
                session_start,
                session_end,
            )
        })
    }
}

fn payload_text(payload: Option<Value>) -> Option<String> {
    match payload? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Training data routes handler
pub struct TrainingDataRoutes;

impl TrainingDataRoutes {
    /// Create all training data routes
    pub fn routes(service: Arc<TrainingDataService>) -> Router {
        Router::new()
            .route("/api/training-data", post(Self::record_session))
            .route("/api/training-data/:session_id", get(Self::get_session))
            .route(
                "/api/training-data/user/:user_id",
                get(Self::list_user_sessions),
            )
            .with_state(service)
    }

    async fn record_session(
        State(service): State<Arc<TrainingDataService>>,
        Json(request): Json<RecordSessionRequest>,
    ) -> Result<Response, AppError> {
        let session = service.record_session(request.into_draft()?).await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    async fn get_session(
        State(service): State<Arc<TrainingDataService>>,
        Path(session_id): Path<String>,
    ) -> Result<Response, AppError> {
        let session = service.get_session(&session_id).await?;
        Ok((StatusCode::OK, Json(session)).into_response())
    }

    async fn list_user_sessions(
        State(service): State<Arc<TrainingDataService>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let sessions = service.list_user_sessions(&user_id).await?;
        Ok((StatusCode::OK, Json(sessions)).into_response())
    }
}
