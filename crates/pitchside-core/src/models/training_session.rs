// ABOUTME: Read-only training session model consumed by the recommendation pipeline
// ABOUTME: Raw sensor channel payloads with derived per-channel presence flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded training session with optional sensor channels.
///
/// Channel payloads are opaque JSON text; the pipeline only cares whether a
/// channel was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    /// Unique identifier
    pub id: String,
    /// Owner reference
    pub user_id: String,
    /// Session start
    pub session_start: DateTime<Utc>,
    /// Session end
    pub session_end: DateTime<Utc>,
    /// Accelerometer samples
    pub accelerometer_data: Option<String>,
    /// Gyroscope samples
    pub gyroscope_data: Option<String>,
    /// Heart-rate samples
    pub heart_rate_data: Option<String>,
    /// GPS track
    pub gps_data: Option<String>,
    /// When the session was stored
    pub created_at: DateTime<Utc>,
}

fn is_present(payload: Option<&String>) -> bool {
    payload.is_some_and(|p| !p.is_empty())
}

impl TrainingSession {
    /// New session without any channel data
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        session_start: DateTime<Utc>,
        session_end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            session_start,
            session_end,
            accelerometer_data: None,
            gyroscope_data: None,
            heart_rate_data: None,
            gps_data: None,
            created_at: Utc::now(),
        }
    }

    /// Attach accelerometer samples
    #[must_use]
    pub fn with_accelerometer_data(mut self, data: impl Into<String>) -> Self {
        self.accelerometer_data = Some(data.into());
        self
    }

    /// Attach gyroscope samples
    #[must_use]
    pub fn with_gyroscope_data(mut self, data: impl Into<String>) -> Self {
        self.gyroscope_data = Some(data.into());
        self
    }

    /// Attach heart-rate samples
    #[must_use]
    pub fn with_heart_rate_data(mut self, data: impl Into<String>) -> Self {
        self.heart_rate_data = Some(data.into());
        self
    }

    /// Attach a GPS track
    #[must_use]
    pub fn with_gps_data(mut self, data: impl Into<String>) -> Self {
        self.gps_data = Some(data.into());
        self
    }

    /// Accelerometer channel recorded
    #[must_use]
    pub fn has_accelerometer(&self) -> bool {
        is_present(self.accelerometer_data.as_ref())
    }

    /// Gyroscope channel recorded
    #[must_use]
    pub fn has_gyroscope(&self) -> bool {
        is_present(self.gyroscope_data.as_ref())
    }

    /// Heart-rate channel recorded
    #[must_use]
    pub fn has_heart_rate(&self) -> bool {
        is_present(self.heart_rate_data.as_ref())
    }

    /// GPS channel recorded
    #[must_use]
    pub fn has_gps(&self) -> bool {
        is_present(self.gps_data.as_ref())
    }
}
