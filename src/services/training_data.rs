// ABOUTME: Recording and lookup of training sessions that feed the analysis digest
// ABOUTME: Validates new sessions and assigns their identity before storing them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use pitchside_core::models::TrainingSession;
use tracing::{info, instrument};
use uuid::Uuid;

use super::recommendations::require_present;
use crate::database::repositories::{TrainingSessionRepository, TrainingSessionRepositoryImpl};
use crate::database::Database;
use crate::errors::{AppError, AppResult};

/// Training session intake and queries
#[derive(Clone)]
pub struct TrainingDataService {
    sessions: Arc<dyn TrainingSessionRepository>,
}

impl TrainingDataService {
    /// Service over any session store
    #[must_use]
    pub fn new(sessions: Arc<dyn TrainingSessionRepository>) -> Self {
        Self { sessions }
    }

    /// Service over the SQLite session store of `database`
    #[must_use]
    pub fn from_database(database: &Database) -> Self {
        Self::new(Arc::new(TrainingSessionRepositoryImpl::new(database.clone())))
    }

    /// Store a session, assigning a fresh id and creation time
    ///
    /// The id and `created_at` of `draft` are ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the user id is blank or the session ends before it starts
    /// - `DatabaseError` if the session cannot be stored
    #[instrument(skip_all, fields(user_id = %draft.user_id))]
    pub async fn record_session(&self, draft: TrainingSession) -> AppResult<TrainingSession> {
        require_present("userId", &draft.user_id)?;
        if draft.session_end < draft.session_start {
            return Err(AppError::invalid_input(
                "sessionEnd must not be before sessionStart",
            ));
        }

        let session = TrainingSession {
            id: Uuid::new_v4().to_string(),
            session_start: draft.session_start.trunc_subsecs(6),
            session_end: draft.session_end.trunc_subsecs(6),
            created_at: Utc::now().trunc_subsecs(6),
            ..draft
        };
        self.sessions.create(&session).await?;

        info!("Training session {} recorded", session.id);
        Ok(session)
    }

    /// Fetch one session
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no session has that id.
    pub async fn get_session(&self, session_id: &str) -> AppResult<TrainingSession> {
        require_present("sessionId", session_id)?;
        self.sessions.get_by_id(session_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Training session {session_id}"))
                .with_resource_id(session_id)
        })
    }

    /// A user's sessions in the order they were recorded
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank user id, or a database error.
    pub async fn list_user_sessions(&self, user_id: &str) -> AppResult<Vec<TrainingSession>> {
        require_present("userId", user_id)?;
        Ok(self.sessions.get_by_user_id(user_id).await?)
    }
}
