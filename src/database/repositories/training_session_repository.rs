// ABOUTME: Training session repository implementation backed by SQLite
// ABOUTME: Feeds the digest builder and the training-data routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use async_trait::async_trait;
use pitchside_core::models::TrainingSession;

use super::TrainingSessionRepository;
use crate::database::Database;
use crate::errors::{AppError, DatabaseError};

/// SQLite implementation of `TrainingSessionRepository`
#[derive(Clone)]
pub struct TrainingSessionRepositoryImpl {
    db: Database,
}

impl TrainingSessionRepositoryImpl {
    /// Create a new `TrainingSessionRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

fn query_error(error: AppError) -> DatabaseError {
    DatabaseError::QueryError {
        context: error.message,
    }
}

#[async_trait]
impl TrainingSessionRepository for TrainingSessionRepositoryImpl {
    async fn create(&self, session: &TrainingSession) -> Result<(), DatabaseError> {
        self.db
            .create_training_session(session)
            .await
            .map_err(query_error)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<TrainingSession>, DatabaseError> {
        self.db.get_training_session(id).await.map_err(query_error)
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<TrainingSession>, DatabaseError> {
        self.db
            .list_training_sessions_by_user(user_id)
            .await
            .map_err(query_error)
    }
}
