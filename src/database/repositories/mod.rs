// ABOUTME: Repository traits for the recommendation pipeline's persistence seams
// ABOUTME: The pipeline depends on these traits; SQLite implementations live alongside
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # Repositories
//!
//! Narrow, async persistence contracts. Each trait covers one entity and
//! reports failures as [`DatabaseError`] so callers never see driver types.

mod recommendation_repository;
mod training_session_repository;

pub use recommendation_repository::RecommendationRepositoryImpl;
pub use training_session_repository::TrainingSessionRepositoryImpl;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pitchside_core::models::{
    NewRecommendation, Recommendation, RecommendationStatus, RecommendationType, TrainingSession,
};

use crate::errors::DatabaseError;

/// Persistence of the `Recommendation` entity
#[async_trait]
pub trait RecommendationRepository: Send + Sync {
    /// Insert a new record; the store assigns id and timestamps
    async fn create(&self, new: NewRecommendation) -> Result<Recommendation, DatabaseError>;

    /// Look up a record by id
    async fn get_by_id(&self, id: &str) -> Result<Option<Recommendation>, DatabaseError>;

    /// Full overwrite of the mutable fields; `NotFound` when the id is unknown
    async fn update(&self, recommendation: &Recommendation)
        -> Result<Recommendation, DatabaseError>;

    /// Overwrite only while the stored status equals `expected`
    ///
    /// Returns `Ok(None)` when the row is missing or its status has changed.
    async fn update_if_status(
        &self,
        recommendation: &Recommendation,
        expected: RecommendationStatus,
    ) -> Result<Option<Recommendation>, DatabaseError>;

    /// A user's records, newest first
    async fn list_by_user(
        &self,
        user_id: &str,
        recommendation_type: Option<RecommendationType>,
    ) -> Result<Vec<Recommendation>, DatabaseError>;

    /// A user's records created within `[from, to]`, newest first
    async fn list_by_user_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, DatabaseError>;

    /// Remove a record; `NotFound` when the id is unknown
    async fn delete(&self, id: &str) -> Result<(), DatabaseError>;
}

/// Persistence of recorded training sessions
#[async_trait]
pub trait TrainingSessionRepository: Send + Sync {
    /// Store a session as given
    async fn create(&self, session: &TrainingSession) -> Result<(), DatabaseError>;

    /// Look up a session by id
    async fn get_by_id(&self, id: &str) -> Result<Option<TrainingSession>, DatabaseError>;

    /// A user's sessions in the store's natural order
    async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<TrainingSession>, DatabaseError>;
}
