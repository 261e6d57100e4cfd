// ABOUTME: Recommendation repository implementation backed by SQLite
// ABOUTME: Delegates to Database and maps failures into DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use pitchside_core::models::{
    NewRecommendation, Recommendation, RecommendationStatus, RecommendationType,
};

use super::RecommendationRepository;
use crate::database::Database;
use crate::errors::{AppError, DatabaseError};

const ENTITY: &str = "Recommendation";

/// SQLite implementation of `RecommendationRepository`
#[derive(Clone)]
pub struct RecommendationRepositoryImpl {
    db: Database,
}

impl RecommendationRepositoryImpl {
    /// Create a new `RecommendationRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

/// The record as it reads back from storage (microsecond timestamps)
fn as_stored(recommendation: &Recommendation) -> Recommendation {
    Recommendation {
        created_at: recommendation.created_at.trunc_subsecs(6),
        updated_at: recommendation.updated_at.trunc_subsecs(6),
        ..recommendation.clone()
    }
}

fn query_error(error: AppError) -> DatabaseError {
    DatabaseError::QueryError {
        context: error.message,
    }
}

#[async_trait]
impl RecommendationRepository for RecommendationRepositoryImpl {
    async fn create(&self, new: NewRecommendation) -> Result<Recommendation, DatabaseError> {
        self.db.create_recommendation(new).await.map_err(query_error)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Recommendation>, DatabaseError> {
        self.db.get_recommendation(id).await.map_err(query_error)
    }

    async fn update(
        &self,
        recommendation: &Recommendation,
    ) -> Result<Recommendation, DatabaseError> {
        let updated = self
            .db
            .update_recommendation(recommendation)
            .await
            .map_err(query_error)?;
        if !updated {
            return Err(DatabaseError::NotFound {
                entity_type: ENTITY,
                id: recommendation.id.clone(),
            });
        }
        Ok(as_stored(recommendation))
    }

    async fn update_if_status(
        &self,
        recommendation: &Recommendation,
        expected: RecommendationStatus,
    ) -> Result<Option<Recommendation>, DatabaseError> {
        let updated = self
            .db
            .update_recommendation_if_status(recommendation, expected)
            .await
            .map_err(query_error)?;
        Ok(updated.then(|| as_stored(recommendation)))
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        recommendation_type: Option<RecommendationType>,
    ) -> Result<Vec<Recommendation>, DatabaseError> {
        self.db
            .list_recommendations_by_user(user_id, recommendation_type)
            .await
            .map_err(query_error)
    }

    async fn list_by_user_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Recommendation>, DatabaseError> {
        self.db
            .list_recommendations_by_user_in_range(user_id, &from, &to)
            .await
            .map_err(query_error)
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .db
            .delete_recommendation(id)
            .await
            .map_err(query_error)?;
        if deleted {
            Ok(())
        } else {
            Err(DatabaseError::NotFound {
                entity_type: ENTITY,
                id: id.to_owned(),
            })
        }
    }
}
