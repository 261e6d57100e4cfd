// ABOUTME: Database operations for recommendation records
// ABOUTME: Create, read, full and conditional update, listing, and deletion of recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use chrono::{DateTime, SubsecRound, Utc};
use pitchside_core::models::{
    NewRecommendation, Priority, Recommendation, RecommendationStatus, RecommendationType,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};

const SELECT_COLUMNS: &str = "SELECT id, user_id, recommendation_type, title, description, \
     original_query, priority, status, created_at, updated_at FROM recommendations";

impl Database {
    /// Insert a new recommendation, assigning its id and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create_recommendation(
        &self,
        new: NewRecommendation,
    ) -> AppResult<Recommendation> {
        let recommendation = Recommendation::from_new(
            new,
            Uuid::new_v4().to_string(),
            Utc::now().trunc_subsecs(6),
        );

        sqlx::query(
            r"
            INSERT INTO recommendations (id, user_id, recommendation_type, title, description,
                                         original_query, priority, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(&recommendation.id)
        .bind(&recommendation.user_id)
        .bind(recommendation.recommendation_type.as_str())
        .bind(&recommendation.title)
        .bind(&recommendation.description)
        .bind(&recommendation.original_query)
        .bind(i64::from(recommendation.priority.as_u8()))
        .bind(recommendation.status.as_str())
        .bind(format_timestamp(&recommendation.created_at))
        .bind(format_timestamp(&recommendation.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create recommendation: {e}")))?;

        Ok(recommendation)
    }

    /// Get a recommendation by ID
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or the row is malformed
    pub async fn get_recommendation(&self, id: &str) -> AppResult<Option<Recommendation>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recommendation: {e}")))?;

        row.as_ref().map(row_to_recommendation).transpose()
    }

    /// Overwrite all mutable fields of an existing recommendation
    ///
    /// Returns `false` when no row has the recommendation's id.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn update_recommendation(&self, recommendation: &Recommendation) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE recommendations
            SET recommendation_type = $2, title = $3, description = $4, original_query = $5,
                priority = $6, status = $7, updated_at = $8
            WHERE id = $1
            ",
        )
        .bind(&recommendation.id)
        .bind(recommendation.recommendation_type.as_str())
        .bind(&recommendation.title)
        .bind(&recommendation.description)
        .bind(&recommendation.original_query)
        .bind(i64::from(recommendation.priority.as_u8()))
        .bind(recommendation.status.as_str())
        .bind(format_timestamp(&recommendation.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recommendation: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite a recommendation only while its stored status is `expected`
    ///
    /// Returns `false` when the row is missing or has moved to another status.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn update_recommendation_if_status(
        &self,
        recommendation: &Recommendation,
        expected: RecommendationStatus,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE recommendations
            SET recommendation_type = $2, title = $3, description = $4, original_query = $5,
                priority = $6, status = $7, updated_at = $8
            WHERE id = $1 AND status = $9
            ",
        )
        .bind(&recommendation.id)
        .bind(recommendation.recommendation_type.as_str())
        .bind(&recommendation.title)
        .bind(&recommendation.description)
        .bind(&recommendation.original_query)
        .bind(i64::from(recommendation.priority.as_u8()))
        .bind(recommendation.status.as_str())
        .bind(format_timestamp(&recommendation.updated_at))
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recommendation: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's recommendations, newest first, optionally filtered by type
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn list_recommendations_by_user(
        &self,
        user_id: &str,
        recommendation_type: Option<RecommendationType>,
    ) -> AppResult<Vec<Recommendation>> {
        let rows = match recommendation_type {
            Some(kind) => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE user_id = $1 AND recommendation_type = $2 \
                     ORDER BY created_at DESC, rowid DESC"
                ))
                .bind(user_id)
                .bind(kind.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "{SELECT_COLUMNS} WHERE user_id = $1 ORDER BY created_at DESC, rowid DESC"
                ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to list recommendations: {e}")))?;

        rows.iter().map(row_to_recommendation).collect()
    }

    /// A user's recommendations created within `[from, to]`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    pub async fn list_recommendations_by_user_in_range(
        &self,
        user_id: &str,
        from: &DateTime<Utc>,
        to: &DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE user_id = $1 AND created_at BETWEEN $2 AND $3 \
             ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(user_id)
        .bind(format_timestamp(from))
        .bind(format_timestamp(to))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list recommendations: {e}")))?;

        rows.iter().map(row_to_recommendation).collect()
    }

    /// Delete a recommendation; returns `false` if it did not exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete_recommendation(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM recommendations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recommendation: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_recommendation(row: &SqliteRow) -> AppResult<Recommendation> {
    let recommendation_type: String = row.get("recommendation_type");
    let status: String = row.get("status");
    let priority: i64 = row.get("priority");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let priority = u8::try_from(priority)
        .map_err(|e| e.to_string())
        .and_then(Priority::try_from)
        .map_err(|e| AppError::database(format!("Invalid stored priority: {e}")))?;

    Ok(Recommendation {
        id: row.get("id"),
        user_id: row.get("user_id"),
        recommendation_type: recommendation_type.parse().map_err(AppError::database)?,
        title: row.get("title"),
        description: row.get("description"),
        original_query: row.get("original_query"),
        priority,
        status: status.parse().map_err(AppError::database)?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}
