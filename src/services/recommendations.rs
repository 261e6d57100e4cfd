// ABOUTME: Two-stage recommendation pipeline: detailed analysis, then summary and priority
// ABOUTME: Coordinates digest, LLM calls, and record transitions with fail-clean persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # Recommendation Pipeline
//!
//! Stage 1 ([`RecommendationPipeline::generate_detailed_analysis`]) turns a
//! user's question plus a digest of their recent training into a
//! `PENDING_SUMMARY` record. Stage 2
//! ([`RecommendationPipeline::summarize_and_prioritize_analysis`]) condenses
//! that record into a title and priority and marks it `COMPLETED`.
//!
//! Both stages make exactly one upstream attempt and write to the store only
//! after that attempt succeeded.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pitchside_core::models::{
    NewRecommendation, Recommendation, RecommendationStatus, RecommendationType,
};
use tracing::{info, instrument, warn};

use super::training_digest;
use crate::config::RecommendationConfig;
use crate::database::repositories::{
    RecommendationRepository, RecommendationRepositoryImpl, TrainingSessionRepository,
    TrainingSessionRepositoryImpl,
};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::analysis_messages;
use crate::llm::{AnalysisRequest, RecommendationLlm, SummarizeRequest};
use crate::logging::PipelineLogger;

/// Behavior switches for the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Let stage 2 run again on a `COMPLETED` record, overwriting title and priority
    pub allow_resummarize: bool,
}

impl From<RecommendationConfig> for PipelineOptions {
    fn from(config: RecommendationConfig) -> Self {
        Self {
            allow_resummarize: config.allow_resummarize,
        }
    }
}

/// The analysis and summarization stages over shared collaborators
#[derive(Clone)]
pub struct RecommendationPipeline {
    llm: Arc<dyn RecommendationLlm>,
    sessions: Arc<dyn TrainingSessionRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
    options: PipelineOptions,
}

impl RecommendationPipeline {
    /// Pipeline with the run-once guard enabled
    #[must_use]
    pub fn new(
        llm: Arc<dyn RecommendationLlm>,
        sessions: Arc<dyn TrainingSessionRepository>,
        recommendations: Arc<dyn RecommendationRepository>,
    ) -> Self {
        Self {
            llm,
            sessions,
            recommendations,
            options: PipelineOptions::default(),
        }
    }

    /// Pipeline over the SQLite repositories of `database`
    #[must_use]
    pub fn from_database(database: &Database, llm: Arc<dyn RecommendationLlm>) -> Self {
        Self::new(
            llm,
            Arc::new(TrainingSessionRepositoryImpl::new(database.clone())),
            Arc::new(RecommendationRepositoryImpl::new(database.clone())),
        )
    }

    /// Replace the behavior switches
    #[must_use]
    pub const fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Stage 1: analyze `query` in the context of the user's recent training
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `user_id` or `query` is blank (no upstream call)
    /// - `ExternalServiceUnavailable` if the analysis call fails (nothing stored)
    /// - `DatabaseError` if sessions cannot be read or the record cannot be stored
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn generate_detailed_analysis(
        &self,
        user_id: &str,
        query: &str,
    ) -> AppResult<Recommendation> {
        require_present("userId", user_id)?;
        require_present("query", query)?;

        let sessions = self.sessions.get_by_user_id(user_id).await?;
        let digest = training_digest::digest(&sessions);
        let request = AnalysisRequest::new(analysis_messages(&digest, query));

        let response = self.llm.analyze(&request).await?;

        let created = self
            .recommendations
            .create(NewRecommendation::pending(
                user_id,
                query,
                response.assistant_response,
            ))
            .await?;

        PipelineLogger::log_transition(&created.id, user_id, created.status.as_str());
        Ok(created)
    }

    /// Stage 2: summarize and prioritize a stored analysis
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `recommendation_id` is blank
    /// - `ResourceNotFound` if no record has that id (no upstream call)
    /// - `InvalidState` if the record lacks its query or analysis, or is already
    ///   completed while re-summarizing is disabled (no upstream call)
    /// - `ExternalServiceUnavailable` if the summarize call fails (record untouched)
    #[instrument(skip_all, fields(recommendation_id = %recommendation_id))]
    pub async fn summarize_and_prioritize_analysis(
        &self,
        recommendation_id: &str,
    ) -> AppResult<Recommendation> {
        require_present("recommendationId", recommendation_id)?;

        let existing = self.find(recommendation_id).await?;

        if !existing.is_ready_for_summary() {
            return Err(AppError::invalid_state(
                "Cannot summarize: original query or detailed analysis is missing",
            )
            .with_resource_id(recommendation_id));
        }
        if existing.status == RecommendationStatus::Completed && !self.options.allow_resummarize {
            return Err(already_summarized(recommendation_id));
        }

        let request = SummarizeRequest::new(&existing.original_query, &existing.description);
        let response = self.llm.summarize(&request).await?;

        let completed =
            Recommendation::completed_from(&existing, &response.summary, response.mapped_priority());

        let saved = if self.options.allow_resummarize {
            self.recommendations.update(&completed).await?
        } else {
            self.recommendations
                .update_if_status(&completed, RecommendationStatus::PendingSummary)
                .await?
                .ok_or_else(|| {
                    warn!("Recommendation {recommendation_id} changed while summarizing");
                    already_summarized(recommendation_id)
                })?
        };

        info!(
            priority = saved.priority.as_u8(),
            "Recommendation {} summarized", saved.id
        );
        PipelineLogger::log_transition(&saved.id, &saved.user_id, saved.status.as_str());
        Ok(saved)
    }

    /// Fetch one recommendation
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no record has that id.
    pub async fn get_recommendation(&self, recommendation_id: &str) -> AppResult<Recommendation> {
        require_present("recommendationId", recommendation_id)?;
        self.find(recommendation_id).await
    }

    /// A user's recommendations, newest first, optionally of one type
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank user id, or a database error.
    pub async fn list_user_recommendations(
        &self,
        user_id: &str,
        recommendation_type: Option<RecommendationType>,
    ) -> AppResult<Vec<Recommendation>> {
        require_present("userId", user_id)?;
        Ok(self
            .recommendations
            .list_by_user(user_id, recommendation_type)
            .await?)
    }

    /// A user's recommendations created within `[from, to]`, newest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank user id or when `from` is after `to`,
    /// or a database error.
    pub async fn list_user_recommendations_in_range(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<Recommendation>> {
        require_present("userId", user_id)?;
        if from > to {
            return Err(AppError::invalid_input(format!(
                "from ({}) must not be after to ({})",
                from.to_rfc3339(),
                to.to_rfc3339()
            )));
        }
        Ok(self
            .recommendations
            .list_by_user_in_range(user_id, from, to)
            .await?)
    }

    /// Remove a recommendation
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no record has that id.
    #[instrument(skip(self))]
    pub async fn delete_recommendation(&self, recommendation_id: &str) -> AppResult<()> {
        require_present("recommendationId", recommendation_id)?;
        self.recommendations.delete(recommendation_id).await?;
        info!("Recommendation {recommendation_id} deleted");
        Ok(())
    }

    async fn find(&self, recommendation_id: &str) -> AppResult<Recommendation> {
        self.recommendations
            .get_by_id(recommendation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Recommendation {recommendation_id}"))
                    .with_resource_id(recommendation_id)
            })
    }
}

fn already_summarized(recommendation_id: &str) -> AppError {
    AppError::invalid_state(format!(
        "Recommendation {recommendation_id} has already been summarized"
    ))
    .with_resource_id(recommendation_id)
}

pub(super) fn require_present(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}
