// ABOUTME: Recommendation pipeline route handlers for analysis, summarization, and record access
// ABOUTME: Thin axum handlers that validate wire input and delegate to RecommendationPipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use pitchside_core::models::RecommendationType;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::RecommendationPipeline;

/// Body of `POST /api/llm/basic-chat`
///
/// Missing and `null` fields are accepted here and rejected by the pipeline
/// as invalid input.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicChatRequest {
    /// Owner of the new recommendation
    #[serde(default)]
    pub user_id: Option<String>,
    /// Free-text question
    #[serde(default)]
    pub query: Option<String>,
}

/// Query string of the per-user listing
#[derive(Debug, Default, Deserialize)]
pub struct ListRecommendationsQuery {
    /// Optional `DETAILED_ANALYSIS` / `SUMMARIZED_ANALYSIS` filter
    #[serde(rename = "type")]
    pub recommendation_type: Option<String>,
}

/// Query string of the per-user time-range listing
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRangeQuery {
    /// Inclusive lower bound on `createdAt`
    pub from: Option<String>,
    /// Inclusive upper bound on `createdAt`
    pub to: Option<String>,
}

/// Parse a range bound given as RFC 3339 or as a zone-less local time taken as UTC
fn parse_range_bound(name: &str, raw: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::invalid_input(format!("{name} is required")))?;

    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|ts| ts.and_utc())
        })
        .map_err(|e| AppError::invalid_input(format!("Invalid {name} '{raw}': {e}")))
}

/// Recommendation routes handler
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(pipeline: Arc<RecommendationPipeline>) -> Router {
        Router::new()
            // Pipeline stages
            .route("/api/llm/basic-chat", post(Self::basic_chat))
            .route(
                "/api/llm/summarize/:recommendation_id",
                post(Self::summarize),
            )
            // Record access
            .route(
                "/api/recommendations/:recommendation_id",
                get(Self::get_recommendation).delete(Self::delete_recommendation),
            )
            .route(
                "/api/recommendations/user/:user_id",
                get(Self::list_user_recommendations),
            )
            .route(
                "/api/recommendations/user/:user_id/range",
                get(Self::list_user_recommendations_in_range),
            )
            .with_state(pipeline)
    }

    /// Stage 1: create a detailed analysis
    async fn basic_chat(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Json(request): Json<BasicChatRequest>,
    ) -> Result<Response, AppError> {
        let user_id = request.user_id.unwrap_or_default();
        let query = request.query.unwrap_or_default();
        let recommendation = pipeline.generate_detailed_analysis(&user_id, &query).await?;
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    /// Stage 2: summarize and prioritize a stored analysis
    async fn summarize(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Path(recommendation_id): Path<String>,
    ) -> Result<Response, AppError> {
        let recommendation = pipeline
            .summarize_and_prioritize_analysis(&recommendation_id)
            .await?;
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    async fn get_recommendation(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Path(recommendation_id): Path<String>,
    ) -> Result<Response, AppError> {
        let recommendation = pipeline.get_recommendation(&recommendation_id).await?;
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    async fn list_user_recommendations(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Path(user_id): Path<String>,
        Query(query): Query<ListRecommendationsQuery>,
    ) -> Result<Response, AppError> {
        let recommendation_type = query
            .recommendation_type
            .as_deref()
            .map(str::parse::<RecommendationType>)
            .transpose()
            .map_err(AppError::invalid_input)?;

        let recommendations = pipeline
            .list_user_recommendations(&user_id, recommendation_type)
            .await?;
        Ok((StatusCode::OK, Json(recommendations)).into_response())
    }

    async fn list_user_recommendations_in_range(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Path(user_id): Path<String>,
        Query(query): Query<RecommendationRangeQuery>,
    ) -> Result<Response, AppError> {
        let from = parse_range_bound("from", query.from.as_deref())?;
        let to = parse_range_bound("to", query.to.as_deref())?;

        let recommendations = pipeline
            .list_user_recommendations_in_range(&user_id, from, to)
            .await?;
        Ok((StatusCode::OK, Json(recommendations)).into_response())
    }

    async fn delete_recommendation(
        State(pipeline): State<Arc<RecommendationPipeline>>,
        Path(recommendation_id): Path<String>,
    ) -> Result<Response, AppError> {
        pipeline.delete_recommendation(&recommendation_id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
