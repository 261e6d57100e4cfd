// ABOUTME: Route module organization for the Pitchside HTTP endpoints
// ABOUTME: Assembles recommendation, training data, and health routers behind shared tower-http layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! Route module for the Pitchside server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Recommendation pipeline routes
pub mod recommendations;
/// Training session intake routes
pub mod training_data;

pub use health::HealthRoutes;
pub use recommendations::RecommendationRoutes;
pub use training_data::TrainingDataRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::database::Database;
use crate::services::{RecommendationPipeline, TrainingDataService};

/// Full application router with tracing, request ids, and CORS
pub fn router(database: Database, pipeline: Arc<RecommendationPipeline>) -> Router {
    let training_data = Arc::new(TrainingDataService::from_database(&database));
    Router::new()
        .merge(HealthRoutes::routes(database))
        .merge(RecommendationRoutes::routes(pipeline))
        .merge(TrainingDataRoutes::routes(training_data))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}
