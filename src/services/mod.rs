// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Hosts the recommendation pipeline, training data intake, and the digest builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! Domain service layer
//!
//! Protocol-agnostic business logic. Route handlers stay thin and delegate
//! here so the pipeline can be driven directly from tests or other callers.

/// Two-stage analysis and summarization pipeline
pub mod recommendations;

/// Training session intake and queries
pub mod training_data;

/// Textual digest of recent training sessions
pub mod training_digest;

pub use recommendations::{PipelineOptions, RecommendationPipeline};
pub use training_data::TrainingDataService;
