// ABOUTME: Core data models for the recommendation pipeline
// ABOUTME: Re-exports Recommendation lifecycle types and the read-only TrainingSession
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

/// Recommendation entity and its state machine
pub mod recommendation;

/// Training session telemetry
pub mod training_session;

pub use recommendation::{
    NewRecommendation, Priority, Recommendation, RecommendationStatus, RecommendationType,
};
pub use training_session::TrainingSession;
