// ABOUTME: Constants for the two-stage recommendation pipeline
// ABOUTME: Digest placeholders, initial record title, and per-stage LLM sampling limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! Constants module
//!
//! Values shared between the digest builder, the pipeline stages, and tests.

/// Training digest constants
pub mod digest {
    /// Digest returned when a user has no training sessions
    pub const NO_TRAINING_DATA: &str = "No recent training data available.";
    /// Maximum number of sessions rendered into one digest
    pub const MAX_SESSIONS: usize = 3;
    /// Prefix of the contextual message carrying the digest
    pub const CONTEXT_PREFIX: &str = "Here is a summary of my recent training data:\n";
}

/// Analysis stage (stage 1) parameters
pub mod analysis {
    /// Sampling temperature sent to the analysis endpoint
    pub const TEMPERATURE: f64 = 1.0;
    /// Response length cap sent to the analysis endpoint
    pub const MAX_TOKENS: u32 = 500;
    /// Title of a record before the summarizer has run
    pub const PLACEHOLDER_TITLE: &str = "Personalized AI Analysis";
}

/// Summarization stage (stage 2) parameters
pub mod summarize {
    /// Sampling temperature sent to the summarize endpoint
    pub const TEMPERATURE: f64 = 0.7;
    /// Response length cap sent to the summarize endpoint
    pub const MAX_TOKENS: u32 = 100;
}

/// Service identifiers used in logs and error messages
pub mod service_names {
    /// Server binary / tracing service name
    pub const PITCHSIDE_SERVER: &str = "pitchside-server";
    /// Label for the analysis call in logs and errors
    pub const ANALYSIS: &str = "Analysis";
    /// Label for the summarize call in logs and errors
    pub const SUMMARIZATION: &str = "Summarization";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}
