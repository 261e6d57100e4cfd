// ABOUTME: Request and response payloads for the summarize endpoint
// ABOUTME: Sends the stored query and analysis, receives a summary and priority label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use pitchside_core::constants::summarize::{MAX_TOKENS, TEMPERATURE};
use pitchside_core::models::Priority;
use serde::{Deserialize, Serialize};

use super::{require_non_empty, ValidatedResponse};

/// Body of `POST {summarize_url}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    /// The user's question
    pub original_query: String,
    /// Analysis produced by stage 1
    pub detailed_analysis: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Response length cap
    pub max_tokens: u32,
}

impl SummarizeRequest {
    /// Request with the summarize stage's sampling parameters
    #[must_use]
    pub fn new(original_query: impl Into<String>, detailed_analysis: impl Into<String>) -> Self {
        Self {
            original_query: original_query.into(),
            detailed_analysis: detailed_analysis.into(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Body returned by the summarize endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// Short title for the recommendation
    #[serde(default)]
    pub summary: String,
    /// Priority label, expected `Low`, `Medium` or `High`
    #[serde(default)]
    pub priority: String,
}

impl SummarizeResponse {
    /// Stored priority for the returned label
    #[must_use]
    pub fn mapped_priority(&self) -> Priority {
        Priority::from_label(&self.priority)
    }
}

impl ValidatedResponse for SummarizeResponse {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("summary", &self.summary)?;
        require_non_empty("priority", &self.priority)
    }
}
