// ABOUTME: Request and response payloads for the analysis endpoint
// ABOUTME: Chat-style messages in, a single free-text assistant response out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use pitchside_core::constants::analysis::{MAX_TOKENS, TEMPERATURE};
use serde::{Deserialize, Serialize};

use super::{require_non_empty, ChatMessage, ValidatedResponse};

/// Body of `POST {analysis_url}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Context and query messages, in order
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Response length cap
    pub max_tokens: u32,
}

impl AnalysisRequest {
    /// Request with the analysis stage's sampling parameters
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Body returned by the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Detailed analysis text
    #[serde(default)]
    pub assistant_response: String,
}

impl ValidatedResponse for AnalysisResponse {
    fn validate(&self) -> Result<(), String> {
        require_non_empty("assistant_response", &self.assistant_response)
    }
}
