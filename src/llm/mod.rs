// ABOUTME: LLM service abstraction for the two-stage recommendation pipeline
// ABOUTME: Defines the RecommendationLlm contract, chat messages, and typed response validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # LLM Service Interface
//!
//! The pipeline talks to one external service exposing two endpoints:
//!
//! - **analysis** (`/api/chat/`): chat-style messages in, free-text analysis out
//! - **summarize** (`/api/summarize/`): query plus analysis in, summary and
//!   priority label out
//!
//! Each endpoint has its own request/response pair. Responses implement
//! [`ValidatedResponse`] so the transport can reject incomplete payloads
//! without knowing which endpoint it is talking to.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pitchside::config::LlmServiceConfig;
//! use pitchside::llm::{AnalysisRequest, ChatMessage, HttpLlmClient, RecommendationLlm};
//! use pitchside::errors::AppError;
//!
//! async fn example() -> Result<(), AppError> {
//!     let client = HttpLlmClient::new(LlmServiceConfig::default())?;
//!     let request = AnalysisRequest::new(vec![ChatMessage::user("How was my week?")]);
//!     let response = client.analyze(&request).await?;
//!     println!("{}", response.assistant_response);
//!     Ok(())
//! }
//! ```

mod analysis;
mod client;
pub mod prompts;
mod summarize;

pub use analysis::{AnalysisRequest, AnalysisResponse};
pub use client::HttpLlmClient;
pub use summarize::{SummarizeRequest, SummarizeResponse};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message sent to the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// A response body that carries its own completeness rules
pub trait ValidatedResponse: DeserializeOwned + Send {
    /// Check required fields; `Err` carries the reason shown in the failure
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing or empty required field.
    fn validate(&self) -> Result<(), String>;
}

/// External service used by the recommendation pipeline
///
/// Every method performs exactly one network attempt. Any transport failure,
/// empty body, or incomplete response is reported as
/// `ErrorCode::ExternalServiceUnavailable`.
#[async_trait]
pub trait RecommendationLlm: Send + Sync {
    /// Stage 1: produce a detailed analysis
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisResponse>;

    /// Stage 2: produce a short summary and a priority label
    async fn summarize(&self, request: &SummarizeRequest) -> AppResult<SummarizeResponse>;
}

fn require_non_empty(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("missing {field}"))
    } else {
        Ok(())
    }
}
