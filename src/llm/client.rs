// ABOUTME: HTTP transport for the analysis and summarize endpoints
// ABOUTME: One JSON POST per call; transport, empty-body, and validation failures become upstream errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use std::time::Instant;

use async_trait::async_trait;
use pitchside_core::constants::service_names;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

use super::{
    AnalysisRequest, AnalysisResponse, RecommendationLlm, SummarizeRequest, SummarizeResponse,
    ValidatedResponse,
};
use crate::config::LlmServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::PipelineLogger;

/// `RecommendationLlm` backed by the external HTTP service
///
/// The underlying `reqwest::Client` is built once and pools connections.
/// Dropping a pending call aborts its in-flight request.
#[derive(Debug, Clone)]
pub struct HttpLlmClient {
    client: Client,
    config: LlmServiceConfig,
}

impl HttpLlmClient {
    /// Create a client with the configured endpoints and timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LlmServiceConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// POST `payload` as JSON to `url` and return the validated response body
    async fn post_validated<Req, Resp>(
        &self,
        call_type: &str,
        url: &Url,
        payload: &Req,
    ) -> AppResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: ValidatedResponse,
    {
        let started = Instant::now();
        let result = self.send_and_validate(call_type, url, payload).await;
        PipelineLogger::log_llm_call(call_type, url.as_str(), result.is_ok(), started.elapsed());
        result
    }

    async fn send_and_validate<Req, Resp>(
        &self,
        call_type: &str,
        url: &Url,
        payload: &Req,
    ) -> AppResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: ValidatedResponse,
    {
        let response = self
            .client
            .post(url.clone())
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to {call_type} endpoint {url}: {e}");
                no_response_from(call_type, &e.to_string()).with_source(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read {call_type} response body: {e}");
            no_response_from(call_type, &e.to_string()).with_source(e)
        })?;

        if !status.is_success() {
            return Err(no_response_from(call_type, &format!("HTTP {status}")));
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(AppError::upstream_unavailable(format!(
                "{call_type} LLM assistant provided no response."
            )));
        }

        let parsed: Resp = serde_json::from_str(trimmed).map_err(|e| {
            error!("Failed to parse {call_type} response: {e}");
            no_response_from(call_type, &format!("invalid response body: {e}")).with_source(e)
        })?;

        parsed.validate().map_err(|reason| {
            AppError::upstream_unavailable(format!(
                "{call_type} LLM assistant returned an incomplete response: {reason}"
            ))
        })?;

        debug!("{call_type} endpoint returned {} bytes", body.len());
        Ok(parsed)
    }
}

fn no_response_from(call_type: &str, cause: &str) -> AppError {
    AppError::upstream_unavailable(format!(
        "Failed to get response from {call_type} LLM assistant: {cause}"
    ))
}

#[async_trait]
impl RecommendationLlm for HttpLlmClient {
    #[instrument(skip_all, fields(messages = request.messages.len()))]
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisResponse> {
        self.post_validated(service_names::ANALYSIS, &self.config.analysis_url, request)
            .await
    }

    #[instrument(skip_all)]
    async fn summarize(&self, request: &SummarizeRequest) -> AppResult<SummarizeResponse> {
        self.post_validated(
            service_names::SUMMARIZATION,
            &self.config.summarize_url,
            request,
        )
        .await
    }
}
