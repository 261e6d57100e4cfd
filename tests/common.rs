// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, and a scripted LLM stub that counts calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pitchside`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pitchside::database::Database;
use pitchside::errors::{AppError, AppResult};
use pitchside::llm::{
    AnalysisRequest, AnalysisResponse, RecommendationLlm, SummarizeRequest, SummarizeResponse,
};
use pitchside::models::TrainingSession;
use pitchside::services::{PipelineOptions, RecommendationPipeline};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Pipeline over `database` whose LLM is `llm`
pub fn create_test_pipeline(
    database: &Database,
    llm: Arc<ScriptedLlm>,
    options: PipelineOptions,
) -> RecommendationPipeline {
    RecommendationPipeline::from_database(database, llm).with_options(options)
}

/// A session on 2025-03-`day` with accelerometer and heart-rate data
pub fn sample_session(user_id: &str, day: u32) -> TrainingSession {
    let start = Utc.with_ymd_and_hms(2025, 3, day, 18, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 3, day, 19, 30, 0).unwrap();
    TrainingSession::new(user_id, start, end)
        .with_accelerometer_data("[0.1,0.4,0.2]")
        .with_heart_rate_data("[142,155,161]")
}

fn upstream_down(call_type: &str) -> AppError {
    AppError::upstream_unavailable(format!(
        "Failed to get response from {call_type} LLM assistant: connection refused"
    ))
}

/// `RecommendationLlm` that replays queued replies and records every call
///
/// An exhausted queue answers with an upstream failure.
#[derive(Default)]
pub struct ScriptedLlm {
    analysis_replies: Mutex<VecDeque<Option<String>>>,
    summarize_replies: Mutex<VecDeque<Option<(String, String)>>>,
    analyze_calls: AtomicUsize,
    summarize_calls: AtomicUsize,
    analysis_requests: Mutex<Vec<AnalysisRequest>>,
    summarize_requests: Mutex<Vec<SummarizeRequest>>,
}

impl ScriptedLlm {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a successful analysis reply
    pub fn push_analysis(&self, text: &str) {
        self.analysis_replies
            .lock()
            .unwrap()
            .push_back(Some(text.to_owned()));
    }

    /// Queue an analysis failure
    pub fn push_analysis_failure(&self) {
        self.analysis_replies.lock().unwrap().push_back(None);
    }

    /// Queue a successful summarize reply
    pub fn push_summary(&self, summary: &str, priority: &str) {
        self.summarize_replies
            .lock()
            .unwrap()
            .push_back(Some((summary.to_owned(), priority.to_owned())));
    }

    /// Queue a summarize failure
    pub fn push_summary_failure(&self) {
        self.summarize_replies.lock().unwrap().push_back(None);
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.analyze_calls() + self.summarize_calls()
    }

    pub fn analysis_requests(&self) -> Vec<AnalysisRequest> {
        self.analysis_requests.lock().unwrap().clone()
    }

    pub fn summarize_requests(&self) -> Vec<SummarizeRequest> {
        self.summarize_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecommendationLlm for ScriptedLlm {
    async fn analyze(&self, request: &AnalysisRequest) -> AppResult<AnalysisResponse> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.analysis_requests.lock().unwrap().push(request.clone());
        let reply = self.analysis_replies.lock().unwrap().pop_front().flatten();
        reply
            .map(|assistant_response| AnalysisResponse { assistant_response })
            .ok_or_else(|| upstream_down("Analysis"))
    }

    async fn summarize(&self, request: &SummarizeRequest) -> AppResult<SummarizeResponse> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        self.summarize_requests.lock().unwrap().push(request.clone());
        let reply = self.summarize_replies.lock().unwrap().pop_front().flatten();
        reply
            .map(|(summary, priority)| SummarizeResponse { summary, priority })
            .ok_or_else(|| upstream_down("Summarization"))
    }
}
