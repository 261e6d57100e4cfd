// ABOUTME: Integration tests for the two-stage recommendation pipeline
// ABOUTME: Covers validation, not-found, state guards, fail-clean upstream errors, and end-to-end flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{create_test_database, create_test_pipeline, sample_session, ScriptedLlm};
use pitchside::constants::analysis::PLACEHOLDER_TITLE;
use pitchside::database::Database;
use pitchside::errors::{AppError, AppResult, ErrorCode};
use pitchside::llm::{
    AnalysisRequest, AnalysisResponse, MessageRole, RecommendationLlm, SummarizeRequest,
    SummarizeResponse,
};
use pitchside::models::{
    NewRecommendation, Priority, Recommendation, RecommendationStatus, RecommendationType,
};
use pitchside::services::{PipelineOptions, RecommendationPipeline};

const GUARDED: PipelineOptions = PipelineOptions {
    allow_resummarize: false,
};
const RESUMMARIZE: PipelineOptions = PipelineOptions {
    allow_resummarize: true,
};

// ============================================================================
// Stage 1: generate_detailed_analysis
// ============================================================================

#[tokio::test]
async fn test_analysis_creates_pending_record() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("Focus on recovery.");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let rec = pipeline
        .generate_detailed_analysis("u1", "How was my week?")
        .await
        .unwrap();

    assert_eq!(rec.status, RecommendationStatus::PendingSummary);
    assert_eq!(rec.recommendation_type, RecommendationType::DetailedAnalysis);
    assert_eq!(rec.priority.as_u8(), 1);
    assert_eq!(rec.description, "Focus on recovery.");
    assert_eq!(rec.original_query, "How was my week?");
    assert_eq!(rec.title, PLACEHOLDER_TITLE);
    assert!(!rec.id.is_empty());

    let stored = db.get_recommendation(&rec.id).await.unwrap().unwrap();
    assert_eq!(stored, rec);
    assert_eq!(llm.analyze_calls(), 1);
}

#[tokio::test]
async fn test_analysis_without_sessions_sends_only_query() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("Rest more.");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    pipeline
        .generate_detailed_analysis("u1", "How was my week?")
        .await
        .unwrap();

    let requests = llm.analysis_requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, MessageRole::User);
    assert_eq!(request.messages[0].content, "How was my week?");
    assert!((request.temperature - 1.0).abs() < f64::EPSILON);
    assert_eq!(request.max_tokens, 500);
}

#[tokio::test]
async fn test_analysis_includes_digest_of_first_three_sessions() {
    let db = create_test_database().await.unwrap();
    for day in [10, 3, 7, 1] {
        db.create_training_session(&sample_session("u1", day))
            .await
            .unwrap();
    }
    db.create_training_session(&sample_session("someone-else", 20))
        .await
        .unwrap();

    let llm = ScriptedLlm::new();
    llm.push_analysis("Keep it up.");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    pipeline
        .generate_detailed_analysis("u1", "Am I overtraining?")
        .await
        .unwrap();

    let request = llm.analysis_requests().remove(0);
    assert_eq!(request.messages.len(), 2);

    let context = &request.messages[0].content;
    assert!(context.starts_with("Here is a summary of my recent training data:\n"));
    let lines: Vec<&str> = context.lines().skip(1).collect();
    assert_eq!(
        lines,
        vec![
            "Session on 2025-03-10 (ended 2025-03-10): Accel data: Yes, Gyro data: No, HR data: Yes, GPS data: No.",
            "Session on 2025-03-03 (ended 2025-03-03): Accel data: Yes, Gyro data: No, HR data: Yes, GPS data: No.",
            "Session on 2025-03-07 (ended 2025-03-07): Accel data: Yes, Gyro data: No, HR data: Yes, GPS data: No.",
        ]
    );
    assert_eq!(request.messages[1].content, "Am I overtraining?");
}

#[tokio::test]
async fn test_analysis_rejects_blank_input_without_calling_llm() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    for (user_id, query) in [("", "q"), ("u1", ""), ("   ", "q"), ("u1", " \n ")] {
        let err = pipeline
            .generate_detailed_analysis(user_id, query)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "{user_id:?}/{query:?}");
    }

    assert_eq!(llm.total_calls(), 0);
    assert!(db
        .list_recommendations_by_user("u1", None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_analysis_upstream_failure_creates_nothing() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis_failure();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let err = pipeline
        .generate_detailed_analysis("u1", "How was my week?")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(llm.analyze_calls(), 1);
    assert!(db
        .list_recommendations_by_user("u1", None)
        .await
        .unwrap()
        .is_empty());
}

// ============================================================================
// Stage 2: summarize_and_prioritize_analysis
// ============================================================================

#[tokio::test]
async fn test_summarize_missing_id_is_not_found_without_llm_call() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let err = pipeline
        .summarize_and_prioritize_analysis("missing-id")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(err.resource_id.as_deref(), Some("missing-id"));
    assert_eq!(llm.total_calls(), 0);
}

#[tokio::test]
async fn test_summarize_blank_id_is_invalid_input() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let err = pipeline
        .summarize_and_prioritize_analysis("  ")
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(llm.total_calls(), 0);
}

#[tokio::test]
async fn test_summarize_record_missing_prerequisites_is_invalid_state() {
    let db = create_test_database().await.unwrap();
    let incomplete = db
        .create_recommendation(NewRecommendation::pending("u1", "How was my week?", ""))
        .await
        .unwrap();

    let llm = ScriptedLlm::new();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let err = pipeline
        .summarize_and_prioritize_analysis(&incomplete.id)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(llm.total_calls(), 0);
    let stored = db.get_recommendation(&incomplete.id).await.unwrap().unwrap();
    assert_eq!(stored, incomplete);
}

#[tokio::test]
async fn test_summarize_sends_stored_query_and_analysis() {
    let db = create_test_database().await.unwrap();
    let pending = db
        .create_recommendation(NewRecommendation::pending(
            "u1",
            "Evaluate sprint speed",
            "Sprint speed is improving.",
        ))
        .await
        .unwrap();

    let llm = ScriptedLlm::new();
    llm.push_summary("Improve sprints", "High");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap();

    let request = llm.summarize_requests().remove(0);
    assert_eq!(request.original_query, "Evaluate sprint speed");
    assert_eq!(request.detailed_analysis, "Sprint speed is improving.");
    assert!((request.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(request.max_tokens, 100);
}

#[tokio::test]
async fn test_summarize_priority_labels_map_exactly() {
    let cases = [
        ("Low", 0),
        ("Medium", 1),
        ("High", 2),
        ("high", 1),
        ("  High  ", 1),
        ("Critical", 1),
    ];

    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    for (label, expected) in cases {
        let pending = db
            .create_recommendation(NewRecommendation::pending("u1", "q", "analysis"))
            .await
            .unwrap();
        llm.push_summary("Title", label);

        let rec = pipeline
            .summarize_and_prioritize_analysis(&pending.id)
            .await
            .unwrap();
        assert_eq!(rec.priority.as_u8(), expected, "label {label:?}");
    }
}

#[tokio::test]
async fn test_summarize_upstream_failure_leaves_record_unchanged() {
    let db = create_test_database().await.unwrap();
    let pending = db
        .create_recommendation(NewRecommendation::pending("u1", "q", "analysis"))
        .await
        .unwrap();

    let llm = ScriptedLlm::new();
    llm.push_summary_failure();
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let err = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    let stored = db.get_recommendation(&pending.id).await.unwrap().unwrap();
    assert_eq!(stored, pending);
}

#[tokio::test]
async fn test_completed_record_is_not_summarized_twice_by_default() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("Sprint speed is improving.");
    llm.push_summary("Improve sprints", "High");
    llm.push_summary("Rest instead", "Low");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let pending = pipeline
        .generate_detailed_analysis("u1", "Evaluate sprint speed")
        .await
        .unwrap();
    let first = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap();

    let err = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidState);
    assert_eq!(llm.summarize_calls(), 1);
    let stored = db.get_recommendation(&pending.id).await.unwrap().unwrap();
    assert_eq!(stored, first);
}

/// Summarizer that completes the record itself before answering
struct CompetingSummarizer {
    db: Database,
    recommendation_id: String,
}

#[async_trait]
impl RecommendationLlm for CompetingSummarizer {
    async fn analyze(&self, _request: &AnalysisRequest) -> AppResult<AnalysisResponse> {
        Err(AppError::upstream_unavailable("analysis not scripted"))
    }

    async fn summarize(&self, _request: &SummarizeRequest) -> AppResult<SummarizeResponse> {
        let current = self
            .db
            .get_recommendation(&self.recommendation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recommendation"))?;
        let winner = Recommendation::completed_from(&current, "Winner", Priority::High);
        self.db.update_recommendation(&winner).await?;

        Ok(SummarizeResponse {
            summary: "Loser".to_owned(),
            priority: "Low".to_owned(),
        })
    }
}

#[tokio::test]
async fn test_summarize_losing_race_is_invalid_state_and_keeps_winner() {
    let db = create_test_database().await.unwrap();
    let pending = db
        .create_recommendation(NewRecommendation::pending(
            "u1",
            "Evaluate sprint speed",
            "Sprint speed is improving.",
        ))
        .await
        .unwrap();
    let llm = Arc::new(CompetingSummarizer {
        db: db.clone(),
        recommendation_id: pending.id.clone(),
    });
    let pipeline = RecommendationPipeline::from_database(&db, llm).with_options(GUARDED);

    let err = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::InvalidState);
    let stored = db.get_recommendation(&pending.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Winner");
    assert_eq!(stored.priority, Priority::High);
    assert_eq!(stored.status, RecommendationStatus::Completed);
}

#[tokio::test]
async fn test_resummarize_overwrites_title_and_priority_when_allowed() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("Sprint speed is improving.");
    llm.push_summary("Improve sprints", "High");
    llm.push_summary("Rest instead", "Low");
    let pipeline = create_test_pipeline(&db, llm.clone(), RESUMMARIZE);

    let pending = pipeline
        .generate_detailed_analysis("u1", "Evaluate sprint speed")
        .await
        .unwrap();
    pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap();
    let second = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap();

    assert_eq!(llm.summarize_calls(), 2);
    assert_eq!(second.title, "Rest instead");
    assert_eq!(second.priority, Priority::Low);
    assert_eq!(second.status, RecommendationStatus::Completed);
    assert_eq!(second.description, "Sprint speed is improving.");

    let stored = db.get_recommendation(&pending.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Rest instead");
    assert_eq!(stored.priority, Priority::Low);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_end_to_end_analysis_then_summary() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("Sprint speed is improving.");
    llm.push_summary("Improve sprints", "High");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let pending = pipeline
        .generate_detailed_analysis("u1", "Evaluate sprint speed")
        .await
        .unwrap();
    let done = pipeline
        .summarize_and_prioritize_analysis(&pending.id)
        .await
        .unwrap();

    assert_eq!(done.id, pending.id);
    assert_eq!(done.title, "Improve sprints");
    assert_eq!(done.priority.as_u8(), 2);
    assert_eq!(done.status, RecommendationStatus::Completed);
    assert_eq!(done.recommendation_type, RecommendationType::SummarizedAnalysis);
    assert_eq!(done.description, "Sprint speed is improving.");
    assert_eq!(done.original_query, "Evaluate sprint speed");
    assert_eq!(done.created_at, pending.created_at);
    assert!(done.updated_at >= pending.updated_at);

    let stored = db.get_recommendation(&pending.id).await.unwrap().unwrap();
    assert_eq!(stored, done);
    assert_eq!(llm.total_calls(), 2);
}

// ============================================================================
// Record access
// ============================================================================

#[tokio::test]
async fn test_list_and_delete_through_pipeline() {
    let db = create_test_database().await.unwrap();
    let llm = ScriptedLlm::new();
    llm.push_analysis("First analysis.");
    llm.push_analysis("Second analysis.");
    llm.push_summary("Summary", "Medium");
    let pipeline = create_test_pipeline(&db, llm.clone(), GUARDED);

    let first = pipeline
        .generate_detailed_analysis("u1", "first")
        .await
        .unwrap();
    let second = pipeline
        .generate_detailed_analysis("u1", "second")
        .await
        .unwrap();
    pipeline
        .summarize_and_prioritize_analysis(&first.id)
        .await
        .unwrap();

    let all = pipeline.list_user_recommendations("u1", None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);

    let pending_only = pipeline
        .list_user_recommendations("u1", Some(RecommendationType::DetailedAnalysis))
        .await
        .unwrap();
    assert_eq!(pending_only.len(), 1);
    assert_eq!(pending_only[0].id, second.id);

    pipeline.delete_recommendation(&second.id).await.unwrap();
    let err = pipeline.get_recommendation(&second.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = pipeline.delete_recommendation(&second.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
