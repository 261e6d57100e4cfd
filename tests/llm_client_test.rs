// ABOUTME: Integration tests for the HTTP LLM client against a stubbed service
// ABOUTME: Verifies wire shapes, response validation, and mapping of transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::time::Duration;

use pitchside::config::LlmServiceConfig;
use pitchside::errors::ErrorCode;
use pitchside::llm::{
    AnalysisRequest, ChatMessage, HttpLlmClient, RecommendationLlm, SummarizeRequest,
};
use pitchside::models::Priority;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpLlmClient {
    common::init_test_logging();
    let config = LlmServiceConfig::with_base_url(&server.uri()).unwrap();
    HttpLlmClient::new(config).unwrap()
}

fn analysis_request() -> AnalysisRequest {
    AnalysisRequest::new(vec![ChatMessage::user("How was my week?")])
}

#[tokio::test]
async fn test_analyze_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "messages": [{"role": "user", "content": "How was my week?"}],
            "temperature": 1.0,
            "max_tokens": 500
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"assistant_response": "Focus on recovery."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.analyze(&analysis_request()).await.unwrap();

    assert_eq!(response.assistant_response, "Focus on recovery.");
}

#[tokio::test]
async fn test_summarize_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/"))
        .and(body_json(json!({
            "original_query": "Evaluate sprint speed",
            "detailed_analysis": "Sprint speed is improving.",
            "temperature": 0.7,
            "max_tokens": 100
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"summary": "Improve sprints", "priority": "High"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .summarize(&SummarizeRequest::new(
            "Evaluate sprint speed",
            "Sprint speed is improving.",
        ))
        .await
        .unwrap();

    assert_eq!(response.summary, "Improve sprints");
    assert_eq!(response.mapped_priority(), Priority::High);
}

#[tokio::test]
async fn test_server_error_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.analyze(&analysis_request()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(
        err.message
            .starts_with("Failed to get response from Analysis LLM assistant"),
        "{}",
        err.message
    );
}

#[tokio::test]
async fn test_empty_and_null_bodies_are_no_response() {
    for body in ["", "null"] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/summarize/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .summarize(&SummarizeRequest::new("q", "a"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert_eq!(
            err.message,
            "Summarization LLM assistant provided no response."
        );
    }
}

#[tokio::test]
async fn test_incomplete_responses_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assistant_response": ""})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/summarize/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "Title"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let err = client.analyze(&analysis_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.message.contains("incomplete response"), "{}", err.message);

    let err = client
        .summarize(&SummarizeRequest::new("q", "a"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.message.contains("priority"), "{}", err.message);
}

#[tokio::test]
async fn test_request_timeout_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"assistant_response": "late"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    common::init_test_logging();
    let config = LlmServiceConfig::with_base_url(&server.uri())
        .unwrap()
        .with_request_timeout(Duration::from_millis(200));
    let client = HttpLlmClient::new(config).unwrap();

    let err = client.analyze(&analysis_request()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

#[tokio::test]
async fn test_unreachable_service_is_upstream_unavailable() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpLlmClient::new(LlmServiceConfig::with_base_url(&uri).unwrap()).unwrap();
    let err = client.analyze(&analysis_request()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}
