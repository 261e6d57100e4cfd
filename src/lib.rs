// ABOUTME: Main library entry point for the Pitchside recommendation backend
// ABOUTME: Two-stage LLM pipeline turning training telemetry and questions into prioritized advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

#![deny(unsafe_code)]

//! # Pitchside
//!
//! Backend for LLM-generated training recommendations. A user's question and
//! a digest of their recent training sessions go to an external analysis
//! service; the result is stored as a pending recommendation. A second,
//! independently triggered call sends that analysis to a summarization
//! service which assigns a short title and a priority, completing the record.
//!
//! ## Architecture
//!
//! - **services**: the pipeline stages and the training digest
//! - **llm**: typed requests/responses and the HTTP client for the LLM service
//! - **database**: SQLite storage behind repository traits
//! - **routes**: thin axum handlers over the pipeline
//! - **config** / **logging**: environment-driven settings and tracing setup

/// Environment-driven server configuration
pub mod config;

/// SQLite persistence and repository traits
pub mod database;

/// LLM service contract and HTTP client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP routes
pub mod routes;

/// Pipeline services
pub mod services;

pub use pitchside_core::{constants, errors, models};
