// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server, database, and LLM endpoint configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! Configuration module for the Pitchside server
//!
//! All settings come from environment variables with local-development
//! defaults; see [`environment::env_keys`] for the full list.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, LlmServiceConfig, RecommendationConfig, ServerConfig};
