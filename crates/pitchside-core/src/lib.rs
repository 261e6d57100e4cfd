// ABOUTME: Core types and constants for the Pitchside recommendation backend
// ABOUTME: Foundation crate with error handling, domain models, and pipeline constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

#![deny(unsafe_code)]

//! # Pitchside Core
//!
//! Foundation crate providing shared types for the Pitchside recommendation
//! pipeline. The server crate depends on it for errors and models so that the
//! domain vocabulary lives in one place and changes rarely.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **models**: `Recommendation` lifecycle types and read-only `TrainingSession`
//! - **constants**: Prompt placeholders and per-stage LLM sampling parameters

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pipeline constants (placeholders, sampling parameters)
pub mod constants;

/// Core data models (Recommendation, TrainingSession, Priority)
pub mod models;
