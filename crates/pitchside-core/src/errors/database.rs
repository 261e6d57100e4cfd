// ABOUTME: Structured error types for database operations
// ABOUTME: Returned by repository traits and converted into AppError at service boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

/// Errors raised by the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A query failed to execute or its rows could not be decoded
    #[error("Database query failed: {context}")]
    QueryError {
        /// What was being attempted
        context: String,
    },

    /// Row addressed by id does not exist
    #[error("{entity_type} {id} not found")]
    NotFound {
        /// Entity being addressed
        entity_type: &'static str,
        /// Identifier that was not found
        id: String,
    },
}
