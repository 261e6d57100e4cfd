// ABOUTME: Prompt construction for the analysis endpoint
// ABOUTME: Prepends the training digest as context, then the user's query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # Analysis Prompts
//!
//! The analysis endpoint receives a short conversation: an optional context
//! message carrying the training digest, followed by the user's question.

use pitchside_core::constants::digest::{CONTEXT_PREFIX, NO_TRAINING_DATA};

use super::ChatMessage;

/// Ordered messages for the analysis endpoint
///
/// The digest is included as a leading `user` message unless it is empty or
/// the no-data placeholder. The query is always the last message, unmodified.
#[must_use]
pub fn analysis_messages(digest: &str, query: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2);
    if !digest.is_empty() && digest != NO_TRAINING_DATA {
        messages.push(ChatMessage::user(format!("{CONTEXT_PREFIX}{digest}")));
    }
    messages.push(ChatMessage::user(query));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_placeholder_digest_is_not_sent() {
        let messages = analysis_messages(NO_TRAINING_DATA, "How was my week?");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "How was my week?");
    }

    #[test]
    fn test_digest_precedes_query() {
        let messages = analysis_messages("Session on 2025-03-01", "Evaluate sprint speed");
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0].content,
            "Here is a summary of my recent training data:\nSession on 2025-03-01"
        );
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].content, "Evaluate sprint speed");
    }
}
