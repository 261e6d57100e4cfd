// ABOUTME: Recommendation entity tracked through the analysis and summarization stages
// ABOUTME: Centralizes the PENDING_SUMMARY -> COMPLETED transition and priority label mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::analysis::PLACEHOLDER_TITLE;

/// Which stage last wrote the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    /// Written by the analysis stage
    DetailedAnalysis,
    /// Written by the summarization stage
    SummarizedAnalysis,
}

impl RecommendationType {
    /// Stored/wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DetailedAnalysis => "DETAILED_ANALYSIS",
            Self::SummarizedAnalysis => "SUMMARIZED_ANALYSIS",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DETAILED_ANALYSIS" => Ok(Self::DetailedAnalysis),
            "SUMMARIZED_ANALYSIS" => Ok(Self::SummarizedAnalysis),
            other => Err(format!("unknown recommendation type: {other}")),
        }
    }
}

/// Pipeline state of a record; only ever advances forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationStatus {
    /// Analysis stored, summary not yet produced
    PendingSummary,
    /// Summary and priority assigned
    Completed,
}

impl RecommendationStatus {
    /// Stored/wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingSummary => "PENDING_SUMMARY",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING_SUMMARY" => Ok(Self::PendingSummary),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(format!("unknown recommendation status: {other}")),
        }
    }
}

/// Human priority assigned by the summarizer, stored as 0/1/2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    /// 0
    Low,
    /// 1
    #[default]
    Medium,
    /// 2
    High,
}

impl Priority {
    /// Map an upstream priority label to a priority.
    ///
    /// Only the exact labels `Low`, `Medium` and `High` are recognized.
    /// Anything else (other casing, surrounding whitespace, empty) is Medium.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            _ => Self::Medium,
        }
    }

    /// Stored integer value
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.as_u8()
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(format!("priority out of range: {other}")),
        }
    }
}

/// A recommendation that has not been persisted yet (no id, no timestamps)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecommendation {
    /// Owner reference
    pub user_id: String,
    /// Stage that produced the record
    pub recommendation_type: RecommendationType,
    /// Heading
    pub title: String,
    /// Detailed analysis text
    pub description: String,
    /// The user's question
    pub original_query: String,
    /// Priority
    pub priority: Priority,
    /// Pipeline state
    pub status: RecommendationStatus,
}

impl NewRecommendation {
    /// Record produced by a successful analysis call, awaiting summarization
    #[must_use]
    pub fn pending(
        user_id: impl Into<String>,
        original_query: impl Into<String>,
        detailed_analysis: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            recommendation_type: RecommendationType::DetailedAnalysis,
            title: PLACEHOLDER_TITLE.to_owned(),
            description: detailed_analysis.into(),
            original_query: original_query.into(),
            priority: Priority::Medium,
            status: RecommendationStatus::PendingSummary,
        }
    }
}

/// Persisted recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Unique identifier assigned at creation
    pub id: String,
    /// Owner reference (not validated against a user store)
    pub user_id: String,
    /// Stage that last wrote the record
    pub recommendation_type: RecommendationType,
    /// Placeholder until summarized, then the LLM summary
    pub title: String,
    /// Detailed analysis from stage 1; never modified afterwards
    pub description: String,
    /// The user's question
    pub original_query: String,
    /// Priority, Medium until summarized
    pub priority: Priority,
    /// Pipeline state
    pub status: RecommendationStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Recommendation {
    /// Attach the identity assigned by the store to a new record
    #[must_use]
    pub fn from_new(new: NewRecommendation, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id,
            recommendation_type: new.recommendation_type,
            title: new.title,
            description: new.description,
            original_query: new.original_query,
            priority: new.priority,
            status: new.status,
            created_at,
            updated_at: created_at,
        }
    }

    /// Completed version of `existing` carrying the summarizer's output.
    ///
    /// `description`, `original_query`, `id`, `user_id` and `created_at` are
    /// carried over untouched.
    #[must_use]
    pub fn completed_from(existing: &Self, summary: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: summary.into(),
            priority,
            recommendation_type: RecommendationType::SummarizedAnalysis,
            status: RecommendationStatus::Completed,
            updated_at: Utc::now(),
            ..existing.clone()
        }
    }

    /// Both summarization prerequisites are populated
    #[must_use]
    pub fn is_ready_for_summary(&self) -> bool {
        !self.original_query.is_empty() && !self.description.is_empty()
    }
}
