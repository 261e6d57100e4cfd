// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, database, and LLM endpoint settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! Environment-based configuration management for production deployment

use anyhow::{bail, Context, Result};
use pitchside_core::constants::ports::DEFAULT_HTTP_PORT;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Environment variable names read by [`ServerConfig::from_env`]
pub mod env_keys {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Analysis endpoint URL
    pub const LLM_ANALYSIS_URL: &str = "LLM_ANALYSIS_URL";
    /// Summarize endpoint URL
    pub const LLM_SUMMARIZE_URL: &str = "LLM_SUMMARIZE_URL";
    /// Whole-request timeout for LLM calls
    pub const LLM_REQUEST_TIMEOUT_SECS: &str = "LLM_REQUEST_TIMEOUT_SECS";
    /// Connect timeout for LLM calls
    pub const LLM_CONNECT_TIMEOUT_SECS: &str = "LLM_CONNECT_TIMEOUT_SECS";
    /// Disable the summarize run-once guard
    pub const RECOMMENDATION_ALLOW_RESUMMARIZE: &str = "RECOMMENDATION_ALLOW_RESUMMARIZE";
}

/// Default analysis endpoint
pub const DEFAULT_ANALYSIS_URL: &str = "http://localhost:8001/api/chat/";
/// Default summarize endpoint
pub const DEFAULT_SUMMARIZE_URL: &str = "http://localhost:8001/api/summarize/";
/// Default whole-request timeout for LLM calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
/// Default connect timeout for LLM calls
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str.trim_start_matches("//")),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/pitchside.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Endpoints and timeouts of the external analysis/summarize service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmServiceConfig {
    /// Analysis endpoint (stage 1)
    pub analysis_url: Url,
    /// Summarize endpoint (stage 2)
    pub summarize_url: Url,
    /// Whole-request timeout; expiry surfaces as upstream unavailable
    pub request_timeout: Duration,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
}

impl LlmServiceConfig {
    /// Configuration pointing both endpoints under one base URL.
    ///
    /// The analysis endpoint is `{base}/api/chat/` and the summarize endpoint
    /// is `{base}/api/summarize/`, matching the service's own routing.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        Ok(Self {
            analysis_url: parse_endpoint("base URL", &format!("{base}/api/chat/"))?,
            summarize_url: parse_endpoint("base URL", &format!("{base}/api/summarize/"))?,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        })
    }

    /// Override the whole-request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load from environment variables, falling back to local defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a URL or timeout variable is set but invalid.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            analysis_url: parse_endpoint(
                env_keys::LLM_ANALYSIS_URL,
                &env_var_or(env_keys::LLM_ANALYSIS_URL, DEFAULT_ANALYSIS_URL),
            )?,
            summarize_url: parse_endpoint(
                env_keys::LLM_SUMMARIZE_URL,
                &env_var_or(env_keys::LLM_SUMMARIZE_URL, DEFAULT_SUMMARIZE_URL),
            )?,
            request_timeout: Duration::from_secs(parse_secs(
                env_keys::LLM_REQUEST_TIMEOUT_SECS,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            connect_timeout: Duration::from_secs(parse_secs(
                env_keys::LLM_CONNECT_TIMEOUT_SECS,
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
        })
    }
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            analysis_url: Url::parse(DEFAULT_ANALYSIS_URL)
                .unwrap_or_else(|_| unreachable!("default analysis URL is valid")),
            summarize_url: Url::parse(DEFAULT_SUMMARIZE_URL)
                .unwrap_or_else(|_| unreachable!("default summarize URL is valid")),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Behavior switches of the recommendation pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Allow summarizing a record that is already completed
    pub allow_resummarize: bool,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Database connection
    pub database_url: DatabaseUrl,
    /// External LLM service
    pub llm: LlmServiceConfig,
    /// Pipeline behavior
    pub recommendations: RecommendationConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is set to an unparseable value.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or(env_keys::HTTP_PORT, &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;

        let database_url = env::var(env_keys::DATABASE_URL)
            .map(|url| DatabaseUrl::parse_url(&url))
            .unwrap_or_default();

        let allow_resummarize = env_var_or(env_keys::RECOMMENDATION_ALLOW_RESUMMARIZE, "false")
            .parse()
            .context("Invalid RECOMMENDATION_ALLOW_RESUMMARIZE value")?;

        Ok(Self {
            http_port,
            host: env_var_or(env_keys::HOST, "127.0.0.1"),
            database_url,
            llm: LlmServiceConfig::from_env()?,
            recommendations: RecommendationConfig { allow_resummarize },
        })
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pitchside Server Configuration:\n\
             - HTTP: {}:{}\n\
             - Database: {}\n\
             - Analysis endpoint: {}\n\
             - Summarize endpoint: {}\n\
             - LLM request timeout: {}s\n\
             - Re-summarize completed records: {}",
            self.host,
            self.http_port,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.llm.analysis_url,
            self.llm.summarize_url,
            self.llm.request_timeout.as_secs(),
            if self.recommendations.allow_resummarize {
                "Allowed"
            } else {
                "Rejected"
            },
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_secs(key: &str, default: u64) -> Result<u64> {
    let secs: u64 = env_var_or(key, &default.to_string())
        .parse()
        .with_context(|| format!("Invalid {key} value"))?;
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(secs)
}

fn parse_endpoint(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid {key}: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("{key} must use http or https, got {}", url.scheme());
    }
    Ok(url)
}
