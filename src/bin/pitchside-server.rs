// ABOUTME: Server binary hosting the recommendation pipeline over HTTP
// ABOUTME: Loads configuration, opens the database, and serves the axum router until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pitchside Contributors

//! # Pitchside Server Binary
//!
//! Starts the HTTP API for the two-stage recommendation pipeline.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pitchside::{
    config::{DatabaseUrl, ServerConfig},
    database::Database,
    llm::HttpLlmClient,
    logging, routes,
    services::{PipelineOptions, RecommendationPipeline},
};
use tokio::signal;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser)]
#[command(name = "pitchside-server")]
#[command(about = "Pitchside - LLM-backed training recommendations")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = DatabaseUrl::parse_url(&database_url);
    }

    info!("{}", config.summary());

    if let DatabaseUrl::SQLite { path } = &config.database_url {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
    }

    let database = Database::new(&config.database_url.to_connection_string()).await?;

    let llm = HttpLlmClient::new(config.llm.clone())?;
    let pipeline = RecommendationPipeline::from_database(&database, Arc::new(llm))
        .with_options(PipelineOptions::from(config.recommendations));

    let app = routes::router(database, Arc::new(pipeline));

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .context("Invalid HOST/HTTP_PORT combination")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!("Listening on http://{addr}");
    info!("   Analysis:   POST http://{addr}/api/llm/basic-chat");
    info!("   Summarize:  POST http://{addr}/api/llm/summarize/{{id}}");
    info!("   Records:    GET  http://{addr}/api/recommendations/{{id}}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create database directory {}", dir.display()))
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received terminate signal, shutting down"),
    }
}
