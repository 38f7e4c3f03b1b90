// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::feed_repository::PollFeedRepository;
use crate::application::preference_service::PreferenceService;
use crate::application::trend_service::TrendService;
use crate::infrastructure::config::{FeedSource, load_app_config, load_roster};
use crate::infrastructure::file_feed_repository::FileFeedRepository;
use crate::infrastructure::http_feed_repository::HttpFeedRepository;
use crate::infrastructure::json_preference_store::JsonPreferenceStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load config/poll_trends")?;
    let roster = load_roster(&config.roster).with_context(|| format!("Failed to load {}", config.roster))?;

    // Create repository (infrastructure layer)
    let feeds = &config.feeds;
    let repository: Arc<dyn PollFeedRepository> = match feeds.source {
        FeedSource::Http => Arc::new(HttpFeedRepository::new(
            feeds.location.clone(),
            feeds.records.clone(),
            feeds.payload.clone(),
        )),
        FeedSource::File => Arc::new(FileFeedRepository::new(
            &feeds.location,
            &feeds.records,
            &feeds.payload,
        )),
    };

    // Load both feeds before any chart state exists
    let trends = match TrendService::load(repository, &roster, &config.smoothing).await {
        Ok(service) => Ok(service),
        Err(e) if e.is_ingestion() => {
            tracing::error!("Chart construction aborted: {}", e);
            Err(e.to_string())
        }
        Err(e) => {
            tracing::error!("Chart settings rejected: {}", e);
            Err(e.to_string())
        }
    };

    let preferences = PreferenceService::new(Arc::new(JsonPreferenceStore::new(&config.preferences.path)));

    // Create application state
    let state = Arc::new(AppState { trends, preferences });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting poll-trends on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
