//! ScaleTrace - fleet scaling-activity dashboard.
//!
//! Serves a browser dashboard reporting the scaling history of an
//! elastic compute group: recent events, their outcome, and same-day
//! scale-out / scale-in counters.

mod archive;
mod config;
mod feed;
mod refresh;
mod report;
mod web;

use archive::ArchiveSink;
use config::ServerConfig;
use feed::HttpActivityFeed;
use refresh::RefreshController;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("scaletrace=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting ScaleTrace on port {}...", cfg.http_port);
    tracing::info!("Watching scaling group {} via {}", cfg.group_name, cfg.feed_url);

    // Archive sink for raw events (no-op when unconfigured)
    let archive = ArchiveSink::spawn(cfg.archive_url.clone());
    if let Some(url) = &cfg.archive_url {
        tracing::info!("Archiving raw events to {}", url);
    }

    // Upstream feed client
    let feed = Arc::new(HttpActivityFeed::new(&cfg)?);

    // Refresh controller, with optional periodic trigger
    let controller = Arc::new(RefreshController::new(
        cfg.group_name.clone(),
        feed,
        archive,
    ));
    controller.start_periodic(cfg.refresh_interval);

    // Start web server
    let server = Server::new(cfg, controller);
    server.start().await?;

    Ok(())
}
