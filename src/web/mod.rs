//! Web server module.

mod handlers;

pub use handlers::*;

use crate::config::ServerConfig;
use crate::refresh::RefreshController;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub controller: Arc<RefreshController>,
}

/// Web server for ScaleTrace.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(config: ServerConfig, controller: Arc<RefreshController>) -> Self {
        Self {
            state: AppState { config, controller },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Dashboard
            .route("/", get(handlers::handle_dashboard))
            // API endpoints
            .route("/api/report", get(handlers::handle_report))
            .route("/api/state", get(handlers::handle_state))
            // Pages
            .route("/status", get(handlers::handle_status))
            // Static assets
            .route("/static/{*path}", get(handlers::handle_static))
            .route("/favicon.ico", get(handlers::handle_favicon))
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
