//! HTTP request handlers.

use super::AppState;
use crate::refresh::ReportState;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use rust_embed::RustEmbed;

// ============================================================================
// Templates (simple string replacement)
// ============================================================================

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");
const STATUS_TEMPLATE: &str = include_str!("templates/status.html");
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

// ============================================================================
// Dashboard
// ============================================================================

pub async fn handle_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let content = DASHBOARD_TEMPLATE
        .replace("{{group_name}}", &state.config.group_name)
        .replace("{{region}}", &state.config.region);

    let page = LAYOUT_TEMPLATE
        .replace("{{title}}", "ScaleTrace Dashboard")
        .replace("{{content}}", &content);

    Html(page)
}

// ============================================================================
// API: Report
// ============================================================================

/// Trigger a refresh cycle and return the resulting state.
///
/// While a cycle is already in flight this returns the current snapshot
/// instead of starting a second fetch.
pub async fn handle_report(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.refresh().await)
}

/// Return the current state without triggering a refresh.
pub async fn handle_state(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.state().await)
}

// ============================================================================
// Pages
// ============================================================================

pub async fn handle_status(State(state): State<AppState>) -> impl IntoResponse {
    let report_state = state.controller.state().await;
    let last_refresh = state
        .controller
        .last_refresh()
        .await
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    let (state_name, event_count) = match &report_state {
        ReportState::Idle => ("idle", 0),
        ReportState::Loading => ("loading", 0),
        ReportState::Populated { report } => ("populated", report.events.len()),
        ReportState::Empty { .. } => ("empty", 0),
        ReportState::Error { .. } => ("error", 0),
    };

    let archive = if state.config.archive_url.is_some() {
        "enabled"
    } else {
        "disabled"
    };

    let content = STATUS_TEMPLATE
        .replace("{{group_name}}", &state.config.group_name)
        .replace("{{region}}", &state.config.region)
        .replace("{{feed_url}}", &state.config.feed_url)
        .replace("{{state}}", state_name)
        .replace("{{last_refresh}}", &last_refresh)
        .replace("{{event_count}}", &event_count.to_string())
        .replace("{{archive}}", archive);

    let page = LAYOUT_TEMPLATE
        .replace("{{title}}", "ScaleTrace Status")
        .replace("{{content}}", &content);

    Html(page)
}

// ============================================================================
// Static Assets
// ============================================================================

#[derive(RustEmbed)]
#[folder = "src/web/static/"]
struct StaticAssets;

pub async fn handle_static(Path(path): Path<String>) -> impl IntoResponse {
    match StaticAssets::get(&path) {
        Some(file) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [(axum::http::header::CONTENT_TYPE, mime.to_string())],
                file.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

pub async fn handle_favicon() -> impl IntoResponse {
    // Return a simple SVG favicon
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <circle cx="50" cy="50" r="45" fill="#1f6feb"/>
        <path d="M35 65 L35 40 M35 40 L27 48 M35 40 L43 48" stroke="white" stroke-width="5" fill="none"/>
        <path d="M65 35 L65 60 M65 60 L57 52 M65 60 L73 52" stroke="white" stroke-width="5" fill="none"/>
    </svg>"##;

    (
        [(axum::http::header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
}
