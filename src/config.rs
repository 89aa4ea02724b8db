//! Configuration module for ScaleTrace.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Upstream fleet-management activity endpoint
    pub feed_url: String,
    /// Name of the monitored scaling group
    pub group_name: String,
    /// Region label shown on the dashboard
    pub region: String,
    /// Optional archive endpoint for raw events (archival off when unset)
    pub archive_url: Option<String>,
    /// Periodic refresh interval in seconds (0 = dashboard-driven only)
    pub refresh_interval: u64,
    /// Upstream fetch timeout in seconds
    pub fetch_timeout: f64,
    /// Maximum records requested per fetch
    pub max_records: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            feed_url: "http://localhost:9000/scaling-logs".to_string(),
            group_name: "dev-fleet".to_string(),
            region: "ap-south-1".to_string(),
            archive_url: None,
            refresh_interval: 0,
            fetch_timeout: 10.0,
            max_records: 10,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SCALETRACE_HTTP_PORT`: HTTP port (default: 8080)
    /// - `SCALETRACE_FEED_URL`: upstream activity endpoint
    /// - `SCALETRACE_GROUP_NAME`: monitored scaling group name
    /// - `SCALETRACE_REGION`: region label for the dashboard
    /// - `SCALETRACE_ARCHIVE_URL`: archive endpoint (unset = disabled)
    /// - `SCALETRACE_REFRESH_INTERVAL`: periodic refresh seconds (0 = off)
    /// - `SCALETRACE_FETCH_TIMEOUT`: upstream timeout seconds
    /// - `SCALETRACE_MAX_RECORDS`: records requested per fetch
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(port_str) = env::var("SCALETRACE_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Ok(feed_url) = env::var("SCALETRACE_FEED_URL") {
            cfg.feed_url = feed_url;
        }

        if let Ok(group_name) = env::var("SCALETRACE_GROUP_NAME") {
            cfg.group_name = group_name;
        }

        if let Ok(region) = env::var("SCALETRACE_REGION") {
            cfg.region = region;
        }

        if let Ok(archive_url) = env::var("SCALETRACE_ARCHIVE_URL") {
            if !archive_url.is_empty() {
                cfg.archive_url = Some(archive_url);
            }
        }

        if let Ok(interval_str) = env::var("SCALETRACE_REFRESH_INTERVAL") {
            if let Ok(interval) = interval_str.parse() {
                cfg.refresh_interval = interval;
            }
        }

        if let Ok(timeout_str) = env::var("SCALETRACE_FETCH_TIMEOUT") {
            if let Ok(timeout) = timeout_str.parse::<f64>() {
                if timeout > 0.0 {
                    cfg.fetch_timeout = timeout;
                }
            }
        }

        if let Ok(max_str) = env::var("SCALETRACE_MAX_RECORDS") {
            if let Ok(max) = max_str.parse::<u32>() {
                if max > 0 {
                    cfg.max_records = max;
                }
            }
        }

        cfg
    }
}
