//! Upstream fleet-management feed client.
//!
//! Fetches raw scaling-activity records over HTTP and adapts the two
//! payload shapes the feed is known to emit into one record list.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::report::RawActivityRecord;

/// Feed error types.
///
/// Both variants are report-level failures: no partial report is built
/// from a failed fetch.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("upstream feed unavailable: {0}")]
    Unavailable(String),
    #[error("malformed feed payload: {0}")]
    MalformedPayload(String),
}

/// A source of raw scaling-activity records.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawActivityRecord>, SourceError>;
}

/// HTTP client for the fleet-management activity endpoint.
pub struct HttpActivityFeed {
    client: reqwest::Client,
    url: String,
    group_name: String,
    max_records: u32,
}

impl HttpActivityFeed {
    pub fn new(cfg: &ServerConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(cfg.fetch_timeout))
            .build()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            url: cfg.feed_url.clone(),
            group_name: cfg.group_name.clone(),
            max_records: cfg.max_records,
        })
    }
}

#[async_trait]
impl ActivitySource for HttpActivityFeed {
    async fn fetch(&self) -> Result<Vec<RawActivityRecord>, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("group", self.group_name.clone()),
                ("max", self.max_records.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Unavailable(format!("HTTP {} from feed", status)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SourceError::MalformedPayload(e.to_string()))?;

        parse_payload(payload)
    }
}

/// Interpret the top-level feed payload as a sequence of records.
///
/// Accepts a bare JSON array, or an object carrying the list under an
/// `Activities` / `activities` key. Elements that fail to deserialize
/// degrade to empty records and are rejected per record downstream
/// rather than failing the whole payload.
pub fn parse_payload(payload: Value) -> Result<Vec<RawActivityRecord>, SourceError> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => map
            .remove("Activities")
            .or_else(|| map.remove("activities"))
            .and_then(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                SourceError::MalformedPayload("no activity list in response object".to_string())
            })?,
        other => {
            return Err(SourceError::MalformedPayload(format!(
                "expected a record list, got {}",
                json_kind(&other)
            )))
        }
    };

    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
