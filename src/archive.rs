//! Durable event-log sink.
//!
//! Forwards raw feed records to an external archive endpoint, batched
//! into one stream per calendar day. Write-only and best-effort:
//! failures are logged and never surface on the report path.

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;

/// Handle used to enqueue payloads for archival.
#[derive(Clone)]
pub struct ArchiveHandle {
    tx: Option<mpsc::Sender<Value>>,
}

impl ArchiveHandle {
    /// A handle that drops everything (archival disabled).
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    /// Enqueue one payload. Never blocks; a full queue drops the payload.
    pub fn record(&self, payload: Value) {
        let Some(tx) = &self.tx else { return };

        if tx.try_send(payload).is_err() {
            tracing::warn!("Archive queue full, dropping payload");
        }
    }
}

/// Spawns the background archive writer.
pub struct ArchiveSink;

impl ArchiveSink {
    /// Spawn the writer task and return its handle.
    ///
    /// With no endpoint configured the returned handle is a no-op.
    pub fn spawn(endpoint: Option<String>) -> ArchiveHandle {
        let Some(endpoint) = endpoint else {
            return ArchiveHandle::disabled();
        };

        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(run_archive_writer(rx, endpoint));

        ArchiveHandle { tx: Some(tx) }
    }
}

/// Accumulate payloads and flush them on an interval.
async fn run_archive_writer(mut rx: mpsc::Receiver<Value>, endpoint: String) {
    let client = reqwest::Client::new();
    let mut buffer: Vec<Value> = Vec::with_capacity(32);
    let mut interval = tokio::time::interval(Duration::from_secs(2));

    loop {
        tokio::select! {
            payload = rx.recv() => {
                match payload {
                    Some(p) => {
                        buffer.push(p);
                        if buffer.len() >= 100 {
                            flush_batch(&client, &endpoint, &mut buffer).await;
                        }
                    }
                    None => {
                        // Channel closed, flush remaining and exit
                        flush_batch(&client, &endpoint, &mut buffer).await;
                        break;
                    }
                }
            }
            _ = interval.tick() => {
                flush_batch(&client, &endpoint, &mut buffer).await;
            }
        }
    }
}

async fn flush_batch(client: &reqwest::Client, endpoint: &str, buffer: &mut Vec<Value>) {
    if buffer.is_empty() {
        return;
    }

    let count = buffer.len();
    let batch = json!({
        "stream": stream_name(Utc::now().date_naive()),
        "events": std::mem::take(buffer),
    });

    match client.post(endpoint).json(&batch).send().await {
        Ok(resp) if !resp.status().is_success() => {
            tracing::warn!("Archive endpoint returned HTTP {}", resp.status());
        }
        Ok(_) => {
            tracing::debug!("Archived batch of {} events", count);
        }
        Err(e) => tracing::warn!("Failed to write archive batch: {}", e),
    }
}

/// Archive batches land in one stream per calendar day.
fn stream_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
