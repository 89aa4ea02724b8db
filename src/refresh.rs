//! Refresh controller.
//!
//! Owns the dashboard's report state and drives fetch/build cycles,
//! guaranteeing at most one in-flight cycle at a time. Triggered by the
//! dashboard on load and on demand, and optionally by a periodic timer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::archive::ArchiveHandle;
use crate::feed::ActivitySource;
use crate::report::{self, ActivityReport};

/// Presentation state of the dashboard report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ReportState {
    Idle,
    Loading,
    Populated { report: ActivityReport },
    /// Successful refresh with no renderable events; carries the zeroed
    /// report so the dashboard can still show identity and counters.
    Empty { report: ActivityReport },
    Error { message: String },
}

/// Drives report generation and owns the presentation state.
pub struct RefreshController {
    group_name: String,
    source: Arc<dyn ActivitySource>,
    archive: ArchiveHandle,
    state: RwLock<ReportState>,
    last_refresh: RwLock<Option<DateTime<Utc>>>,
    in_flight: AtomicBool,
}

impl RefreshController {
    pub fn new(
        group_name: String,
        source: Arc<dyn ActivitySource>,
        archive: ArchiveHandle,
    ) -> Self {
        Self {
            group_name,
            source,
            archive,
            state: RwLock::new(ReportState::Idle),
            last_refresh: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> ReportState {
        self.state.read().await.clone()
    }

    /// When the last refresh cycle completed, if any.
    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().await
    }

    /// Run one fetch/build cycle and return the resulting state.
    ///
    /// A trigger arriving while a cycle is in flight is not duplicated:
    /// it returns the current snapshot immediately. On failure the prior
    /// report is discarded, not merged.
    pub async fn refresh(&self) -> ReportState {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return self.state().await;
        }

        *self.state.write().await = ReportState::Loading;

        let next = match self.source.fetch().await {
            Ok(raw_records) => {
                self.archive_records(&raw_records);

                let today = Utc::now().date_naive();
                let report = report::build(&self.group_name, &raw_records, today);

                tracing::info!(
                    "Refreshed {}: {} events, {} out / {} in today",
                    self.group_name,
                    report.events.len(),
                    report.summary.scale_out_count,
                    report.summary.scale_in_count
                );

                if report.events.is_empty() {
                    ReportState::Empty { report }
                } else {
                    ReportState::Populated { report }
                }
            }
            Err(e) => {
                tracing::error!("Refresh failed for {}: {}", self.group_name, e);
                ReportState::Error {
                    message: e.to_string(),
                }
            }
        };

        *self.state.write().await = next.clone();
        *self.last_refresh.write().await = Some(Utc::now());
        self.in_flight.store(false, Ordering::SeqCst);

        next
    }

    /// Forward the raw records to the archive sink, fire-and-forget.
    fn archive_records(&self, raw_records: &[crate::report::RawActivityRecord]) {
        if !self.archive.is_enabled() {
            return;
        }

        for raw in raw_records {
            if let Ok(payload) = serde_json::to_value(raw) {
                self.archive.record(payload);
            }
        }
    }

    /// Spawn the periodic refresh loop. An interval of zero disables it.
    pub fn start_periodic(self: &Arc<Self>, interval_secs: u64) {
        if interval_secs == 0 {
            return;
        }

        let controller = self.clone();

        tokio::spawn(async move {
            // Jitter the first tick to avoid synchronized fetches
            let jitter = rand::random::<u64>() % 1000;
            tokio::time::sleep(Duration::from_millis(jitter)).await;

            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                controller.refresh().await;
            }
        });
    }
}
