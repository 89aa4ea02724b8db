//! Report model types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A single normalized scaling activity.
///
/// Produced by the normalizer from one raw feed record; immutable
/// thereafter. Text fields are never empty: absent values are replaced
/// with sentinels at normalization time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingEvent {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub cause: String,
    /// Open vocabulary; unknown values are preserved verbatim.
    pub status_code: String,
}

/// Direction of a scaling activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    ScaleOut,
    ScaleIn,
    Unknown,
}

/// Outcome bucket derived from the activity status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Success,
    Failed,
    InProgress,
    Other,
}

/// A scaling event together with its derived direction and outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedEvent {
    #[serde(flatten)]
    pub event: ScalingEvent,
    pub direction: Direction,
    pub outcome: Outcome,
}

/// Same-day counters for scale-out and scale-in activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Calendar day (UTC) the counters cover.
    pub date: NaiveDate,
    pub scale_out_count: u32,
    pub scale_in_count: u32,
}

impl DailySummary {
    /// A zeroed summary for the given day.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            scale_out_count: 0,
            scale_in_count: 0,
        }
    }
}

/// The complete report consumed by the presentation layer.
///
/// `events` keeps the upstream feed order; the report never reorders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub group_name: String,
    pub events: Vec<ClassifiedEvent>,
    pub summary: DailySummary,
}
