//! Report assembly.

use chrono::NaiveDate;

use super::classify::classify;
use super::models::ActivityReport;
use super::normalize::{normalize, RawActivityRecord};
use super::summary::aggregate;

/// Build a complete activity report from a batch of raw records.
///
/// Records without a parseable timestamp are dropped; the report is
/// built from the surviving subset in feed order. Per-record failures
/// never fail the batch, and an empty batch yields an empty report
/// with zero counters.
pub fn build(
    group_name: &str,
    raw_records: &[RawActivityRecord],
    today: NaiveDate,
) -> ActivityReport {
    let mut events = Vec::with_capacity(raw_records.len());
    let mut dropped = 0usize;

    for raw in raw_records {
        match normalize(raw) {
            Ok(event) => events.push(classify(event)),
            Err(e) => {
                dropped += 1;
                tracing::debug!("Dropping malformed record: {}", e);
            }
        }
    }

    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} records while building report for {}",
            dropped,
            raw_records.len(),
            group_name
        );
    }

    let summary = aggregate(&events, today);

    ActivityReport {
        group_name: group_name.to_string(),
        events,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::{DailySummary, Direction, Outcome};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(time: &str, description: &str, status: &str) -> RawActivityRecord {
        RawActivityRecord {
            start_time: Some(json!(time)),
            description: Some(description.to_string()),
            cause: None,
            status_code: Some(status.to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_empty_input_yields_zero_report() {
        let report = build("dev-fleet", &[], today());

        assert_eq!(report.group_name, "dev-fleet");
        assert!(report.events.is_empty());
        assert_eq!(report.summary, DailySummary::empty(today()));
    }

    #[test]
    fn test_launch_today_counts_as_scale_out() {
        let records = vec![record(
            "2024-06-15T10:00:00Z",
            "Launching a new instance",
            "Successful",
        )];

        let report = build("dev-fleet", &records, today());

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].direction, Direction::ScaleOut);
        assert_eq!(report.events[0].outcome, Outcome::Success);
        assert_eq!(report.summary.scale_out_count, 1);
        assert_eq!(report.summary.scale_in_count, 0);
    }

    #[test]
    fn test_yesterday_classified_but_not_counted() {
        let records = vec![record(
            "2024-06-14T23:59:59Z",
            "Terminating instance due to policy",
            "Failed",
        )];

        let report = build("dev-fleet", &records, today());

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].direction, Direction::ScaleIn);
        assert_eq!(report.events[0].outcome, Outcome::Failed);
        assert_eq!(report.summary, DailySummary::empty(today()));
    }

    #[test]
    fn test_malformed_records_dropped_from_events_and_counts() {
        let records = vec![
            record("2024-06-15T10:00:00Z", "Launching a new instance", "Successful"),
            record("???", "Launching another instance", "Successful"),
            RawActivityRecord::default(),
        ];

        let report = build("dev-fleet", &records, today());

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.summary.scale_out_count, 1);
    }

    #[test]
    fn test_feed_order_preserved() {
        let records = vec![
            record("2024-06-15T12:00:00Z", "Terminating instance", "Successful"),
            record("2024-06-15T09:00:00Z", "Launching a new instance", "Successful"),
            record("2024-06-15T15:00:00Z", "Launching a new instance", "InProgress"),
        ];

        let report = build("dev-fleet", &records, today());

        let directions: Vec<Direction> = report.events.iter().map(|e| e.direction).collect();
        assert_eq!(
            directions,
            vec![Direction::ScaleIn, Direction::ScaleOut, Direction::ScaleOut]
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = vec![
            record("2024-06-15T10:00:00Z", "Launching a new instance", "Successful"),
            record("2024-06-14T10:00:00Z", "Terminating instance", "Failed"),
            record("bad timestamp", "Launching", "Successful"),
        ];

        let first = build("dev-fleet", &records, today());
        let second = build("dev-fleet", &records, today());

        assert_eq!(first, second);
    }
}
