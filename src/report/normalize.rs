//! Record normalization.
//!
//! Converts one raw feed record into a canonical [`ScalingEvent`].
//! Records without a parseable timestamp are rejected individually;
//! missing text fields are substituted with sentinels so downstream
//! classification always has a string to match against.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::models::ScalingEvent;

/// Sentinel for absent free-text fields.
pub const MISSING_TEXT: &str = "N/A";
/// Sentinel for an absent status code.
pub const MISSING_STATUS: &str = "Unknown";

/// One activity record as delivered by the upstream feed.
///
/// Field names cover both payload shapes the feed is known to emit:
/// the fleet API's PascalCase records and the legacy dashboard rows.
/// Every field is optional; normalization decides what is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawActivityRecord {
    #[serde(default, alias = "StartTime", alias = "startTime", alias = "time")]
    pub start_time: Option<Value>,
    #[serde(default, alias = "Description", alias = "description")]
    pub description: Option<String>,
    #[serde(default, alias = "Cause", alias = "cause")]
    pub cause: Option<String>,
    #[serde(default, alias = "StatusCode", alias = "statusCode", alias = "status")]
    pub status_code: Option<String>,
}

/// A record that cannot be normalized into a [`ScalingEvent`].
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record has no parseable timestamp (got {found:?})")]
pub struct MalformedRecord {
    pub found: Option<Value>,
}

/// Normalize one raw record.
pub fn normalize(raw: &RawActivityRecord) -> Result<ScalingEvent, MalformedRecord> {
    let timestamp = raw
        .start_time
        .as_ref()
        .and_then(parse_timestamp)
        .ok_or_else(|| MalformedRecord {
            found: raw.start_time.clone(),
        })?;

    Ok(ScalingEvent {
        timestamp,
        description: text_or_sentinel(raw.description.as_deref(), MISSING_TEXT),
        cause: text_or_sentinel(raw.cause.as_deref(), MISSING_TEXT),
        status_code: text_or_sentinel(raw.status_code.as_deref(), MISSING_STATUS),
    })
}

fn text_or_sentinel(value: Option<&str>, sentinel: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => sentinel.to_string(),
    }
}

/// Parse any of the absolute-time representations the feed may use.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(parse_epoch),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive "2024-01-01 12:00:00" timestamps are taken as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    // Some emitters send epoch values as strings
    s.parse::<i64>().ok().and_then(parse_epoch)
}

/// Epoch values of 13+ digits are taken as milliseconds.
fn parse_epoch(ts: i64) -> Option<DateTime<Utc>> {
    const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

    if ts.abs() >= MILLIS_THRESHOLD {
        Utc.timestamp_millis_opt(ts).single()
    } else {
        Utc.timestamp_opt(ts, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record_with_time(time: Value) -> RawActivityRecord {
        RawActivityRecord {
            start_time: Some(time),
            description: Some("Launching a new instance".to_string()),
            cause: Some("policy triggered".to_string()),
            status_code: Some("Successful".to_string()),
        }
    }

    #[test]
    fn test_normalize_rfc3339() {
        let event = normalize(&record_with_time(json!("2024-01-01T12:34:56Z"))).unwrap();
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 56).unwrap()
        );
        assert_eq!(event.description, "Launching a new instance");
        assert_eq!(event.status_code, "Successful");
    }

    #[test]
    fn test_normalize_rfc3339_with_offset() {
        // +05:30 offset normalizes back to UTC
        let event = normalize(&record_with_time(json!("2024-01-01T18:04:56+05:30"))).unwrap();
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 56).unwrap()
        );
    }

    #[test]
    fn test_normalize_naive_datetime() {
        let event = normalize(&record_with_time(json!("2024-01-01 12:34:56"))).unwrap();
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 56).unwrap()
        );
    }

    #[test]
    fn test_normalize_epoch_seconds() {
        let event = normalize(&record_with_time(json!(1_704_112_496))).unwrap();
        assert_eq!(event.timestamp.timestamp(), 1_704_112_496);
    }

    #[test]
    fn test_normalize_epoch_millis() {
        let event = normalize(&record_with_time(json!(1_704_112_496_000_i64))).unwrap();
        assert_eq!(event.timestamp.timestamp(), 1_704_112_496);
    }

    #[test]
    fn test_normalize_epoch_string() {
        let event = normalize(&record_with_time(json!("1704112496"))).unwrap();
        assert_eq!(event.timestamp.timestamp(), 1_704_112_496);
    }

    #[test]
    fn test_normalize_rejects_garbage_timestamp() {
        let err = normalize(&record_with_time(json!("not a time"))).unwrap_err();
        assert_eq!(err.found, Some(json!("not a time")));

        assert!(normalize(&record_with_time(json!(true))).is_err());
        assert!(normalize(&record_with_time(json!({"nested": 1}))).is_err());
    }

    #[test]
    fn test_normalize_rejects_missing_timestamp() {
        let raw = RawActivityRecord::default();
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.found, None);
    }

    #[test]
    fn test_sentinels_for_missing_fields() {
        let raw = RawActivityRecord {
            start_time: Some(json!("2024-01-01T00:00:00Z")),
            description: None,
            cause: Some("   ".to_string()),
            status_code: None,
        };

        let event = normalize(&raw).unwrap();
        assert_eq!(event.description, MISSING_TEXT);
        assert_eq!(event.cause, MISSING_TEXT);
        assert_eq!(event.status_code, MISSING_STATUS);
    }

    #[test]
    fn test_deserialize_fleet_api_shape() {
        let raw: RawActivityRecord = serde_json::from_value(json!({
            "ActivityId": "abc-123",
            "StartTime": "2024-01-01T00:00:00Z",
            "Description": "Launching a new EC2 instance",
            "Cause": "a scaling policy was triggered",
            "StatusCode": "InProgress",
            "Progress": 30
        }))
        .unwrap();

        assert_eq!(raw.description.as_deref(), Some("Launching a new EC2 instance"));
        assert_eq!(raw.status_code.as_deref(), Some("InProgress"));
    }

    #[test]
    fn test_deserialize_legacy_dashboard_shape() {
        let raw: RawActivityRecord = serde_json::from_value(json!({
            "time": "2024-01-01T00:00:00Z",
            "description": "Terminating instance",
            "cause": "scale-in policy",
            "status": "Successful"
        }))
        .unwrap();

        assert!(raw.start_time.is_some());
        assert_eq!(raw.status_code.as_deref(), Some("Successful"));
    }
}
