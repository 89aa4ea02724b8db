//! Event classification.
//!
//! Derives direction and outcome tags from a normalized event using
//! case-insensitive substring matching. The matching is a documented
//! heuristic: "launch" wins over "terminate" when both appear, and
//! outcome substrings are tested in the order success, fail, progress.

use super::models::{ClassifiedEvent, Direction, Outcome, ScalingEvent};

/// Classify one scaling event.
///
/// Total function: every event produces exactly one classification.
pub fn classify(event: ScalingEvent) -> ClassifiedEvent {
    let direction = classify_direction(&event.description, &event.cause);
    let outcome = classify_outcome(&event.status_code);

    ClassifiedEvent {
        event,
        direction,
        outcome,
    }
}

fn classify_direction(description: &str, cause: &str) -> Direction {
    let text = format!("{} {}", description, cause).to_lowercase();

    if text.contains("launch") {
        Direction::ScaleOut
    } else if text.contains("terminate") {
        Direction::ScaleIn
    } else {
        Direction::Unknown
    }
}

fn classify_outcome(status_code: &str) -> Outcome {
    let status = status_code.to_lowercase();

    if status.contains("success") {
        Outcome::Success
    } else if status.contains("fail") {
        Outcome::Failed
    } else if status.contains("progress") {
        Outcome::InProgress
    } else {
        Outcome::Other
    }
}
