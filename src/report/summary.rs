//! Daily summary aggregation.

use chrono::NaiveDate;

use super::models::{ClassifiedEvent, DailySummary, Direction};

/// Fold classified events into same-day scale-out / scale-in counters.
///
/// `today` is injected by the caller; the fold never reads the wall
/// clock. Events dated outside `today` (UTC calendar date) and events
/// with an unknown direction are not counted. The fold is commutative,
/// so input order does not matter.
pub fn aggregate(events: &[ClassifiedEvent], today: NaiveDate) -> DailySummary {
    let mut summary = DailySummary::empty(today);

    for classified in events {
        if classified.event.timestamp.date_naive() != today {
            continue;
        }

        match classified.direction {
            Direction::ScaleOut => summary.scale_out_count += 1,
            Direction::ScaleIn => summary.scale_in_count += 1,
            Direction::Unknown => {}
        }
    }

    summary
}
