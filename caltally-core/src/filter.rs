//! Decides which events take part in aggregation.

use std::fmt;

use crate::constants::MAX_TIMED_EVENT_HOURS;
use crate::duration::hours;
use crate::event::{Event, Schedule};

/// Why an event was left out of aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// Missing start or end, or an end that does not follow the start.
    Malformed,
    /// All-day event covering more than one day.
    MultiDay { days: i64 },
    /// Timed event longer than [`MAX_TIMED_EVENT_HOURS`].
    TooLong { hours: f64 },
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Malformed => write!(f, "no usable start/end"),
            Exclusion::MultiDay { days } => write!(f, "all-day event spans {days} days"),
            Exclusion::TooLong { hours } => write!(f, "timed event lasts {hours:.1} hours"),
        }
    }
}

/// Returns the reason `event` is excluded, or `None` if it is eligible.
///
/// Rules are checked in order: malformed, multi-day all-day, over-long timed.
pub fn exclusion(event: &Event) -> Option<Exclusion> {
    let Some(schedule) = &event.schedule else {
        return Some(Exclusion::Malformed);
    };

    match schedule {
        Schedule::AllDay { start, end } => {
            if end <= start {
                return Some(Exclusion::Malformed);
            }
            let days = schedule.all_day_span()?;
            (days > 1).then_some(Exclusion::MultiDay { days })
        }
        Schedule::Timed { start, end } => {
            if end < start {
                return Some(Exclusion::Malformed);
            }
            let length = hours(*end - *start);
            (length > MAX_TIMED_EVENT_HOURS).then_some(Exclusion::TooLong { hours: length })
        }
    }
}

pub fn should_exclude(event: &Event) -> bool {
    exclusion(event).is_some()
}
