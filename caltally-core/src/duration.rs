//! Contribution of a single event to a query window, in hours.
//!
//! Values are raw floating-point hours. Rounding for display happens in
//! [`crate::aggregate`] and the renderers, never here.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::constants::{ALL_DAY_EVENT_HOURS, MILLIS_PER_HOUR};
use crate::event::{Event, Schedule};
use crate::time_range::{TimeRange, start_of_day};

pub fn hours(delta: Duration) -> f64 {
    delta.num_milliseconds() as f64 / MILLIS_PER_HOUR
}

/// Hours `event` contributes to `range`.
///
/// - same-day timed events are clipped to the range
/// - overnight timed events spanning one night contribute the share that
///   falls on the day `range` is anchored to (its first day); events
///   spanning more than one night contribute nothing
/// - single-day all-day events count as a full 24 hours
pub fn duration_hours<Tz: TimeZone>(event: &Event, range: &TimeRange<Tz>) -> f64 {
    let Some(schedule) = &event.schedule else {
        return 0.0;
    };

    match schedule {
        Schedule::Timed { start, end } => {
            let tz = range.timezone();
            let local_start = start.with_timezone(&tz);
            let local_end = end.with_timezone(&tz);

            if local_start.date_naive() != local_end.date_naive() {
                overnight_share(local_start, local_end, range.first_day())
            } else {
                clipped_hours(start, end, range)
            }
        }
        Schedule::AllDay { .. } => match schedule.all_day_span() {
            Some(1) => ALL_DAY_EVENT_HOURS,
            _ => 0.0,
        },
    }
}

/// Hours `event` contributes across the whole of `range`.
///
/// Overnight events are evaluated once per day of theirs that lies inside
/// `range`, each time with a one-day range anchored to that day, and the
/// shares are summed. Everything else is evaluated once against `range`.
///
/// `range` is assumed to be day-aligned (as built by
/// [`TimeRange::from_dates`]); overnight shares are not clipped to it.
pub fn attributed_hours<Tz: TimeZone>(event: &Event, range: &TimeRange<Tz>) -> f64 {
    let tz = range.timezone();

    match event.schedule.as_ref().and_then(|s| s.local_days(&tz)) {
        Some((start_day, end_day)) if start_day != end_day => [start_day, end_day]
            .into_iter()
            .filter(|day| range.covers_day(*day))
            .filter_map(|day| TimeRange::day(&tz, day).ok())
            .map(|day_range| duration_hours(event, &day_range))
            .sum(),
        _ => duration_hours(event, range),
    }
}

fn overnight_share<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>, day: NaiveDate) -> f64 {
    let start_day = start.date_naive();
    let end_day = end.date_naive();

    // Multi-night events are not split.
    if (end_day - start_day).num_days() != 1 {
        return 0.0;
    }

    let Ok(midnight) = start_of_day(&start.timezone(), end_day) else {
        return 0.0;
    };

    if day == start_day {
        hours(midnight - start)
    } else if day == end_day {
        hours(end - midnight)
    } else {
        0.0
    }
}

fn clipped_hours<Tz: TimeZone>(
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
    range: &TimeRange<Tz>,
) -> f64 {
    let clipped_start = (*start).max(range.start().with_timezone(&Utc));
    let clipped_end = (*end).min(range.end().with_timezone(&Utc));

    if clipped_end <= clipped_start {
        return 0.0;
    }
    hours(clipped_end - clipped_start)
}
