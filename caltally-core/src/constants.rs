//! Shared constants.

/// Timed events longer than this are treated as placeholders and excluded.
pub const MAX_TIMED_EVENT_HOURS: f64 = 16.0;

/// Hours credited to a single-day all-day event.
pub const ALL_DAY_EVENT_HOURS: f64 = 24.0;

/// Number of days before today covered by the default query window.
pub const DEFAULT_RANGE_DAYS: i64 = 7;

pub(crate) const MILLIS_PER_HOUR: f64 = 3_600_000.0;
pub(crate) const MILLIS_PER_DAY: f64 = 86_400_000.0;
