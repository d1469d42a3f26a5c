//! Query window for aggregation and goal evaluation.

use chrono::{DateTime, Days, Duration, Local, NaiveDate, NaiveTime, TimeZone};

use crate::constants::{MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::error::{CalTallyError, CalTallyResult};

/// Half-open, day-aligned window `[start, end)`.
///
/// Calendar-day questions (is an event overnight, which day a range is
/// anchored to) are answered in the range's time zone.
#[derive(Debug, Clone)]
pub struct TimeRange<Tz: TimeZone = Local> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> TimeRange<Tz> {
    /// Arbitrary `[start, end)` window. Per-day attribution of overnight
    /// events assumes day-aligned bounds; prefer [`TimeRange::from_dates`].
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> CalTallyResult<Self> {
        if end < start {
            return Err(CalTallyError::InvalidRange(format!(
                "end {} is before start {}",
                end.naive_local(),
                start.naive_local()
            )));
        }

        Ok(TimeRange { start, end })
    }

    /// Range covering whole calendar days, from the start of `first_day`
    /// up to (not including) the start of the day after `last_day`.
    pub fn from_dates(tz: &Tz, first_day: NaiveDate, last_day: NaiveDate) -> CalTallyResult<Self> {
        if last_day < first_day {
            return Err(CalTallyError::InvalidRange(format!(
                "{last_day} is before {first_day}"
            )));
        }

        let after_last = last_day
            .succ_opt()
            .ok_or_else(|| CalTallyError::InvalidDate(format!("{last_day} is out of range")))?;

        Self::new(start_of_day(tz, first_day)?, start_of_day(tz, after_last)?)
    }

    /// One-day range anchored to `date`.
    pub fn day(tz: &Tz, date: NaiveDate) -> CalTallyResult<Self> {
        Self::from_dates(tz, date, date)
    }

    /// Build a range from CLI-style `YYYY-MM-DD` arguments.
    /// - `to` defaults to `today`
    /// - `from` defaults to `default_days` before `to`
    pub fn from_args(
        tz: &Tz,
        from: Option<&str>,
        to: Option<&str>,
        today: NaiveDate,
        default_days: i64,
    ) -> CalTallyResult<Self> {
        let last_day = match to {
            Some(s) => parse_date(s)?,
            None => today,
        };

        let first_day = match from {
            Some(s) => parse_date(s)?,
            None => u64::try_from(default_days)
                .ok()
                .and_then(|n| last_day.checked_sub_days(Days::new(n)))
                .ok_or_else(|| {
                    CalTallyError::InvalidRange(format!(
                        "cannot go back {default_days} days from {last_day}"
                    ))
                })?,
        };

        Self::from_dates(tz, first_day, last_day)
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn elapsed(&self) -> Duration {
        self.end.clone() - self.start.clone()
    }

    /// Elapsed span in fractional calendar days, measured on the local wall
    /// clock so a day-aligned week across a DST change is exactly 7 days.
    pub fn elapsed_days(&self) -> f64 {
        let wall = self.end.naive_local() - self.start.naive_local();
        wall.num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed().num_milliseconds() as f64 / MILLIS_PER_HOUR
    }

    /// Local date of the range start (the day the range is anchored to).
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Local date of the last instant inside the range, if any.
    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.is_empty() {
            return None;
        }
        Some((self.end.clone() - Duration::milliseconds(1)).date_naive())
    }

    /// Local dates covered by the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        match self.last_day() {
            Some(last) => self
                .first_day()
                .iter_days()
                .take_while(|d| *d <= last)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn covers_day(&self, date: NaiveDate) -> bool {
        match self.last_day() {
            Some(last) => date >= self.first_day() && date <= last,
            None => false,
        }
    }
}

/// Local midnight at the start of `date`.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> CalTallyResult<DateTime<Tz>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .ok_or_else(|| CalTallyError::InvalidDate(format!("{date} has no local midnight")))
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CalTallyResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        CalTallyError::InvalidDate(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}
