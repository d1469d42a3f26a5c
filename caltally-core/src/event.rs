//! Provider-neutral event types.
//!
//! Providers convert their API responses into these types; the filter,
//! duration and aggregation stages work exclusively with them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::time_range::TimeRange;

/// A calendar event (read-only input to aggregation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub calendar_name: String,
    pub color_id: Option<String>,
    pub summary: String,
    pub location: Option<String>,
    /// `None` when the provider sent no usable start/end pair.
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// `end` is exclusive, per provider convention.
    AllDay { start: NaiveDate, end: NaiveDate },
}

impl Schedule {
    /// Number of calendar days an all-day schedule covers.
    pub fn all_day_span(&self) -> Option<i64> {
        match self {
            Schedule::AllDay { start, end } => {
                let adjusted_end = end.pred_opt()?;
                Some((adjusted_end - *start).num_days() + 1)
            }
            Schedule::Timed { .. } => None,
        }
    }

    /// Local start and end dates of a timed schedule.
    pub fn local_days<Tz: TimeZone>(&self, tz: &Tz) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Schedule::Timed { start, end } => Some((
                start.with_timezone(tz).date_naive(),
                end.with_timezone(tz).date_naive(),
            )),
            Schedule::AllDay { .. } => None,
        }
    }
}

impl Event {
    /// A timed event whose start and end fall on different local days.
    pub fn is_overnight<Tz: TimeZone>(&self, tz: &Tz) -> bool {
        self.schedule
            .as_ref()
            .and_then(|s| s.local_days(tz))
            .is_some_and(|(start_day, end_day)| start_day != end_day)
    }

    /// Whether the event intersects `range`, using the same rule as the
    /// provider's `timeMin`/`timeMax` query. Events without a schedule are
    /// kept so the filter stage can account for them.
    pub fn overlaps<Tz: TimeZone>(&self, range: &TimeRange<Tz>) -> bool {
        match &self.schedule {
            Some(Schedule::Timed { start, end }) => start < range.end() && end > range.start(),
            Some(Schedule::AllDay { start, end }) => match range.last_day() {
                Some(last_day) => *start <= last_day && *end > range.first_day(),
                None => false,
            },
            None => true,
        }
    }
}

/// An event that survived filtering, with its contribution to the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub duration_hours: f64,
    pub is_overnight: bool,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn timed(calendar_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        event(calendar_id, Some(Schedule::Timed { start, end }))
    }

    pub fn all_day(calendar_id: &str, start: NaiveDate, end: NaiveDate) -> Event {
        event(calendar_id, Some(Schedule::AllDay { start, end }))
    }

    pub fn event(calendar_id: &str, schedule: Option<Schedule>) -> Event {
        Event {
            id: format!("{calendar_id}-event"),
            calendar_id: calendar_id.to_string(),
            calendar_name: format!("{calendar_id} calendar"),
            color_id: Some("7".to_string()),
            summary: "Test Event".to_string(),
            location: None,
            schedule,
        }
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_all_day_span_treats_end_as_exclusive() {
        let single = all_day("work", date(2024, 1, 1), date(2024, 1, 2));
        let triple = all_day("work", date(2024, 1, 1), date(2024, 1, 4));

        assert_eq!(single.schedule.unwrap().all_day_span(), Some(1));
        assert_eq!(triple.schedule.unwrap().all_day_span(), Some(3));
    }

    #[test]
    fn test_overnight_depends_on_local_day() {
        let event = timed("work", at(2024, 1, 1, 22, 0), at(2024, 1, 2, 2, 0));
        assert!(event.is_overnight(&Utc));

        // 22:00-02:00 UTC is 00:00-04:00 at UTC+2, a single local day.
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert!(!event.is_overnight(&east));
    }

    #[test]
    fn test_all_day_events_are_never_overnight() {
        let event = all_day("work", date(2024, 1, 1), date(2024, 1, 2));
        assert!(!event.is_overnight(&Utc));
    }

    #[test]
    fn test_overlaps_uses_half_open_window() {
        let range = TimeRange::from_dates(&Utc, date(2024, 1, 2), date(2024, 1, 2)).unwrap();

        let before = timed("work", at(2024, 1, 1, 22, 0), at(2024, 1, 2, 0, 0));
        let across = timed("work", at(2024, 1, 1, 22, 0), at(2024, 1, 2, 1, 0));
        let after = timed("work", at(2024, 1, 3, 0, 0), at(2024, 1, 3, 1, 0));
        let same_day = all_day("work", date(2024, 1, 2), date(2024, 1, 3));
        let previous_day = all_day("work", date(2024, 1, 1), date(2024, 1, 2));

        assert!(!before.overlaps(&range));
        assert!(across.overlaps(&range));
        assert!(!after.overlaps(&range));
        assert!(same_day.overlaps(&range));
        assert!(!previous_day.overlaps(&range));
        assert!(event("work", None).overlaps(&range));
    }
}
