//! Google Calendar API wire types.
//!
//! Responses of the `calendarList` and `events` endpoints are deserialized
//! as-is, then converted into provider-neutral [`Calendar`] and [`Event`]
//! values. The API marks all-day events with `date` and timed events with
//! `dateTime`; the conversion turns that into a [`Schedule`].

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;

use crate::calendar::Calendar;
use crate::event::{Event, Schedule};

/// `GET /users/me/calendarList` response page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarList {
    #[serde(default)]
    pub items: Vec<GoogleCalendar>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCalendar {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub color_id: Option<String>,
    pub background_color: Option<String>,
}

/// `GET /calendars/{id}/events` response page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    pub location: Option<String>,
    pub start: Option<GoogleEventTime>,
    pub end: Option<GoogleEventTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date: Option<NaiveDate>,
    pub date_time: Option<DateTime<FixedOffset>>,
}

impl From<GoogleCalendar> for Calendar {
    fn from(calendar: GoogleCalendar) -> Self {
        Calendar {
            id: calendar.id,
            name: calendar.summary,
            color_id: calendar.color_id.or(calendar.background_color),
        }
    }
}

pub trait FromGoogle {
    fn from_google(event: GoogleEvent, calendar: &Calendar) -> Self;
}

impl FromGoogle for Event {
    fn from_google(event: GoogleEvent, calendar: &Calendar) -> Self {
        let schedule = google_schedule(event.start.as_ref(), event.end.as_ref());

        Event {
            id: event.id,
            calendar_id: calendar.id.clone(),
            calendar_name: calendar.name.clone(),
            color_id: calendar.color_id.clone(),
            summary: event.summary,
            location: event.location.filter(|l| !l.is_empty()),
            schedule,
        }
    }
}

/// Both ends must be of the same kind; anything else has no schedule.
fn google_schedule(
    start: Option<&GoogleEventTime>,
    end: Option<&GoogleEventTime>,
) -> Option<Schedule> {
    match (start?, end?) {
        (
            GoogleEventTime {
                date_time: Some(start),
                ..
            },
            GoogleEventTime {
                date_time: Some(end),
                ..
            },
        ) => Some(Schedule::Timed {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }),
        (
            GoogleEventTime {
                date: Some(start), ..
            },
            GoogleEventTime { date: Some(end), .. },
        ) => Some(Schedule::AllDay {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}
