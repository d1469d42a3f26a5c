//! Calendar exports on disk, in Google Calendar API JSON shape.
//!
//! ```text
//! <data_dir>/calendars.json          calendarList response
//! <data_dir>/events/<calendar>.json  events list response for one calendar
//! ```
//!
//! Calendars are read concurrently and joined before anything is returned;
//! one failing calendar fails the whole load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caltally_core::google::{CalendarList, EventList, FromGoogle};
use caltally_core::{Calendar, Event, TimeRange};
use chrono::TimeZone;
use tokio::task::JoinSet;
use tracing::debug;

pub struct ExportDir {
    root: PathBuf,
}

impl ExportDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ExportDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn calendars_path(&self) -> PathBuf {
        self.root.join("calendars.json")
    }

    fn events_path(&self, calendar_id: &str) -> PathBuf {
        self.root
            .join("events")
            .join(format!("{}.json", calendar_id.replace('/', "_")))
    }

    pub async fn calendars(&self) -> Result<Vec<Calendar>> {
        let path = self.calendars_path();
        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Could not read calendar list at {}", path.display()))?;

        let list: CalendarList = serde_json::from_str(&content)
            .with_context(|| format!("Invalid calendar list in {}", path.display()))?;

        Ok(list.items.into_iter().map(Calendar::from).collect())
    }

    /// Events of all `calendars` that intersect `range`, in calendar order.
    pub async fn events<Tz: TimeZone>(
        &self,
        calendars: &[Calendar],
        range: &TimeRange<Tz>,
    ) -> Result<Vec<Event>> {
        let mut tasks = JoinSet::new();

        for (index, calendar) in calendars.iter().cloned().enumerate() {
            let path = self.events_path(&calendar.id);
            tasks.spawn(async move {
                load_calendar_events(&path, &calendar)
                    .await
                    .map(|events| (index, events))
            });
        }

        let mut per_calendar: Vec<Vec<Event>> = vec![Vec::new(); calendars.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, events) = joined.context("Event loading task failed")??;
            per_calendar[index] = events;
        }

        Ok(per_calendar
            .into_iter()
            .flatten()
            .filter(|event| event.overlaps(range))
            .collect())
    }
}

async fn load_calendar_events(path: &Path, calendar: &Calendar) -> Result<Vec<Event>> {
    let exists = tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Could not check for events at {}", path.display()))?;
    if !exists {
        debug!(calendar_id = %calendar.id, "No event export for calendar");
        return Ok(Vec::new());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Could not read events at {}", path.display()))?;

    let list: EventList = serde_json::from_str(&content)
        .with_context(|| format!("Invalid events export in {}", path.display()))?;

    debug!(calendar_id = %calendar.id, count = list.items.len(), "Loaded events");

    Ok(list
        .items
        .into_iter()
        .map(|event| Event::from_google(event, calendar))
        .collect())
}
