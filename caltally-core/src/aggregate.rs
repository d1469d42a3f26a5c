//! Per-calendar totals over a query window.

use std::collections::{HashMap, HashSet};

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::duration::attributed_hours;
use crate::event::{EnrichedEvent, Event};
use crate::filter::exclusion;
use crate::time_range::TimeRange;

/// Summary of one calendar's surviving events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarStat {
    pub id: String,
    pub name: String,
    pub color_id: Option<String>,
    pub total_hours: f64,
    /// `total_hours` rounded to one decimal place, for display.
    pub rounded_hours: f64,
    pub event_count: usize,
}

impl CalendarStat {
    /// Rounded percentage of `total_hours` this calendar accounts for.
    pub fn share_of(&self, total_hours: f64) -> u8 {
        if total_hours <= 0.0 {
            return 0;
        }
        (self.total_hours / total_hours * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Result of aggregating one query window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub filtered_events: Vec<EnrichedEvent>,
    pub calendar_stats: Vec<CalendarStat>,
}

impl Aggregation {
    pub fn total_hours(&self) -> f64 {
        self.calendar_stats.iter().map(|s| s.total_hours).sum()
    }

    pub fn stat(&self, calendar_id: &str) -> Option<&CalendarStat> {
        self.calendar_stats.iter().find(|s| s.id == calendar_id)
    }

    /// Keep only the given calendars. An empty selection keeps everything.
    pub fn select(&self, calendar_ids: &HashSet<String>) -> Aggregation {
        if calendar_ids.is_empty() {
            return self.clone();
        }

        Aggregation {
            filtered_events: self
                .filtered_events
                .iter()
                .filter(|e| calendar_ids.contains(&e.event.calendar_id))
                .cloned()
                .collect(),
            calendar_stats: self
                .calendar_stats
                .iter()
                .filter(|s| calendar_ids.contains(&s.id))
                .cloned()
                .collect(),
        }
    }
}

/// Filter `events`, attribute each survivor's hours to `range`, and total
/// them per calendar.
pub fn aggregate<Tz: TimeZone>(events: &[Event], range: &TimeRange<Tz>) -> Aggregation {
    let tz = range.timezone();
    let mut excluded = 0usize;

    let filtered_events: Vec<EnrichedEvent> = events
        .iter()
        .filter(|event| match exclusion(event) {
            Some(reason) => {
                debug!(event_id = %event.id, calendar_id = %event.calendar_id, %reason, "Excluding event");
                excluded += 1;
                false
            }
            None => true,
        })
        .map(|event| EnrichedEvent {
            duration_hours: attributed_hours(event, range),
            is_overnight: event.is_overnight(&tz),
            event: event.clone(),
        })
        .collect();

    let calendar_stats = calendar_stats(&filtered_events);

    debug!(
        received = events.len(),
        kept = filtered_events.len(),
        excluded,
        calendars = calendar_stats.len(),
        "Aggregated events"
    );

    Aggregation {
        filtered_events,
        calendar_stats,
    }
}

/// Group enriched events by calendar, sorted by total hours (most first).
///
/// Name and color come from the first event seen for each calendar.
/// Calendars with equal totals keep the order they were first seen in.
pub fn calendar_stats(events: &[EnrichedEvent]) -> Vec<CalendarStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<CalendarStat> = Vec::new();

    for enriched in events {
        let event = &enriched.event;
        let slot = *index.entry(event.calendar_id.as_str()).or_insert_with(|| {
            stats.push(CalendarStat {
                id: event.calendar_id.clone(),
                name: event.calendar_name.clone(),
                color_id: event.color_id.clone(),
                total_hours: 0.0,
                rounded_hours: 0.0,
                event_count: 0,
            });
            stats.len() - 1
        });

        stats[slot].total_hours += enriched.duration_hours;
        stats[slot].event_count += 1;
    }

    for stat in &mut stats {
        stat.rounded_hours = round_to_tenth(stat.total_hours);
    }

    // Stable sort keeps first-encounter order for ties.
    stats.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
    stats
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
