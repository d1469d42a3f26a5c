pub mod calendars;
pub mod goal;
pub mod goals;
pub mod report;

use anyhow::Result;
use caltally_core::{Aggregation, Calendar, TimeRange, aggregate};
use chrono::Local;

use crate::source::ExportDir;
use crate::utils::tui::loading_spinner;

/// Load every calendar's events for `range` and aggregate them.
async fn load_aggregation(
    source: &ExportDir,
    range: &TimeRange<Local>,
) -> Result<(Vec<Calendar>, Aggregation)> {
    let spinner = loading_spinner("calendars");
    let loaded = async {
        let calendars = source.calendars().await?;
        spinner.set_message(format!("Loading events from {} calendars", calendars.len()));
        let events = source.events(&calendars, range).await?;
        Ok::<_, anyhow::Error>((calendars, events))
    }
    .await;
    spinner.finish_and_clear();

    let (calendars, events) = loaded?;
    Ok((calendars, aggregate(&events, range)))
}

/// Label like "Mon Jan 1 – Sun Jan 7, 2024" for a day-aligned range.
fn range_label(range: &TimeRange<Local>) -> String {
    let first = range.first_day();
    match range.last_day() {
        Some(last) if last != first => format!(
            "{} – {}",
            first.format("%a %b %-d"),
            last.format("%a %b %-d, %Y")
        ),
        _ => first.format("%a %b %-d, %Y").to_string(),
    }
}
