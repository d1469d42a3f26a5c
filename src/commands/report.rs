use std::collections::HashSet;

use anyhow::Result;
use caltally_core::{Aggregation, Calendar, TimeRange};
use chrono::Local;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::{load_aggregation, range_label};
use crate::render::{Render, render_stat};
use crate::source::ExportDir;

#[derive(Serialize)]
struct ReportJson<'a> {
    from: String,
    to: String,
    total_hours: f64,
    #[serde(flatten)]
    aggregation: &'a Aggregation,
}

pub async fn run(
    source: &ExportDir,
    range: TimeRange<Local>,
    calendar_filter: Vec<String>,
    percent: bool,
    show_events: bool,
    json: bool,
) -> Result<()> {
    let (calendars, aggregation) = load_aggregation(source, &range).await?;

    let selection = resolve_selection(&calendars, calendar_filter)?;
    let aggregation = aggregation.select(&selection);
    let total_hours = aggregation.total_hours();

    if json {
        let report = ReportJson {
            from: range.start().to_rfc3339(),
            to: range.end().to_rfc3339(),
            total_hours,
            aggregation: &aggregation,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", range_label(&range).bold());

    if aggregation.calendar_stats.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:.1} hours across {} calendars",
            total_hours,
            aggregation.calendar_stats.len()
        )
        .dimmed()
    );
    println!();

    for stat in &aggregation.calendar_stats {
        println!("{}", render_stat(stat, total_hours, percent));
    }

    if show_events {
        println!();
        println!("{}", format!("Events ({})", aggregation.filtered_events.len()).bold());
        for event in &aggregation.filtered_events {
            println!("{}", event.render());
        }
    }

    Ok(())
}

/// Calendar ids passed with --calendar; every one must exist.
fn resolve_selection(calendars: &[Calendar], filter: Vec<String>) -> Result<HashSet<String>> {
    for id in &filter {
        if !calendars.iter().any(|c| &c.id == id) {
            let available: Vec<_> = calendars.iter().map(|c| c.id.as_str()).collect();
            anyhow::bail!(
                "Calendar '{}' not found. Available: {}",
                id,
                available.join(", ")
            );
        }
    }

    Ok(filter.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendars() -> Vec<Calendar> {
        vec![Calendar {
            id: "work@example.com".to_string(),
            name: "Work".to_string(),
            color_id: None,
        }]
    }

    #[test]
    fn test_resolve_selection_accepts_known_ids() {
        let selection = resolve_selection(&calendars(), vec!["work@example.com".to_string()]).unwrap();
        assert!(selection.contains("work@example.com"));

        assert!(resolve_selection(&calendars(), Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_selection_rejects_unknown_ids() {
        let err = resolve_selection(&calendars(), vec!["gym".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Available: work@example.com"));
    }
}
