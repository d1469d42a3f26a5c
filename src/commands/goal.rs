use anyhow::{Context, Result};
use caltally_core::goal_store::GoalStore;
use caltally_core::{Goal, Timeframe};
use chrono::Utc;
use owo_colors::OwoColorize;

use crate::render::swatch;
use crate::source::ExportDir;

pub async fn add(
    source: &ExportDir,
    store: &GoalStore,
    calendar_id: &str,
    target_hours: f64,
    timeframe: Timeframe,
) -> Result<()> {
    let calendars = source
        .calendars()
        .await
        .context("Goals can only be set for calendars in the export directory")?;

    let goal = Goal::new(calendar_id, &calendars, target_hours, timeframe, Utc::now())?;
    store.add(goal.clone())?;

    println!(
        "{} Goal saved: {} {} hours {} ({})",
        "✓".green(),
        goal.calendar_name.bold(),
        goal.target_hours,
        goal.timeframe,
        goal.id.dimmed()
    );
    Ok(())
}

pub fn remove(store: &GoalStore, id: &str) -> Result<()> {
    let goal = store.remove(id)?;

    println!(
        "{} Removed {} goal for {}",
        "✓".green(),
        goal.timeframe,
        goal.calendar_name.bold()
    );
    Ok(())
}

pub fn list(store: &GoalStore) -> Result<()> {
    let goals = store.load()?;

    if goals.is_empty() {
        println!("{}", "No goals yet".dimmed());
        return Ok(());
    }

    for goal in &goals {
        println!(
            "{} {} {} {}",
            swatch(goal.color_id.as_deref()),
            goal.calendar_name.bold(),
            format!("{} h {}", goal.target_hours, goal.timeframe),
            goal.id.dimmed()
        );
    }
    Ok(())
}
