use anyhow::Result;
use caltally_core::goal_store::GoalStore;
use caltally_core::{GoalProgress, TimeRange, evaluate_goals};
use chrono::{Local, Utc};
use owo_colors::OwoColorize;

use super::{load_aggregation, range_label};
use crate::render::Render;
use crate::source::ExportDir;

pub async fn run(
    source: &ExportDir,
    store: &GoalStore,
    range: TimeRange<Local>,
    json: bool,
) -> Result<()> {
    let goals = store.load()?;

    if goals.is_empty() && !json {
        println!("{}", "No goals yet".dimmed());
        println!(
            "{}",
            "Add one with: caltally goal add <calendar-id> <hours> --timeframe weekly".dimmed()
        );
        return Ok(());
    }

    let (_, aggregation) = load_aggregation(source, &range).await?;
    let progress: Vec<GoalProgress> =
        evaluate_goals(&goals, &aggregation.calendar_stats, &range, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
        return Ok(());
    }

    println!("{}", range_label(&range).bold());
    println!();

    for (i, item) in progress.iter().enumerate() {
        println!("{}", item.render());
        if i < progress.len() - 1 {
            println!();
        }
    }

    Ok(())
}
