mod commands;
mod logging;
mod render;
mod source;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use caltally_core::config::CalTallyConfig;
use caltally_core::goal_store::GoalStore;
use caltally_core::{TimeRange, Timeframe};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::source::ExportDir;

#[derive(Parser)]
#[command(name = "caltally")]
#[command(about = "See where your calendar time goes and track it against goals")]
struct Cli {
    /// Directory with calendar exports (overrides data_dir in config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hours per calendar over a date range
    Report {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,

        /// Only include this calendar (by id); repeatable
        #[arg(short, long = "calendar")]
        calendars: Vec<String>,

        /// Show each calendar's share of the total instead of hours
        #[arg(long)]
        percent: bool,

        /// List the counted events
        #[arg(long)]
        events: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Progress of every goal over a date range
    Goals {
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD), defaults to today
        #[arg(long)]
        to: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
    /// List calendars in the export directory
    Calendars,
}

#[derive(Subcommand)]
enum GoalAction {
    /// Set a target number of hours for a calendar
    Add {
        calendar_id: String,

        /// Target hours per timeframe
        hours: f64,

        /// daily, weekly or monthly
        #[arg(short, long, default_value_t = Timeframe::Weekly)]
        timeframe: Timeframe,
    },
    /// Delete a goal by id
    Remove { id: String },
    /// Show stored goals
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CalTallyConfig::load()?;
    logging::init(&config.log_level);

    let source = ExportDir::new(cli.data_dir.unwrap_or_else(|| config.data_path()));
    tracing::debug!(data_dir = %source.root().display(), "Using export directory");

    match cli.command {
        Commands::Report {
            from,
            to,
            calendars,
            percent,
            events,
            json,
        } => {
            let range = resolve_range(&config, from.as_deref(), to.as_deref())?;
            commands::report::run(&source, range, calendars, percent, events, json).await
        }
        Commands::Goals { from, to, json } => {
            let range = resolve_range(&config, from.as_deref(), to.as_deref())?;
            let store = GoalStore::new(config.goals_path()?);
            commands::goals::run(&source, &store, range, json).await
        }
        Commands::Goal { action } => {
            let store = GoalStore::new(config.goals_path()?);
            match action {
                GoalAction::Add {
                    calendar_id,
                    hours,
                    timeframe,
                } => commands::goal::add(&source, &store, &calendar_id, hours, timeframe).await,
                GoalAction::Remove { id } => commands::goal::remove(&store, &id),
                GoalAction::List => commands::goal::list(&store),
            }
        }
        Commands::Calendars => commands::calendars::run(&source).await,
    }
}

fn resolve_range(
    config: &CalTallyConfig,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<TimeRange<Local>> {
    let today = Local::now().date_naive();
    Ok(TimeRange::from_args(
        &Local,
        from,
        to,
        today,
        config.default_days,
    )?)
}
