use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::swatch;
use crate::source::ExportDir;

pub async fn run(source: &ExportDir) -> Result<()> {
    let calendars = source.calendars().await?;

    if calendars.is_empty() {
        println!("{}", "No calendars found".dimmed());
        return Ok(());
    }

    for calendar in &calendars {
        println!(
            "{} {} {}",
            swatch(calendar.color_id.as_deref()),
            calendar.name.bold(),
            calendar.id.dimmed()
        );
    }
    Ok(())
}
