//! Terminal rendering for caltally-core types.
//!
//! Extension traits that add colored output to core types using owo_colors.

use caltally_core::{CalendarStat, EnrichedEvent, GoalProgress, GoalStatus, Schedule};
use chrono::Local;
use owo_colors::OwoColorize;

/// Calendars without a usable color get the provider's default blue.
const DEFAULT_COLOR: (u8, u8, u8) = (0x42, 0x85, 0xf4);

const BAR_WIDTH: usize = 20;

pub trait Render {
    fn render(&self) -> String;
}

/// A colored dot for a calendar color (`#rrggbb`), or the default blue.
pub fn swatch(color_id: Option<&str>) -> String {
    let (r, g, b) = color_id.and_then(parse_hex_color).unwrap_or(DEFAULT_COLOR);
    "●".truecolor(r, g, b).to_string()
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Human duration like "1 hour 30 minutes"; "N/A" when under half a minute.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round().max(0.0) as u64;
    let (whole_hours, minutes) = (total_minutes / 60, total_minutes % 60);

    let mut parts = Vec::new();
    if whole_hours > 0 {
        parts.push(format!("{} {}", whole_hours, pluralize("hour", whole_hours)));
    }
    if minutes > 0 {
        parts.push(format!("{} {}", minutes, pluralize("minute", minutes)));
    }

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(" ")
    }
}

fn pluralize(word: &str, count: u64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// One summary line for a calendar. `total_hours` is the sum over all shown
/// calendars; in percent mode the share replaces the hour figure.
pub fn render_stat(stat: &CalendarStat, total_hours: f64, percent: bool) -> String {
    let amount = if percent {
        format!("{:>5}%", stat.share_of(total_hours))
    } else {
        format!("{:>6.1} h", stat.rounded_hours)
    };

    let events = format!(
        "{} {}",
        stat.event_count,
        pluralize("event", stat.event_count as u64)
    );

    format!(
        "  {} {:<28} {}  {}",
        swatch(stat.color_id.as_deref()),
        stat.name,
        amount.bold(),
        events.dimmed()
    )
}

impl Render for EnrichedEvent {
    fn render(&self) -> String {
        let event = &self.event;

        let when = match &event.schedule {
            Some(Schedule::Timed { start, end }) => format!(
                "{} – {}",
                start.with_timezone(&Local).format("%a %b %-d %H:%M"),
                end.with_timezone(&Local).format("%H:%M")
            ),
            Some(Schedule::AllDay { start, .. }) => format!("{} all-day", start.format("%a %b %-d")),
            None => "N/A".to_string(),
        };

        let summary = if event.summary.is_empty() {
            "(no title)"
        } else {
            event.summary.as_str()
        };

        let mut line = format!(
            "  {} {}  {}  {}",
            swatch(event.color_id.as_deref()),
            when.dimmed(),
            summary,
            format_duration(self.duration_hours).bold()
        );

        if self.is_overnight {
            line.push_str(&format!(" {}", "(overnight)".dimmed()));
        }
        if let Some(location) = &event.location {
            line.push_str(&format!(" {}", format!("@ {location}").dimmed()));
        }
        line.push_str(&format!(" {}", format!("[{}]", event.calendar_name).dimmed()));

        line
    }
}

impl Render for GoalStatus {
    fn render(&self) -> String {
        match self {
            GoalStatus::Completed => self.as_str().green().to_string(),
            GoalStatus::OverAchieved => self.as_str().cyan().to_string(),
            GoalStatus::Behind => self.as_str().red().to_string(),
            GoalStatus::InProgress => self.as_str().yellow().to_string(),
        }
    }
}

impl Render for GoalProgress {
    fn render(&self) -> String {
        let goal = &self.goal;

        let header = format!(
            "{} {} {}",
            swatch(goal.color_id.as_deref()),
            goal.calendar_name.bold(),
            format!("{} h {} · {}", goal.target_hours, goal.timeframe, self.period_label).dimmed()
        );

        let difference = if self.difference >= 0.0 {
            format!("+{:.1} h", self.difference)
        } else {
            format!("{:.1} h", self.difference)
        };

        let detail = format!(
            "   {:.1} / {:.1} h  {} {:>3}%  {}  {}",
            self.actual_hours,
            self.target_hours_for_period,
            progress_bar(self.percentage),
            self.percentage,
            self.status.render(),
            difference.dimmed()
        );

        format!("{header}\n{detail}")
    }
}

fn progress_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled).dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1.5), "1 hour 30 minutes");
        assert_eq!(format_duration(2.0), "2 hours");
        assert_eq!(format_duration(0.25), "15 minutes");
        assert_eq!(format_duration(1.0 / 60.0), "1 minute");
        assert_eq!(format_duration(0.0), "N/A");
    }

    #[test]
    fn test_format_duration_carries_rounded_minutes() {
        assert_eq!(format_duration(1.9999), "2 hours");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#16a765"), Some((0x16, 0xa7, 0x65)));
        assert_eq!(parse_hex_color("9"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }

    #[test]
    fn test_progress_bar_width() {
        let cells = |bar: String| bar.chars().filter(|c| *c == '█' || *c == '░').count();
        let filled = |bar: String| bar.chars().filter(|c| *c == '█').count();

        assert_eq!(cells(progress_bar(0)), BAR_WIDTH);
        assert_eq!(cells(progress_bar(40)), BAR_WIDTH);
        assert_eq!(filled(progress_bar(40)), 8);
        assert_eq!(filled(progress_bar(100)), BAR_WIDTH);
    }
}
