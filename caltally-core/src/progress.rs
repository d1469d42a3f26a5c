//! Goal progress over a query window.
//!
//! A goal's target is prorated to the number of timeframe units the window
//! covers, then compared with the hours its calendar actually logged.

use std::fmt;

use chrono::{DateTime, Datelike, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{CalendarStat, round_to_tenth};
use crate::goal::{Goal, Timeframe};
use crate::time_range::TimeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    InProgress,
    Completed,
    OverAchieved,
    Behind,
}

impl GoalStatus {
    /// Status from the uncapped actual/target ratio.
    ///
    /// `Behind` only applies once the window has ended.
    pub fn from_ratio(ratio: f64, period_ended: bool) -> Self {
        if ratio >= 2.0 {
            GoalStatus::OverAchieved
        } else if ratio >= 1.0 {
            GoalStatus::Completed
        } else if ratio < 0.5 && period_ended {
            GoalStatus::Behind
        } else {
            GoalStatus::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Completed => "completed",
            GoalStatus::OverAchieved => "over-achieved",
            GoalStatus::Behind => "behind",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A goal evaluated against one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub actual_hours: f64,
    pub target_hours_for_period: f64,
    /// Share of the prorated target reached, capped at 100.
    pub percentage: u8,
    pub status: GoalStatus,
    pub period_label: String,
    /// `actual_hours - target_hours_for_period`; positive means over target.
    pub difference: f64,
}

/// Fractional number of `timeframe` units `range` covers.
pub fn elapsed_units<Tz: TimeZone>(timeframe: Timeframe, range: &TimeRange<Tz>) -> f64 {
    match timeframe {
        Timeframe::Daily => range.elapsed_days(),
        Timeframe::Weekly => range.elapsed_days() / 7.0,
        Timeframe::Monthly => month_fraction(range.start(), range.end()),
    }
}

/// Calendar-aware months between two instants.
///
/// Whole months are stepped from `start` (clamping to month ends); the
/// remainder is divided by the length of the following month step.
fn month_fraction<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> f64 {
    let start = start.naive_local();
    let end = end.naive_local();
    if end <= start {
        return 0.0;
    }

    let step = |n: u32| start.checked_add_months(Months::new(n));

    let mut whole = ((end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32)
        .max(0) as u32;
    while whole > 0 && step(whole).is_none_or(|anchor| anchor > end) {
        whole -= 1;
    }

    let (Some(anchor), Some(next)) = (step(whole), step(whole + 1)) else {
        return whole as f64;
    };

    let remainder = (end - anchor).num_milliseconds() as f64;
    let month_length = (next - anchor).num_milliseconds() as f64;
    whole as f64 + remainder / month_length
}

/// Evaluate `goal` against the stat of its calendar (if it logged any
/// events) over `range`. `now` decides whether the window has ended.
pub fn evaluate<Tz: TimeZone>(
    goal: &Goal,
    stat: Option<&CalendarStat>,
    range: &TimeRange<Tz>,
    now: DateTime<Utc>,
) -> GoalProgress {
    let units = elapsed_units(goal.timeframe, range);
    let target_hours_for_period = goal.target_hours * units;
    let actual_hours = stat.map_or(0.0, |s| s.total_hours);

    let ratio = if target_hours_for_period > 0.0 {
        actual_hours / target_hours_for_period
    } else {
        0.0
    };
    let percentage = (ratio.min(1.0) * 100.0).round() as u8;
    let period_ended = now > *range.end();

    let label_units = round_to_tenth(units);

    GoalProgress {
        goal: goal.clone(),
        actual_hours,
        target_hours_for_period,
        percentage,
        status: GoalStatus::from_ratio(ratio, period_ended),
        period_label: format!("{} {}", label_units, goal.timeframe.unit(label_units)),
        difference: actual_hours - target_hours_for_period,
    }
}

/// Evaluate every goal against the stats of one aggregation.
pub fn evaluate_goals<Tz: TimeZone>(
    goals: &[Goal],
    stats: &[CalendarStat],
    range: &TimeRange<Tz>,
    now: DateTime<Utc>,
) -> Vec<GoalProgress> {
    goals
        .iter()
        .map(|goal| {
            let stat = stats.iter().find(|s| s.id == goal.calendar_id);
            evaluate(goal, stat, range, now)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::fixtures::{at, date};
    use crate::goal::fixtures::goal;

    fn two_weeks() -> TimeRange<Utc> {
        TimeRange::from_dates(&Utc, date(2024, 1, 1), date(2024, 1, 14)).unwrap()
    }

    fn stat(calendar_id: &str, total_hours: f64) -> CalendarStat {
        CalendarStat {
            id: calendar_id.to_string(),
            name: calendar_id.to_string(),
            color_id: None,
            total_hours,
            rounded_hours: round_to_tenth(total_hours),
            event_count: 1,
        }
    }

    #[test]
    fn test_weekly_goal_over_two_weeks() {
        let goal = goal("work", 5.0, Timeframe::Weekly);
        let stat = stat("work", 4.0);

        let during = evaluate(&goal, Some(&stat), &two_weeks(), at(2024, 1, 10, 12, 0));
        assert_eq!(during.target_hours_for_period, 10.0);
        assert_eq!(during.percentage, 40);
        assert_eq!(during.status, GoalStatus::InProgress);
        assert_eq!(during.difference, -6.0);
        assert_eq!(during.period_label, "2 weeks");

        let after = evaluate(&goal, Some(&stat), &two_weeks(), at(2024, 2, 1, 0, 0));
        assert_eq!(after.status, GoalStatus::Behind);
    }

    #[test]
    fn test_weekly_goal_ignores_dst_shift() {
        let tz = chrono_tz::America::New_York;
        let range = TimeRange::from_dates(&tz, date(2024, 3, 4), date(2024, 3, 10)).unwrap();
        let goal = goal("work", 5.0, Timeframe::Weekly);

        let progress = evaluate(&goal, Some(&stat("work", 5.0)), &range, at(2024, 3, 20, 0, 0));
        assert_eq!(progress.target_hours_for_period, 5.0);
        assert_eq!(progress.period_label, "1 week");
        assert_eq!(progress.status, GoalStatus::Completed);
        assert_eq!(elapsed_units(Timeframe::Daily, &range), 7.0);
    }

    #[test]
    fn test_daily_goal_prorates_by_days() {
        let goal = goal("work", 2.0, Timeframe::Daily);
        let progress = evaluate(&goal, Some(&stat("work", 28.0)), &two_weeks(), at(2024, 1, 20, 0, 0));

        assert_eq!(progress.target_hours_for_period, 28.0);
        assert_eq!(progress.percentage, 100);
        assert_eq!(progress.status, GoalStatus::Completed);
        assert_eq!(progress.period_label, "14 days");
    }

    #[test]
    fn test_monthly_goal_uses_calendar_months() {
        let goal = goal("work", 31.0, Timeframe::Monthly);

        let january = TimeRange::from_dates(&Utc, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let progress = evaluate(&goal, None, &january, at(2024, 1, 2, 0, 0));
        assert_eq!(progress.target_hours_for_period, 31.0);
        assert_eq!(progress.period_label, "1 month");

        let progress = evaluate(&goal, None, &two_weeks(), at(2024, 1, 2, 0, 0));
        assert!((progress.target_hours_for_period - 14.0).abs() < 1e-9);
        assert_eq!(progress.period_label, "0.5 months");
    }

    #[test]
    fn test_month_fraction_across_month_ends() {
        let range = TimeRange::from_dates(&Utc, date(2024, 1, 1), date(2024, 3, 15)).unwrap();
        let months = elapsed_units(Timeframe::Monthly, &range);
        assert!((months - (2.0 + 15.0 / 31.0)).abs() < 1e-9);

        let range = TimeRange::from_dates(&Utc, date(2024, 1, 15), date(2024, 2, 9)).unwrap();
        let months = elapsed_units(Timeframe::Monthly, &range);
        assert!((months - 26.0 / 31.0).abs() < 1e-9);
    }

    #[test]
    fn test_over_achieved_at_double_target() {
        let goal = goal("work", 5.0, Timeframe::Weekly);
        let progress = evaluate(&goal, Some(&stat("work", 20.0)), &two_weeks(), at(2024, 1, 2, 0, 0));

        assert_eq!(progress.percentage, 100);
        assert_eq!(progress.status, GoalStatus::OverAchieved);
        assert_eq!(progress.difference, 10.0);
    }

    #[test]
    fn test_missing_stat_counts_as_zero_hours() {
        let goal = goal("work", 5.0, Timeframe::Weekly);
        let progress = evaluate(&goal, None, &two_weeks(), at(2024, 1, 2, 0, 0));

        assert_eq!(progress.actual_hours, 0.0);
        assert_eq!(progress.percentage, 0);
        assert_eq!(progress.status, GoalStatus::InProgress);
    }

    #[test]
    fn test_zero_length_range_yields_zero_percent() {
        let instant = at(2024, 1, 1, 0, 0);
        let range = TimeRange::new(instant, instant).unwrap();
        let goal = goal("work", 5.0, Timeframe::Weekly);

        let progress = evaluate(&goal, Some(&stat("work", 3.0)), &range, at(2024, 1, 2, 0, 0));
        assert_eq!(progress.target_hours_for_period, 0.0);
        assert_eq!(progress.percentage, 0);
        assert_eq!(progress.period_label, "0 weeks");
    }

    #[test]
    fn test_percentage_is_monotonic_and_capped() {
        let goal = goal("work", 5.0, Timeframe::Weekly);
        let now = at(2024, 1, 2, 0, 0);

        let mut previous = 0;
        for tenths in 0..=300 {
            let actual = tenths as f64 / 10.0;
            let progress = evaluate(&goal, Some(&stat("work", actual)), &two_weeks(), now);
            assert!(progress.percentage >= previous);
            assert!(progress.percentage <= 100);
            previous = progress.percentage;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(GoalStatus::from_ratio(2.0, false), GoalStatus::OverAchieved);
        assert_eq!(GoalStatus::from_ratio(1.0, true), GoalStatus::Completed);
        assert_eq!(GoalStatus::from_ratio(0.49, true), GoalStatus::Behind);
        assert_eq!(GoalStatus::from_ratio(0.49, false), GoalStatus::InProgress);
        assert_eq!(GoalStatus::from_ratio(0.5, true), GoalStatus::InProgress);
    }

    #[test]
    fn test_evaluate_goals_matches_by_calendar_id() {
        let goals = vec![goal("work", 5.0, Timeframe::Weekly), goal("gym", 1.0, Timeframe::Daily)];
        let stats = vec![stat("gym", 7.0), stat("work", 10.0)];

        let progress = evaluate_goals(&goals, &stats, &two_weeks(), at(2024, 1, 2, 0, 0));

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[0].actual_hours, 10.0);
        assert_eq!(progress[0].percentage, 100);
        assert_eq!(progress[1].actual_hours, 7.0);
        assert_eq!(progress[1].percentage, 50);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&GoalStatus::OverAchieved).unwrap();
        assert_eq!(json, "\"over-achieved\"");
    }
}
