//! Time-budget goals.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::error::{CalTallyError, CalTallyResult};

/// Cadence a goal's target hours refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    /// Unit name used in period labels ("2 weeks", "1 month").
    pub fn unit(&self, count: f64) -> &'static str {
        let singular = count == 1.0;
        match self {
            Timeframe::Daily if singular => "day",
            Timeframe::Daily => "days",
            Timeframe::Weekly if singular => "week",
            Timeframe::Weekly => "weeks",
            Timeframe::Monthly if singular => "month",
            Timeframe::Monthly => "months",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CalTallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "monthly" => Ok(Timeframe::Monthly),
            other => Err(CalTallyError::InvalidGoal(format!(
                "Unknown timeframe '{other}'. Expected daily, weekly or monthly"
            ))),
        }
    }
}

/// A target number of hours per timeframe for one calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub calendar_id: String,
    pub calendar_name: String,
    pub color_id: Option<String>,
    pub target_hours: f64,
    pub timeframe: Timeframe,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal for one of `calendars`, copying its name and color.
    pub fn new(
        calendar_id: &str,
        calendars: &[Calendar],
        target_hours: f64,
        timeframe: Timeframe,
        created_at: DateTime<Utc>,
    ) -> CalTallyResult<Self> {
        validate_target(target_hours)?;

        let calendar = calendars
            .iter()
            .find(|c| c.id == calendar_id)
            .ok_or_else(|| CalTallyError::CalendarNotFound(calendar_id.to_string()))?;

        Ok(Goal {
            id: Uuid::new_v4().to_string(),
            calendar_id: calendar.id.clone(),
            calendar_name: calendar.name.clone(),
            color_id: calendar.color_id.clone(),
            target_hours,
            timeframe,
            created_at,
        })
    }

    /// Check a goal read from storage.
    pub fn validate(&self) -> CalTallyResult<()> {
        if self.calendar_id.trim().is_empty() {
            return Err(CalTallyError::InvalidGoal(format!(
                "Goal '{}' has no calendar",
                self.id
            )));
        }
        validate_target(self.target_hours)
    }
}

fn validate_target(target_hours: f64) -> CalTallyResult<()> {
    if !target_hours.is_finite() || target_hours <= 0.0 {
        return Err(CalTallyError::InvalidGoal(format!(
            "Target hours must be a number greater than zero (got {target_hours})"
        )));
    }
    Ok(())
}
