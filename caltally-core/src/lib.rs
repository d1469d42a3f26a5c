//! Core of caltally: turns calendar events into per-calendar time totals
//! and tracks them against time-budget goals.
//!
//! Pipeline for one query window:
//! - [`filter`] drops events that cannot be counted
//! - [`duration`] assigns each survivor its hours inside the window
//! - [`aggregate`] totals hours per calendar
//! - [`progress`] compares totals with prorated goals
//!
//! Everything in the pipeline is pure and synchronous; the caller fetches
//! events and supplies the current time.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod duration;
pub mod error;
pub mod event;
pub mod filter;
pub mod goal;
pub mod goal_store;
pub mod google;
pub mod progress;
pub mod time_range;

pub use aggregate::{Aggregation, CalendarStat, aggregate};
pub use calendar::Calendar;
pub use error::{CalTallyError, CalTallyResult};
pub use event::{EnrichedEvent, Event, Schedule};
pub use goal::{Goal, Timeframe};
pub use progress::{GoalProgress, GoalStatus, evaluate, evaluate_goals};
pub use time_range::TimeRange;
