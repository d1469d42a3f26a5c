//! Error types for caltally.

use thiserror::Error;

/// Errors that can occur in caltally operations.
///
/// Aggregation and goal evaluation never produce these; bad events are
/// excluded and degenerate ranges evaluate to zero.
#[derive(Error, Debug)]
pub enum CalTallyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Goal not found: {0}")]
    GoalNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for caltally operations.
pub type CalTallyResult<T> = Result<T, CalTallyError>;
