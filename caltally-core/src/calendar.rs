//! Calendar metadata shared by events, stats and goals.

use serde::{Deserialize, Serialize};

/// A named, colored container of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub color_id: Option<String>,
}
