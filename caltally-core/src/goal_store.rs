//! Goal persistence in a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalTallyError, CalTallyResult};
use crate::goal::Goal;

#[derive(Debug, Default, Serialize, Deserialize)]
struct GoalFile {
    #[serde(default, rename = "goal")]
    goals: Vec<Goal>,
}

/// Goals stored as `[[goal]]` tables in a single TOML file.
#[derive(Debug, Clone)]
pub struct GoalStore {
    path: PathBuf,
}

impl GoalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        GoalStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored goals. A missing file means no goals yet.
    pub fn load(&self) -> CalTallyResult<Vec<Goal>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: GoalFile = toml::from_str(&content).map_err(|e| {
            CalTallyError::Config(format!("Could not parse {}: {e}", self.path.display()))
        })?;

        for goal in &file.goals {
            goal.validate()?;
        }

        debug!(path = %self.path.display(), count = file.goals.len(), "Loaded goals");
        Ok(file.goals)
    }

    pub fn save(&self, goals: &[Goal]) -> CalTallyResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = GoalFile {
            goals: goals.to_vec(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| CalTallyError::Config(e.to_string()))?;

        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn add(&self, goal: Goal) -> CalTallyResult<()> {
        goal.validate()?;

        let mut goals = self.load()?;
        goals.push(goal);
        self.save(&goals)
    }

    /// Remove a goal by id, returning it.
    pub fn remove(&self, id: &str) -> CalTallyResult<Goal> {
        let mut goals = self.load()?;

        let index = goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| CalTallyError::GoalNotFound(id.to_string()))?;
        let removed = goals.remove(index);

        self.save(&goals)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::Timeframe;
    use crate::goal::fixtures::goal;

    fn store() -> (tempfile::TempDir, GoalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = GoalStore::new(dir.path().join("nested/goals.toml"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_has_no_goals() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_add_then_load() {
        let (_dir, store) = store();
        let work = goal("work", 5.0, Timeframe::Weekly);
        let gym = goal("gym", 1.5, Timeframe::Daily);

        store.add(work.clone()).unwrap();
        store.add(gym.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![work, gym]);
    }

    #[test]
    fn test_remove_by_id() {
        let (_dir, store) = store();
        store.add(goal("work", 5.0, Timeframe::Weekly)).unwrap();
        store.add(goal("gym", 1.0, Timeframe::Monthly)).unwrap();

        let removed = store.remove("work-goal").unwrap();
        assert_eq!(removed.calendar_id, "work");

        let remaining = store.load().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].calendar_id, "gym");

        assert!(matches!(
            store.remove("work-goal"),
            Err(CalTallyError::GoalNotFound(_))
        ));
    }

    #[test]
    fn test_add_rejects_invalid_goal() {
        let (_dir, store) = store();
        let result = store.add(goal("work", 0.0, Timeframe::Weekly));

        assert!(matches!(result, Err(CalTallyError::InvalidGoal(_))));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_rejects_invalid_stored_goal() {
        let (_dir, store) = store();
        store.save(&[goal("work", 5.0, Timeframe::Weekly)]).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        std::fs::write(store.path(), content.replace("target_hours = 5.0", "target_hours = -2.0"))
            .unwrap();

        assert!(store.load().is_err());
    }
}
