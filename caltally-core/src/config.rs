//! caltally configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RANGE_DAYS;
use crate::error::{CalTallyError, CalTallyResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/caltally";
static DEFAULT_LOG_LEVEL: &str = "warn";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_days() -> i64 {
    DEFAULT_RANGE_DAYS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Configuration at ~/.config/caltally/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalTallyConfig {
    /// Directory holding calendar exports (`calendars.json`, `events/`).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where goals are stored. Defaults to goals.toml next to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals_file: Option<PathBuf>,

    /// Days before today covered when no --from is given.
    #[serde(default = "default_days")]
    pub default_days: i64,

    /// Log filter used when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CalTallyConfig {
    fn default() -> Self {
        CalTallyConfig {
            data_dir: default_data_dir(),
            goals_file: None,
            default_days: default_days(),
            log_level: default_log_level(),
        }
    }
}

impl CalTallyConfig {
    pub fn config_dir() -> CalTallyResult<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| CalTallyError::Config("Could not determine config directory".into()))?
            .join("caltally"))
    }

    pub fn config_path() -> CalTallyResult<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> CalTallyResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalTallyResult<Self> {
        let config: CalTallyConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| CalTallyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalTallyError::Config(e.to_string()))?;

        if config.default_days < 0 {
            return Err(CalTallyError::Config(format!(
                "default_days must not be negative (got {})",
                config.default_days
            )));
        }

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn goals_path(&self) -> CalTallyResult<PathBuf> {
        match &self.goals_file {
            Some(path) => Ok(expand(path)),
            None => Ok(Self::config_dir()?.join("goals.toml")),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalTallyResult<()> {
        let contents = format!(
            "\
# caltally configuration

# Where calendar exports live (calendars.json and events/<calendar id>.json):
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Where goals are stored (defaults to goals.toml next to this file):
# goals_file = \"~/.config/caltally/goals.toml\"

# Days before today shown when no --from date is given:
# default_days = {DEFAULT_RANGE_DAYS}

# Log level (overridden by RUST_LOG):
# log_level = \"{DEFAULT_LOG_LEVEL}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalTallyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalTallyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
