use serde::Deserialize;
use std::{env, fs, path::PathBuf};
use thiserror::Error;

use crate::runner::RunConfig;

#[derive(Debug, Default, Deserialize)]
pub struct TaskpaneConfig {
    pub app: Option<AppConfig>,
    pub run: Option<RunSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and spinners.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunSection {
    /// Exclusive upper bound of the task index range.
    pub tasks: Option<usize>,
    pub max_sleep_ms: Option<u64>,
    pub slow_threshold_ms: Option<u64>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TaskpaneConfig {
    /// Config file location: `$TASKPANE_CONFIG` if set, otherwise
    /// `~/.taskpane/config.toml`.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = env::var("TASKPANE_CONFIG") {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".taskpane").join("config.toml"))
    }

    /// Load the config if one exists. A missing file is not an error.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(Some(config))
    }

    /// Batch parameters with config overrides applied over the defaults.
    #[must_use]
    pub fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        let Some(run) = self.run.as_ref() else {
            return defaults;
        };
        RunConfig {
            tasks: run.tasks.unwrap_or(defaults.tasks),
            max_sleep_ms: run.max_sleep_ms.unwrap_or(defaults.max_sleep_ms),
            slow_threshold_ms: run.slow_threshold_ms.unwrap_or(defaults.slow_threshold_ms),
        }
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.run.as_ref().and_then(|run| run.seed)
    }
}
