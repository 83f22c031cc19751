//! Settings parser for the launchmon config file.
//!
//! Precedence, lowest to highest: built-in defaults, `config.toml` in the
//! platform config directory, the `LAUNCHMON_BASE_URL` environment
//! variable. A `--base-url` CLI flag on top of all of these is applied by
//! the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use launchmon_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "launchmon";

/// Supervisor URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default poll cadence in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// User-facing settings.
///
/// Missing keys fall back to defaults, so a partial config file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the supervisor's REST API.
    pub base_url: String,
    /// Seconds between log re-fetches; clamped to at least 1.
    pub poll_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Settings {
    /// Load settings from the platform config directory and apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        settings.apply_env();
        Ok(settings)
    }

    /// Load settings from a specific file; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but is not valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| Error::config(format!("{}: {e}", path.display())))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("LAUNCHMON_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
    }

    /// The poll cadence as a `Duration`, clamped to at least one second so
    /// a zero in the config file cannot spin the engine.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}
