use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Durations and loop intervals, read once at startup. A missing settings
/// file means defaults; an unparsable one is ignored rather than fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserSettings {
    pub work_minutes: f64,
    pub break_minutes: f64,
    pub poll_interval_secs: u64,
    pub renotify_interval_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25.0,
            break_minutes: 5.0,
            poll_interval_secs: 20,
            renotify_interval_secs: 2,
        }
    }
}

impl UserSettings {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        Ok(serde_json::from_str(&contents).unwrap_or_default())
    }

    /// Platform settings path, when the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sandwichtimer").join("settings.json"))
    }
}
