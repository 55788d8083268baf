use crate::constants::{CONFIG_DIR, CONFIG_FILE, DEFAULT_TIMEOUT};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Per-user defaults read from `~/.apy/config.yaml`
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Profile {
    /// Load a profile; a missing file is an empty profile
    pub fn load(path: &Path) -> Result<Profile> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No profile, using defaults");
            return Ok(Profile::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read profile {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Profile::default());
        }
        let profile = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid profile {}", path.display()))?;
        Ok(profile)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Location of the profile under the home directory
pub fn default_profile_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Read a UTF-8 file and parse it as one JSON document
pub fn load_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let data = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    Ok(data)
}
