use crate::core::dirs::{get_cache_directory, get_config_directory};
use crate::core::error::{Result, StatusBarError};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";
const CACHE_FILE: &str = "cache.db";
const LOG_FILE: &str = "git-status-bar.log";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How long a cached snapshot is reused without probing
    pub snapshot_ttl_secs: u64,
    /// Minimum time between two remote syncs of the same repository
    pub remote_update_interval_secs: u64,
    /// Print a loading line before probing on a cache miss
    pub print_loading: bool,
    pub cache_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_ttl_secs: 5,
            remote_update_interval_secs: 15 * 60,
            print_loading: false,
            cache_file: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load from the user's config directory; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_directory()?.join(CONFIG_FILE))
    }

    pub fn load_from(config_file: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(config_file) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", config_file.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map_err(|e| StatusBarError::config_parse_failed(config_file, e))
    }

    pub fn snapshot_ttl(&self) -> TimeDelta {
        TimeDelta::seconds(saturating_secs(self.snapshot_ttl_secs))
    }

    pub fn remote_update_interval(&self) -> TimeDelta {
        TimeDelta::seconds(saturating_secs(self.remote_update_interval_secs))
    }

    pub fn cache_file(&self) -> Result<PathBuf> {
        match &self.cache_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_cache_directory()?.join(CACHE_FILE)),
        }
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_cache_directory()?.join(LOG_FILE)),
        }
    }
}

// TimeDelta::seconds panics past roughly i64::MAX / 1000
fn saturating_secs(secs: u64) -> i64 {
    const MAX_SECS: i64 = i64::MAX / 1_000;
    i64::try_from(secs).map_or(MAX_SECS, |secs| secs.min(MAX_SECS))
}
