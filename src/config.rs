//! Binary configuration
//!
//! Optional `config.toml` under the platform config directory; an absent
//! file means defaults. Only presentation-side knobs live here - the core
//! takes everything it needs as explicit arguments.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::freshness::DEFAULT_EXPIRING_DAYS;
use crate::error::{LarderError, LarderResult};

/// Presentation-side settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Look-ahead window for `larder expiring`, in days
    pub expiring_days: i64,
    /// Product lookup timeout, in seconds
    pub lookup_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expiring_days: DEFAULT_EXPIRING_DAYS,
            lookup_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> LarderResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|err| LarderError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&content).map_err(|err| LarderError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// `<config dir>/larder/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("larder").join("config.toml"))
}

/// `<data dir>/larder` for the current platform.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("larder"))
}
