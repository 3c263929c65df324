//! Configuration for good_feeder.
//!
//! Per-run settings come from the command line ([`run`]). Presentation and
//! HTTP defaults may be overridden from `~/.config/good_feeder/config.toml`;
//! the file is optional and never created by the tool.

pub mod colors;
pub mod run;

pub use colors::{ColorConfig, HtmlColorConfig};
pub use run::{Credentials, FeedVariant, OutputMode, Resolution, RunConfig};

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file contents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub colors: ColorConfig,
    pub html: HtmlColorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout; unset leaves the transport default in place.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("good_feeder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(ConfigError::NoConfigDir) => {
                    tracing::debug!("No config directory, using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse { path, source: e })
    }

    /// `~/.config/good_feeder/config.toml` (platform equivalent elsewhere).
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("good_feeder").join("config.toml"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
