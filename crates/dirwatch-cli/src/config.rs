//! Runtime configuration.
//!
//! Values come from three places, later ones winning: built-in defaults,
//! an optional JSON config file, and command-line flags.

use dirwatch_watcher::{ListingFilter, WatchConfig, DEFAULT_INTERVAL};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("interval must be a positive number of seconds, got '{0}'")]
    InvalidInterval(String),
}

/// Contents of a `--config` file. Every key is optional.
///
/// ```json
/// { "dir": "/var/log/app", "ext": "log", "interval_secs": 2.5 }
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub dir: Option<PathBuf>,
    pub ext: Option<String>,
    pub interval_secs: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub dir: Option<PathBuf>,
    pub ext: Option<String>,
    pub interval: Option<Duration>,
}

/// Converts seconds into an interval, rejecting zero, negatives, NaN and infinity.
pub fn interval_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidInterval(secs.to_string()));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidInterval(secs.to_string()))
}

/// clap value parser for `--interval`.
pub fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInterval(raw.to_string()))?;
    interval_from_secs(secs)
}

/// Merges defaults, the config file and the command line into a [`WatchConfig`].
pub fn resolve(
    needle: String,
    file: FileConfig,
    overrides: Overrides,
) -> Result<WatchConfig, ConfigError> {
    let dir = overrides
        .dir
        .or(file.dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let interval = match (overrides.interval, file.interval_secs) {
        (Some(interval), _) => interval,
        (None, Some(secs)) => interval_from_secs(secs)?,
        (None, None) => DEFAULT_INTERVAL,
    };

    let filter = overrides
        .ext
        .or(file.ext)
        .map(|ext| ListingFilter::extension(&ext))
        .unwrap_or_default();

    let mut config = WatchConfig::new(dir, needle);
    config.interval = interval;
    config.filter = filter;
    Ok(config)
}
