//! User configuration
//!
//! Read from `<config dir>/shakyegg/config.json`, or from the path in
//! `SHAKYEGG_CONFIG`. Every field is optional; missing ones take defaults.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::delay::DEFAULT_SHAKE_DELAY_SECS;

/// Longest configurable shake delay: one day.
pub const MAX_SHAKE_DELAY_SECS: u64 = 24 * 60 * 60;
/// Longest configurable toast duration: one hour.
pub const MAX_TOAST_DURATION_MS: u64 = 60 * 60 * 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shake delay range is empty: {min}s..={max}s")]
    InvalidShakeRange { min: u64, max: u64 },
    #[error("shake delay {max}s is longer than {limit}s")]
    ShakeDelayTooLong { max: u64, limit: u64 },
    #[error("toast duration must be between 1ms and {limit}ms")]
    InvalidToastDuration { limit: u64 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EggConfig {
    /// Shortest wait before the egg shakes, in seconds
    pub shake_delay_min_secs: u64,
    /// Longest wait before the egg shakes, in seconds (inclusive)
    pub shake_delay_max_secs: u64,
    /// How long the toast stays up after a tap, in milliseconds
    pub toast_duration_ms: u64,
    /// Fixed RNG seed; `None` draws from entropy
    pub seed: Option<u64>,
    /// Explicit egg image path
    pub egg_image: Option<PathBuf>,
    /// Directory holding the Nunito font files
    pub font_dir: Option<PathBuf>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            shake_delay_min_secs: *DEFAULT_SHAKE_DELAY_SECS.start(),
            shake_delay_max_secs: *DEFAULT_SHAKE_DELAY_SECS.end(),
            toast_duration_ms: 2000,
            seed: None,
            egg_image: None,
            font_dir: None,
            window_width: 360.0,
            window_height: 780.0,
        }
    }
}

impl EggConfig {
    /// Default location, honouring the `SHAKYEGG_CONFIG` override.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os("SHAKYEGG_CONFIG") {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("", "", "shakyegg")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/tmp/shakyegg"))
            .join("config.json")
    }

    /// Load from `path`. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.shake_delay_min_secs > self.shake_delay_max_secs {
            return Err(ConfigError::InvalidShakeRange {
                min: self.shake_delay_min_secs,
                max: self.shake_delay_max_secs,
            });
        }
        if self.shake_delay_max_secs > MAX_SHAKE_DELAY_SECS {
            return Err(ConfigError::ShakeDelayTooLong {
                max: self.shake_delay_max_secs,
                limit: MAX_SHAKE_DELAY_SECS,
            });
        }
        if self.toast_duration_ms == 0 || self.toast_duration_ms > MAX_TOAST_DURATION_MS {
            return Err(ConfigError::InvalidToastDuration { limit: MAX_TOAST_DURATION_MS });
        }
        Ok(())
    }

    pub fn shake_delay_secs(&self) -> RangeInclusive<u64> {
        self.shake_delay_min_secs..=self.shake_delay_max_secs
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}
