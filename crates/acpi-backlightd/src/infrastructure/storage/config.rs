//! TOML configuration file for the daemon.
//!
//! Default location: `/etc/acpi-backlightd/config.toml`.  Every key is
//! optional:
//!
//! ```toml
//! [daemon]
//! log_level = "debug"
//!
//! [paths]
//! socket = "/run/acpid.socket"
//! device = "amdgpu_bl0"
//! # brightness / max_brightness override `device` when given
//!
//! [adjustment]
//! step_percent = 5
//! unplugged_factor = 0.5
//! plugged_factor = 2.0
//! ```

use std::path::{Path, PathBuf};

use backlight_core::AdjustmentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::{
    DaemonConfig, DEFAULT_PLUGGED_FACTOR, DEFAULT_SOCKET_PATH, DEFAULT_STEP_PERCENT,
    DEFAULT_UNPLUGGED_FACTOR,
};

/// Where the daemon looks for its configuration when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/acpi-backlightd/config.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value: {0}")]
    Invalid(#[from] AdjustmentError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub daemon: DaemonSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub adjustment: AdjustmentSection,
}

/// Process-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonSection {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Socket and attribute locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsSection {
    #[serde(default = "default_socket")]
    pub socket: PathBuf,
    /// Device name under `/sys/class/backlight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_brightness: Option<PathBuf>,
}

/// How far each event moves the brightness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdjustmentSection {
    #[serde(default = "default_step_percent")]
    pub step_percent: u32,
    #[serde(default = "default_unplugged_factor")]
    pub unplugged_factor: f64,
    #[serde(default = "default_plugged_factor")]
    pub plugged_factor: f64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_socket() -> PathBuf {
    PathBuf::from(DEFAULT_SOCKET_PATH)
}
fn default_step_percent() -> u32 {
    DEFAULT_STEP_PERCENT
}
fn default_unplugged_factor() -> f64 {
    DEFAULT_UNPLUGGED_FACTOR
}
fn default_plugged_factor() -> f64 {
    DEFAULT_PLUGGED_FACTOR
}

impl Default for DaemonSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            socket: default_socket(),
            device: None,
            brightness: None,
            max_brightness: None,
        }
    }
}

impl Default for AdjustmentSection {
    fn default() -> Self {
        Self {
            step_percent: default_step_percent(),
            unplugged_factor: default_unplugged_factor(),
            plugged_factor: default_plugged_factor(),
        }
    }
}

impl ConfigFile {
    /// Resolves the file into a [`DaemonConfig`], validating ranges.
    ///
    /// Explicit `brightness` / `max_brightness` paths take precedence over
    /// `device`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `step_percent` is outside
    /// `1..=100` or a factor is not finite and positive.
    pub fn to_daemon_config(&self) -> Result<DaemonConfig, ConfigError> {
        validate_adjustment(&self.adjustment)?;

        let mut cfg = DaemonConfig {
            socket_path: self.paths.socket.clone(),
            step_percent: self.adjustment.step_percent,
            unplugged_factor: self.adjustment.unplugged_factor,
            plugged_factor: self.adjustment.plugged_factor,
            ..DaemonConfig::default()
        };
        if let Some(device) = &self.paths.device {
            cfg = cfg.with_device(device);
        }
        if let Some(path) = &self.paths.brightness {
            cfg.brightness_path = path.clone();
        }
        if let Some(path) = &self.paths.max_brightness {
            cfg.max_brightness_path = path.clone();
        }
        Ok(cfg)
    }
}

/// Checks step and factor ranges.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for the first value out of range.
pub fn validate_adjustment(section: &AdjustmentSection) -> Result<(), ConfigError> {
    if !(1..=100).contains(&section.step_percent) {
        return Err(AdjustmentError::InvalidStepPercent(section.step_percent).into());
    }
    backlight_core::Adjustment::factor(section.unplugged_factor)?;
    backlight_core::Adjustment::factor(section.plugged_factor)?;
    Ok(())
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads the configuration file.
///
/// With `explicit = None` the [`DEFAULT_CONFIG_PATH`] is read and a missing
/// file yields [`ConfigFile::default()`].  An explicitly given path must
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors (including a missing
/// explicit file) and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
            Ok(ConfigFile::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
