//! Squadlab settings with persistence
//!
//! Settings are read from `~/.config/squadlab/settings.toml` unless a path
//! is given on the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub logging: LoggingSettings,
    pub report: ReportSettings,
}

/// Where the settings came from
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsSource {
    Defaults,
    File(PathBuf),
    /// The file exists but could not be used
    Fallback { path: PathBuf, error: String },
}

impl SettingsSource {
    /// Report the outcome once logging is up
    pub fn log(&self) {
        match self {
            Self::Defaults => info!("No settings file found, using defaults"),
            Self::File(path) => info!("Loaded settings from {:?}", path),
            Self::Fallback { path, error } => {
                warn!("Failed to load settings from {:?}: {}, using defaults", path, error)
            }
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("squadlab"))
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Read and parse one settings file
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load settings from `explicit` or the default location, falling back
    /// to defaults. Logging may not be set up yet, so the outcome is
    /// returned for the caller to report.
    pub fn load(explicit: Option<&Path>) -> (Self, SettingsSource) {
        let Some(path) = explicit.map(Path::to_path_buf).or_else(Self::settings_path) else {
            return (Self::default(), SettingsSource::Defaults);
        };

        if !path.exists() {
            return (Self::default(), SettingsSource::Defaults);
        }

        match Self::read(&path) {
            Ok(settings) => (settings, SettingsSource::File(path)),
            Err(e) => (
                Self::default(),
                SettingsSource::Fallback {
                    path,
                    error: format!("{e:#}"),
                },
            ),
        }
    }
}

/// Catalog locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Character catalog (JSON array or snapshot)
    pub characters: PathBuf,
    /// Item catalog (JSON array or snapshot)
    pub items: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            characters: PathBuf::from("data/characters.json"),
            items: PathBuf::from("data/equipment.json"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Stat report rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Print stats that total 0
    pub show_zero: bool,
    /// Percentage that fills a gauge
    pub gauge_scale: f64,
    /// Gauge width in characters
    pub gauge_width: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            show_zero: false,
            gauge_scale: 100.0,
            gauge_width: 20,
        }
    }
}
