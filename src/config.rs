//! Application configuration module
//!
//! Settings are persisted with `confy` in the OS-specific config directory.

use crate::constant::{
    APP_NAME, DEFAULT_FONT_SIZE, DEFAULT_HIGHLIGHT_PULSE_MS, DEFAULT_REVERT_PULSE_MS,
    DEFAULT_SYNC_SUPPRESSION_MS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Remember the scroll-sync toggle for the next session.
    pub fn set_scroll_sync(&mut self, enabled: bool) {
        if self.settings.comparison.scroll_sync_enabled == enabled {
            return;
        }
        self.settings.comparison.scroll_sync_enabled = enabled;
        if let Err(e) = self.save() {
            tracing::error!("Failed to save scroll sync setting: {}", e);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Using default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// "light" or "dark"
    #[serde(default)]
    pub theme: String,

    #[serde(default)]
    pub font_size: f32,

    /// Max tracing level: error, warn, info, debug or trace
    #[serde(default)]
    pub log_level: String,

    #[serde(default)]
    pub comparison: ComparisonSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            log_level: "info".to_string(),
            comparison: ComparisonSettings::default(),
        }
    }
}

impl Settings {
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSettings {
    #[serde(default = "default_true")]
    pub scroll_sync_enabled: bool,

    /// Window after a programmatic scroll during which the other pane is not
    /// mirrored back
    #[serde(default = "default_sync_suppression_ms")]
    pub sync_suppression_ms: u64,

    /// Highlight duration after a scroll-to-line
    #[serde(default = "default_highlight_pulse_ms")]
    pub highlight_pulse_ms: u64,

    /// Opacity pulse duration after clicking revert
    #[serde(default = "default_revert_pulse_ms")]
    pub revert_pulse_ms: u64,

    #[serde(default = "default_true")]
    pub show_line_numbers: bool,

    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl ComparisonSettings {
    pub fn sync_suppression(&self) -> Duration {
        Duration::from_millis(self.sync_suppression_ms)
    }

    pub fn highlight_pulse(&self) -> Duration {
        Duration::from_millis(self.highlight_pulse_ms)
    }

    pub fn revert_pulse(&self) -> Duration {
        Duration::from_millis(self.revert_pulse_ms)
    }
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            scroll_sync_enabled: true,
            sync_suppression_ms: DEFAULT_SYNC_SUPPRESSION_MS,
            highlight_pulse_ms: DEFAULT_HIGHLIGHT_PULSE_MS,
            revert_pulse_ms: DEFAULT_REVERT_PULSE_MS,
            show_line_numbers: true,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sync_suppression_ms() -> u64 {
    DEFAULT_SYNC_SUPPRESSION_MS
}

fn default_highlight_pulse_ms() -> u64 {
    DEFAULT_HIGHLIGHT_PULSE_MS
}

fn default_revert_pulse_ms() -> u64 {
    DEFAULT_REVERT_PULSE_MS
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}
