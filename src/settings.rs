// user settings
// loaded from ~/.config/auto-resume/settings.toml, every key optional

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::config::{APP_DIR, ConfigStore};

/// overrides the data directory
pub const DATA_DIR_ENV: &str = "AUTO_RESUME_DATA_DIR";
/// overrides the theme name
pub const THEME_ENV: &str = "AUTO_RESUME_THEME";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// settings for the terminal app itself (not projects or models)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Option<String>,       // "catppuccin" (default), "basic", or "plain"
    pub log_level: Option<String>,   // tracing filter used when RUST_LOG is unset
    pub request_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// load settings, then apply environment overrides
    pub fn load() -> Self {
        let mut settings = Self::read_file();

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                settings.data_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(theme) = std::env::var(THEME_ENV) {
            if !theme.is_empty() {
                settings.theme = Some(theme);
            }
        }

        settings
    }

    fn read_file() -> Self {
        let path = Self::settings_path();

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// unknown keys are ignored, a broken file falls back to defaults
    fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }

    /// path to settings file
    pub fn settings_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
            .join("settings.toml")
    }

    /// directory for config.toml, projects and the log file
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(ConfigStore::default_data_dir)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("catppuccin")
    }

    /// upper bound for a single generation request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }
}
