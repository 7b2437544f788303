//! Application settings

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Direction;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Outline file loaded at startup
    pub outline_path: Option<String>,

    /// Reading direction of the tree
    pub direction: Direction,

    /// Log filter, e.g. "info" or "sidenav=debug"
    pub log_level: String,

    /// Log file path
    pub log_file: String,

    /// Theme name
    pub theme: String,

    /// Input poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Double click window in milliseconds
    pub double_click_ms: u64,

    /// Maximum journal entries to keep in memory
    pub max_journal_events: usize,

    /// Columns of indentation per tree level
    pub indent_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            outline_path: None,
            direction: Direction::Ltr,
            log_level: "info".to_string(),
            log_file: Self::config_dir()
                .join("sidenav.log")
                .to_string_lossy()
                .to_string(),
            theme: "default".to_string(),
            tick_rate_ms: 100,
            double_click_ms: 400,
            max_journal_events: 200,
            indent_width: 2,
        }
    }
}

impl Settings {
    /// Load settings from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let settings: Self = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("org", "sidenav", "sidenav-tui")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
                    .join("sidenav-tui")
            })
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let settings = Settings {
            direction: Direction::Rtl,
            indent_width: 4,
            ..Settings::default()
        };
        settings.save(path.to_str()).unwrap();
        assert_eq!(Settings::load(path.to_str()).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "direction": "rtl", "theme": "light" }"#).unwrap();
        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings.direction, Direction::Rtl);
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.tick_rate_ms, 100);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load(path.to_str()).is_err());
    }
}
