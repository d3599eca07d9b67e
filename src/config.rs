use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::Database;
use crate::models::{Category, NoteFilter};

const APP_NAME: &str = "notekeeper";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Category for new notes when the default filter is "all".
    pub default_category: Category,
    /// Filter used by `list` when none is given.
    pub default_filter: NoteFilter,
    /// Database file. Falls back to the platform data directory.
    pub database_path: Option<PathBuf>,
    /// ANSI colors, when stdout is a terminal.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_category: Category::Random,
            default_filter: NoteFilter::All,
            database_path: None,
            color: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Category preselected in the editor for a new note: the filtered
    /// category if the default filter selects one, else `default_category`.
    pub fn new_note_category(&self) -> Category {
        self.default_filter
            .category()
            .unwrap_or(self.default_category)
    }

    /// Database location: `override_path`, then `database_path`, then the platform default.
    pub fn resolve_database_path(&self, override_path: Option<PathBuf>) -> Result<PathBuf> {
        match override_path.or_else(|| self.database_path.clone()) {
            Some(path) => Ok(path),
            None => Database::default_path(),
        }
    }
}

/// `<config dir>/notekeeper/config.json`.
pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load(&path), AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_category":"study"}"#).unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.default_category, Category::Study);
        assert_eq!(config.default_filter, NoteFilter::All);
        assert!(config.color);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            default_category: Category::Business,
            default_filter: NoteFilter::Category(Category::Reminders),
            database_path: Some(dir.path().join("notes.db")),
            color: false,
        };

        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path), config);
    }

    #[test]
    fn test_new_note_category_follows_filter() {
        let mut config = AppConfig {
            default_category: Category::Study,
            ..AppConfig::default()
        };
        assert_eq!(config.new_note_category(), Category::Study);

        config.default_filter = NoteFilter::Category(Category::Creativity);
        assert_eq!(config.new_note_category(), Category::Creativity);
    }

    #[test]
    fn test_override_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/from/config.db")),
            ..AppConfig::default()
        };
        assert_eq!(
            config
                .resolve_database_path(Some(PathBuf::from("/from/flag.db")))
                .unwrap(),
            PathBuf::from("/from/flag.db")
        );
        assert_eq!(
            config.resolve_database_path(None).unwrap(),
            PathBuf::from("/from/config.db")
        );
    }
}
