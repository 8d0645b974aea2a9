//! Application configuration.
//!
//! Loaded from `config.toml` in the data directory. Every section is
//! optional; missing keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vocabulary::{default_genders, default_goal_statuses};

/// What to do when the database file was written by an older schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradePolicy {
    /// Apply additive migrations and keep existing rows
    #[default]
    Migrate,
    /// Drop every table and start from an empty store
    Recreate,
}

impl std::fmt::Display for UpgradePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpgradePolicy::Migrate => write!(f, "migrate"),
            UpgradePolicy::Recreate => write!(f, "recreate"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Database settings
    pub storage: StorageSettings,
    /// CSV export settings
    pub export: ExportSettings,
    /// Selection lists offered by the forms
    pub vocabulary: VocabularySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            storage: StorageSettings::default(),
            export: ExportSettings::default(),
            vocabulary: VocabularySettings::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the SQLite file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }

    /// Directory CSV exports are written to when no output path is given.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| self.data_dir.join("exports"))
    }
}

/// Database-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// File name inside the data directory
    pub database_file: String,
    /// Behavior when opening an older schema
    pub upgrade_policy: UpgradePolicy,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "fitness_tracker.db".to_string(),
            upgrade_policy: UpgradePolicy::default(),
        }
    }
}

/// Export-related settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output directory; `<data dir>/exports` when unset
    pub directory: Option<PathBuf>,
}

/// Fixed selection lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularySettings {
    /// Goal statuses, in display order
    pub goal_statuses: Vec<String>,
    /// Genders offered at registration and in settings
    pub genders: Vec<String>,
}

impl Default for VocabularySettings {
    fn default() -> Self {
        Self {
            goal_statuses: default_goal_statuses(),
            genders: default_genders(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fittrack", "FitTrack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load `config.toml` from `data_dir`, or defaults if it does not exist.
pub fn load_config_from(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join("config.toml");

    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        });
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir.to_path_buf();

    Ok(config)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
