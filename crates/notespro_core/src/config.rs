//! File-based configuration for front ends embedding the core.
//!
//! # Responsibility
//! - Locate, read and create the TOML config file.
//! - Resolve storage and logging paths.
//!
//! # Invariants
//! - Missing fields fall back to defaults; a missing file is created.
//! - `~/` prefixes are expanded against the user's home directory.

use crate::logging::default_log_level;
use crate::storage::STORAGE_KEY;
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const DATABASE_FILE_NAME: &str = "notespro.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Record key of the notes snapshot inside the storage database.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level")]
    pub log_level: String,
    /// Absolute log directory. Defaults to `<data dir>/logs`.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            database_path: default_database_path(),
            log_level: default_level(),
            log_dir: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ConfigDir,
    Read(PathBuf, std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Write(PathBuf, std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigDir => write!(f, "could not determine config directory"),
            Self::Read(path, err) => {
                write!(f, "failed to read config `{}`: {err}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse config TOML: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize config: {err}"),
            Self::Write(path, err) => {
                write!(f, "failed to write config `{}`: {err}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ConfigDir => None,
            Self::Read(_, err) | Self::Write(_, err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl NotesConfig {
    /// Loads the config from the platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Loads the config at `path`, writing defaults there when it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents =
                fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
            return Ok(toml::from_str(&contents)?);
        }

        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| ConfigError::Write(path.to_path_buf(), err))?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, contents).map_err(|err| ConfigError::Write(path.to_path_buf(), err))
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::ConfigDir)
    }

    pub fn database_path(&self) -> PathBuf {
        expand_path(&self.database_path)
    }

    /// Resolves the log directory, if one can be determined.
    pub fn log_dir(&self) -> Option<PathBuf> {
        match self.log_dir.as_deref() {
            Some(dir) => Some(expand_path(dir)),
            None => project_dirs().map(|dirs| dirs.data_dir().join(LOG_DIR_NAME)),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "notespro", "notespro")
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_database_path() -> String {
    match project_dirs() {
        Some(dirs) => dirs
            .data_dir()
            .join(DATABASE_FILE_NAME)
            .to_string_lossy()
            .to_string(),
        None => format!("~/.local/share/notespro/{DATABASE_FILE_NAME}"),
    }
}

fn default_level() -> String {
    default_log_level().to_string()
}

/// Expands a leading `~/` to the user's home directory.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(base) = BaseDirs::new() {
            return base.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
