//! Runtime configuration for opening a note store.
//!
//! # Responsibility
//! - Resolve backend kind, data directory and logging settings from
//!   defaults and `MONONOTE_*` environment variables.
//! - Build the configured storage backend.
//!
//! # Invariants
//! - Resolution order is defaults, then environment, then explicit
//!   overrides applied by the caller.
//! - Unknown values are rejected, never silently replaced by defaults.

use crate::logging::default_log_level;
use crate::storage::{JsonFileBackend, MemoryBackend, NoteBackend, SqliteBackend, StorageError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const ENV_BACKEND: &str = "MONONOTE_BACKEND";
pub const ENV_DATA_DIR: &str = "MONONOTE_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "MONONOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MONONOTE_LOG_DIR";

const APP_DIR_NAME: &str = "mononote";
const SQLITE_FILE_NAME: &str = "mononote.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    #[default]
    Json,
    Sqlite,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Json => "json",
            Self::Sqlite => "sqlite",
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "json" | "file" => Ok(Self::Json),
            "sqlite" | "db" => Ok(Self::Sqlite),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBackend(String),
    EmptyValue(&'static str),
    Storage(StorageError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBackend(value) => write!(
                f,
                "unsupported backend `{value}`; expected memory|json|sqlite"
            ),
            Self::EmptyValue(key) => write!(f, "`{key}` cannot be empty"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for ConfigError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Resolved store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: BackendKind,
    pub data_dir: PathBuf,
    pub log_level: String,
    /// Defaults to `<data_dir>/logs` when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")));
        Self {
            backend: BackendKind::default(),
            data_dir,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl StoreConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Unset keys keep their defaults; set-but-blank keys are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = non_blank(&lookup, ENV_BACKEND)? {
            config.backend = value.parse()?;
        }
        if let Some(value) = non_blank(&lookup, ENV_DATA_DIR)? {
            config.data_dir = PathBuf::from(value);
        }
        if let Some(value) = non_blank(&lookup, ENV_LOG_LEVEL)? {
            config.log_level = value;
        }
        if let Some(value) = non_blank(&lookup, ENV_LOG_DIR)? {
            config.log_dir = Some(PathBuf::from(value));
        }

        Ok(config)
    }

    /// Effective log directory.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join(LOG_DIR_NAME))
    }

    /// Path of the SQLite database used by `BackendKind::Sqlite`.
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(SQLITE_FILE_NAME)
    }

    /// Opens the configured backend.
    ///
    /// # Side effects
    /// - Creates `data_dir` for the SQLite backend.
    pub fn open_backend(&self) -> Result<Box<dyn NoteBackend>, ConfigError> {
        let backend: Box<dyn NoteBackend> = match self.backend {
            BackendKind::Memory => Box::new(MemoryBackend::new()),
            BackendKind::Json => Box::new(JsonFileBackend::new(&self.data_dir)),
            BackendKind::Sqlite => {
                std::fs::create_dir_all(&self.data_dir).map_err(|source| {
                    StorageError::Io {
                        path: self.data_dir.clone(),
                        source,
                    }
                })?;
                Box::new(SqliteBackend::open(self.sqlite_path())?)
            }
        };
        Ok(backend)
    }
}

fn non_blank<F>(lookup: &F, key: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
