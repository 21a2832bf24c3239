//! Core configuration and household bootstrap.
//!
//! # Responsibility
//! - Resolve where on-device data and logs live.
//! - Wire logging, SQLite storage and the domain store together.
//!
//! # Invariants
//! - Logging is only started when a log directory is configured.
//! - A storage schema newer than this binary is an error, never a reset.

use crate::db::DbError;
use crate::logging::{default_log_level, init_logging};
use crate::persist::SqliteKeyValueStore;
use crate::store::DomainStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name of the on-device key-value database inside `data_dir`.
pub const DB_FILE_NAME: &str = "medikeep.sqlite3";

/// Runtime settings supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Directory holding the key-value database.
    pub data_dir: PathBuf,
}

impl CoreConfig {
    /// Config with the build-mode default log level and file logging off.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            data_dir: data_dir.into(),
        }
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

/// Failure while bootstrapping the core.
#[derive(Debug)]
pub enum ConfigError {
    Logging(String),
    DataDir(std::io::Error),
    Db(DbError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::DataDir(err) => write!(f, "data directory unavailable: {err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::DataDir(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Starts logging (when configured), opens on-device storage and loads the
/// household state.
pub fn open_household(
    config: &CoreConfig,
) -> Result<DomainStore<SqliteKeyValueStore>, ConfigError> {
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &path_text(log_dir))
            .map_err(ConfigError::Logging)?;
    }

    std::fs::create_dir_all(&config.data_dir).map_err(ConfigError::DataDir)?;
    let db_path = config.db_path();
    let storage = SqliteKeyValueStore::open(&db_path)?;
    info!(
        "event=household_open module=config status=ok db_path={}",
        db_path.display()
    );
    Ok(DomainStore::load(storage))
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
