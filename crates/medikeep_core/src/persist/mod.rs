//! Key-value persistence collaborator.
//!
//! # Responsibility
//! - Define the synchronous string key-value contract the domain store
//!   persists through.
//! - Provide in-memory and SQLite-backed implementations.
//! - Encode/decode whole collections as JSON text.
//!
//! # Invariants
//! - One fixed key per collection; values are full-collection replacements.
//! - Values carry no schema version.

pub mod codec;
mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized profile list.
pub const USERS_KEY: &str = "medikeep_users";
/// Key holding the serialized medicine list.
pub const MEDICINES_KEY: &str = "medikeep_medicines";
/// Key holding the serialized dose log list.
pub const DOSE_LOGS_KEY: &str = "medikeep_doselogs";
/// Key holding the serialized symptom log list.
pub const SYMPTOM_LOGS_KEY: &str = "medikeep_symptoms";

pub type KvResult<T> = Result<T, KvError>;

/// Failure reported by a key-value collaborator.
#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Backend-specific failure without a richer type.
    Backend(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "key-value backend failure: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }
}
