//! Core domain logic for MediKeep.
//! This crate is the single source of truth for household medication state.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persist;
pub mod route;
pub mod store;
pub mod view;

pub use config::{open_household, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::dose_log::{DoseAction, DoseLog, DoseStatus};
pub use model::medicine::{Frequency, Medicine};
pub use model::symptom_log::SymptomLog;
pub use model::user::User;
pub use model::{DoseLogId, MedicineId, SymptomLogId, UserId};
pub use persist::codec::DecodeError;
pub use persist::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use route::Tab;
pub use store::{Collection, DomainStore, StoreError, StoreEvent, StoreResult, StoreSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
