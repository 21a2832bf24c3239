//! Household medication domain model.
//!
//! # Responsibility
//! - Define the four canonical record shapes owned by the domain store.
//! - Keep the persisted wire shape (camelCase JSON) next to the types.
//!
//! # Invariants
//! - Identifiers are opaque strings, unique within their collection and never
//!   reassigned.
//! - Cross-collection references are plain ids, never owning links.
//! - Timestamps are RFC 3339 UTC strings with millisecond precision.

pub mod dose_log;
pub mod medicine;
pub mod symptom_log;
pub mod user;

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Identifier of a [`user::User`].
pub type UserId = String;
/// Identifier of a [`medicine::Medicine`].
pub type MedicineId = String;
/// Identifier of a [`dose_log::DoseLog`].
pub type DoseLogId = String;
/// Identifier of a [`symptom_log::SymptomLog`].
pub type SymptomLogId = String;

/// Generates a fresh opaque record identifier.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns the current instant as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
