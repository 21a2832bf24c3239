//! Domain store: canonical household state and its mutation rules.
//!
//! # Responsibility
//! - Own the four collections (users, medicines, dose logs, symptom logs).
//! - Enforce invariants on every mutation and persist each changed
//!   collection right after it changes.
//! - Notify subscribers once a mutation is committed.
//!
//! # Invariants
//! - At least one user exists at all times.
//! - `0 <= current_stock <= total_stock` for every medicine.
//! - Deleting a user removes that user's medicines, never any logs.
//! - Only `StoreError::LastProfile` is surfaced; everything else is clamped,
//!   defaulted or logged.

mod domain_store;
mod error;
mod event;

pub use domain_store::{Collection, DomainStore, StoreSnapshot};
pub use error::{StoreError, StoreResult};
pub use event::StoreEvent;
