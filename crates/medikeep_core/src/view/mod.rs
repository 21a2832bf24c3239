//! Read-side projections for presentation.
//!
//! # Responsibility
//! - Join logs to the records they reference for display.
//! - Filter and aggregate inventory without mutating the store.
//!
//! # Invariants
//! - Joins never assume a referenced record exists; a missing target yields
//!   `None` and a fixed placeholder name.

pub mod history;
pub mod inventory;

pub use history::{
    dose_history, doses_for_medicine_on, symptom_history, DoseEntry, SymptomEntry,
    UNKNOWN_MEDICINE_NAME, UNKNOWN_USER_NAME,
};
pub use inventory::{
    expired_medicines, inventory_value, low_stock_medicines, medicines_for_user,
};
