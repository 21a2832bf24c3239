//! Dose event model.
//!
//! # Invariants
//! - A dose log is immutable once created; the collection is append-only.
//! - `status` never transitions after creation.
//! - `medicine_id` may dangle after the medicine is deleted.

use crate::model::{new_record_id, now_timestamp, DoseLogId, MedicineId};
use serde::{Deserialize, Serialize};

/// Recorded outcome of one dose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseStatus {
    Taken,
    Skipped,
    /// Reserved for a time-based deriver; no store operation produces it.
    Missed,
}

/// User action accepted by `DomainStore::log_dose`.
///
/// Narrower than [`DoseStatus`] so callers cannot record `missed` by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseAction {
    Taken,
    Skipped,
}

impl From<DoseAction> for DoseStatus {
    fn from(value: DoseAction) -> Self {
        match value {
            DoseAction::Taken => Self::Taken,
            DoseAction::Skipped => Self::Skipped,
        }
    }
}

impl DoseStatus {
    /// Stable lowercase token, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Taken => "taken",
            Self::Skipped => "skipped",
            Self::Missed => "missed",
        }
    }
}

/// One recorded dose event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseLog {
    pub id: DoseLogId,
    pub medicine_id: MedicineId,
    pub timestamp: String,
    pub status: DoseStatus,
}

impl DoseLog {
    /// Creates a dose log stamped with the current time.
    pub fn record(medicine_id: impl Into<MedicineId>, status: DoseStatus) -> Self {
        Self {
            id: new_record_id(),
            medicine_id: medicine_id.into(),
            timestamp: now_timestamp(),
            status,
        }
    }
}
