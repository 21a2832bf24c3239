use crate::model::dose_log::DoseStatus;
use crate::model::{DoseLogId, MedicineId, SymptomLogId, UserId};

/// Committed change, delivered to subscribers after persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    UserAdded {
        user_id: UserId,
    },
    UserDeleted {
        user_id: UserId,
        /// Medicines removed by the cascade.
        removed_medicines: Vec<MedicineId>,
    },
    MedicineAdded {
        medicine_id: MedicineId,
    },
    MedicineDeleted {
        medicine_id: MedicineId,
    },
    DoseLogged {
        log_id: DoseLogId,
        medicine_id: MedicineId,
        status: DoseStatus,
        /// Stock after the dose; `None` when the medicine no longer exists.
        remaining_stock: Option<u32>,
    },
    SymptomLogged {
        log_id: SymptomLogId,
        user_id: UserId,
    },
}
