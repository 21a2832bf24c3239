//! Inventory filters and totals.

use crate::model::medicine::Medicine;
use crate::persist::KeyValueStore;
use crate::store::DomainStore;
use chrono::NaiveDate;

/// Medicines owned by one profile, in insertion order.
pub fn medicines_for_user<'a, S: KeyValueStore>(
    store: &'a DomainStore<S>,
    user_id: &str,
) -> Vec<&'a Medicine> {
    store
        .medicines()
        .iter()
        .filter(|medicine| medicine.user_id == user_id)
        .collect()
}

/// Medicines at or below their low-stock threshold.
pub fn low_stock_medicines<S: KeyValueStore>(store: &DomainStore<S>) -> Vec<&Medicine> {
    store
        .medicines()
        .iter()
        .filter(|medicine| medicine.is_low_stock())
        .collect()
}

/// Medicines whose expiry date is before `today`.
pub fn expired_medicines<S: KeyValueStore>(
    store: &DomainStore<S>,
    today: NaiveDate,
) -> Vec<&Medicine> {
    store
        .medicines()
        .iter()
        .filter(|medicine| medicine.is_expired(today))
        .collect()
}

/// Total value of remaining stock, optionally for one profile only.
pub fn inventory_value<S: KeyValueStore>(store: &DomainStore<S>, user_id: Option<&str>) -> f64 {
    store
        .medicines()
        .iter()
        .filter(|medicine| user_id.map_or(true, |id| medicine.user_id == id))
        .map(Medicine::stock_value)
        .sum()
}
