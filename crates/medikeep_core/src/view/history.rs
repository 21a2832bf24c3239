//! Dose and symptom history joins.

use crate::model::dose_log::DoseLog;
use crate::model::medicine::Medicine;
use crate::model::symptom_log::SymptomLog;
use crate::model::user::User;
use crate::persist::KeyValueStore;
use crate::store::DomainStore;
use chrono::{DateTime, NaiveDate, Utc};

/// Placeholder shown for a dose log whose medicine was deleted.
pub const UNKNOWN_MEDICINE_NAME: &str = "Unknown medicine";
/// Placeholder shown for a symptom log whose profile was deleted.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// Dose log joined with its medicine, if it still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DoseEntry<'a> {
    pub log: &'a DoseLog,
    pub medicine: Option<&'a Medicine>,
}

impl DoseEntry<'_> {
    pub fn medicine_name(&self) -> &str {
        self.medicine
            .map_or(UNKNOWN_MEDICINE_NAME, |medicine| medicine.name.as_str())
    }
}

/// Symptom log joined with its profile, if it still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomEntry<'a> {
    pub log: &'a SymptomLog,
    pub user: Option<&'a User>,
}

impl SymptomEntry<'_> {
    pub fn user_name(&self) -> &str {
        self.user.map_or(UNKNOWN_USER_NAME, |user| user.name.as_str())
    }
}

/// All dose logs, newest first.
pub fn dose_history<S: KeyValueStore>(store: &DomainStore<S>) -> Vec<DoseEntry<'_>> {
    store
        .dose_logs()
        .iter()
        .rev()
        .map(|log| DoseEntry {
            log,
            medicine: store.medicine(&log.medicine_id),
        })
        .collect()
}

/// All symptom logs, newest first.
pub fn symptom_history<S: KeyValueStore>(store: &DomainStore<S>) -> Vec<SymptomEntry<'_>> {
    store
        .symptom_logs()
        .iter()
        .rev()
        .map(|log| SymptomEntry {
            log,
            user: store.user(&log.user_id),
        })
        .collect()
}

/// Dose logs for one medicine whose timestamp falls on `date` (UTC).
///
/// Logs with unreadable timestamps are skipped.
pub fn doses_for_medicine_on<'a, S: KeyValueStore>(
    store: &'a DomainStore<S>,
    medicine_id: &str,
    date: NaiveDate,
) -> Vec<&'a DoseLog> {
    store
        .dose_logs()
        .iter()
        .filter(|log| log.medicine_id == medicine_id)
        .filter(|log| log_date(&log.timestamp) == Some(date))
        .collect()
}

fn log_date(timestamp: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|value| value.with_timezone(&Utc).date_naive())
}
