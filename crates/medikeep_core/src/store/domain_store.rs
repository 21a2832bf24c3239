//! In-memory state container backed by a key-value collaborator.
//!
//! # Invariants
//! - Every public mutation commits fully before persistence and
//!   notification; subscribers never observe a half-applied change.
//! - Each collection is persisted under its own key; one failed write does
//!   not skip the others and does not roll back memory.
//! - Load never fails: unreadable or invalid values fall back to defaults.

use super::error::{StoreError, StoreResult};
use super::event::StoreEvent;
use crate::model::dose_log::{DoseAction, DoseLog, DoseStatus};
use crate::model::medicine::Medicine;
use crate::model::symptom_log::SymptomLog;
use crate::model::user::User;
use crate::persist::codec::{decode_collection, encode_collection, PersistedRecord};
use crate::persist::{
    KeyValueStore, DOSE_LOGS_KEY, MEDICINES_KEY, SYMPTOM_LOGS_KEY, USERS_KEY,
};
use log::{debug, error, info, warn};

type Listener = Box<dyn Fn(&StoreEvent)>;

/// One of the four persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Medicines,
    DoseLogs,
    SymptomLogs,
}

impl Collection {
    pub const ALL: [Self; 4] = [
        Self::Users,
        Self::Medicines,
        Self::DoseLogs,
        Self::SymptomLogs,
    ];

    /// Fixed persistence key for this collection.
    pub fn key(self) -> &'static str {
        match self {
            Self::Users => USERS_KEY,
            Self::Medicines => MEDICINES_KEY,
            Self::DoseLogs => DOSE_LOGS_KEY,
            Self::SymptomLogs => SYMPTOM_LOGS_KEY,
        }
    }
}

/// Owned copy of all four collections for one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub medicines: Vec<Medicine>,
    pub dose_logs: Vec<DoseLog>,
    pub symptom_logs: Vec<SymptomLog>,
}

/// Single source of truth for household medication state.
pub struct DomainStore<S: KeyValueStore> {
    storage: S,
    users: Vec<User>,
    medicines: Vec<Medicine>,
    dose_logs: Vec<DoseLog>,
    symptom_logs: Vec<SymptomLog>,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> DomainStore<S> {
    /// Loads all collections from `storage`, defaulting any that are absent,
    /// unreadable or invalid.
    ///
    /// Defaults: one seeded profile named "Me"; other collections empty.
    /// Nothing is written back until the first mutation.
    pub fn load(storage: S) -> Self {
        let users = load_collection(&storage, Collection::Users, User::seed_profiles);
        let medicines = load_collection(&storage, Collection::Medicines, Vec::new);
        let dose_logs = load_collection(&storage, Collection::DoseLogs, Vec::new);
        let symptom_logs = load_collection(&storage, Collection::SymptomLogs, Vec::new);

        info!(
            "event=store_load module=store status=ok users={} medicines={} dose_logs={} symptom_logs={}",
            users.len(),
            medicines.len(),
            dose_logs.len(),
            symptom_logs.len()
        );

        Self {
            storage,
            users,
            medicines,
            dose_logs,
            symptom_logs,
            listeners: Vec::new(),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn medicines(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn dose_logs(&self) -> &[DoseLog] {
        &self.dose_logs
    }

    pub fn symptom_logs(&self) -> &[SymptomLog] {
        &self.symptom_logs
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn medicine(&self, id: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|medicine| medicine.id == id)
    }

    /// Clones the current state of all collections.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.users.clone(),
            medicines: self.medicines.clone(),
            dose_logs: self.dose_logs.clone(),
            symptom_logs: self.symptom_logs.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Releases the persistence collaborator, dropping in-memory state.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Registers a callback invoked after every committed mutation.
    ///
    /// Refused and no-op calls do not notify.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Adds a profile with a fresh id and returns it.
    pub fn add_user(
        &mut self,
        name: impl Into<String>,
        avatar_color: impl Into<String>,
    ) -> User {
        let user = User::new(name, avatar_color);
        self.users.push(user.clone());
        self.persist(Collection::Users);

        info!(
            "event=user_add module=store status=ok user_id={} users={}",
            user.id,
            self.users.len()
        );
        self.notify(&StoreEvent::UserAdded {
            user_id: user.id.clone(),
        });
        user
    }

    /// Deletes a profile and every medicine it owns.
    ///
    /// The call is irreversible; callers must obtain confirmation first.
    /// Dose and symptom logs are kept even when they reference the removed
    /// profile or its medicines.
    ///
    /// # Errors
    /// - `StoreError::LastProfile` when at most one profile exists. Nothing
    ///   is mutated in that case.
    pub fn delete_user(&mut self, id: &str) -> StoreResult<()> {
        if self.users.len() <= 1 {
            warn!(
                "event=user_delete module=store status=refused reason=last_profile user_id={}",
                id
            );
            return Err(StoreError::LastProfile);
        }

        if self.user(id).is_none() {
            debug!(
                "event=user_delete module=store status=noop reason=unknown_user user_id={}",
                id
            );
            return Ok(());
        }

        let (removed, kept): (Vec<Medicine>, Vec<Medicine>) = std::mem::take(&mut self.medicines)
            .into_iter()
            .partition(|medicine| medicine.user_id == id);
        self.medicines = kept;
        self.users.retain(|user| user.id != id);

        self.persist(Collection::Users);
        if !removed.is_empty() {
            self.persist(Collection::Medicines);
        }

        info!(
            "event=user_delete module=store status=ok user_id={} removed_medicines={}",
            id,
            removed.len()
        );
        self.notify(&StoreEvent::UserDeleted {
            user_id: id.to_string(),
            removed_medicines: removed.into_iter().map(|medicine| medicine.id).collect(),
        });
        Ok(())
    }

    /// Appends a caller-built medicine.
    ///
    /// `current_stock` is clamped to `total_stock`. Returns `false` without
    /// mutating when the id is already taken or `user_id` names no profile.
    pub fn add_medicine(&mut self, mut medicine: Medicine) -> bool {
        if self.medicine(&medicine.id).is_some() {
            warn!(
                "event=medicine_add module=store status=refused reason=duplicate_id medicine_id={}",
                medicine.id
            );
            return false;
        }
        if self.user(&medicine.user_id).is_none() {
            warn!(
                "event=medicine_add module=store status=refused reason=unknown_user medicine_id={} user_id={}",
                medicine.id, medicine.user_id
            );
            return false;
        }

        if medicine.normalize() {
            debug!(
                "event=medicine_add module=store status=normalized medicine_id={}",
                medicine.id
            );
        }
        let medicine_id = medicine.id.clone();
        self.medicines.push(medicine);
        self.persist(Collection::Medicines);

        info!(
            "event=medicine_add module=store status=ok medicine_id={}",
            medicine_id
        );
        self.notify(&StoreEvent::MedicineAdded { medicine_id });
        true
    }

    /// Removes a medicine. Unknown ids are a silent no-op.
    ///
    /// Dose logs pointing at the medicine are kept.
    pub fn delete_medicine(&mut self, id: &str) {
        let before = self.medicines.len();
        self.medicines.retain(|medicine| medicine.id != id);
        if self.medicines.len() == before {
            debug!(
                "event=medicine_delete module=store status=noop medicine_id={}",
                id
            );
            return;
        }

        self.persist(Collection::Medicines);
        info!(
            "event=medicine_delete module=store status=ok medicine_id={}",
            id
        );
        self.notify(&StoreEvent::MedicineDeleted {
            medicine_id: id.to_string(),
        });
    }

    /// Records a dose and, when taken, consumes one unit of stock.
    ///
    /// Stock never drops below 0. A log for an unknown medicine is still
    /// recorded; only the stock step is skipped.
    pub fn log_dose(&mut self, medicine_id: &str, action: DoseAction) -> DoseLog {
        let status = DoseStatus::from(action);
        let log = DoseLog::record(medicine_id, status);
        self.dose_logs.push(log.clone());

        let target = self
            .medicines
            .iter_mut()
            .find(|medicine| medicine.id == medicine_id);
        let (stock_changed, remaining_stock) = match target {
            Some(medicine) => {
                let changed = action == DoseAction::Taken && medicine.consume_one();
                (changed, Some(medicine.current_stock))
            }
            None => {
                debug!(
                    "event=dose_log module=store status=dangling medicine_id={}",
                    medicine_id
                );
                (false, None)
            }
        };

        self.persist(Collection::DoseLogs);
        if stock_changed {
            self.persist(Collection::Medicines);
        }

        info!(
            "event=dose_log module=store status=ok log_id={} medicine_id={} dose_status={} stock_changed={}",
            log.id,
            medicine_id,
            status.as_str(),
            stock_changed
        );
        self.notify(&StoreEvent::DoseLogged {
            log_id: log.id.clone(),
            medicine_id: medicine_id.to_string(),
            status,
            remaining_stock,
        });
        log
    }

    /// Appends a caller-built symptom observation.
    ///
    /// Severity is clamped into 1..=10. Returns `false` without mutating when
    /// the id is already taken.
    pub fn add_symptom_log(&mut self, mut log: SymptomLog) -> bool {
        if self.symptom_logs.iter().any(|existing| existing.id == log.id) {
            warn!(
                "event=symptom_log module=store status=refused reason=duplicate_id log_id={}",
                log.id
            );
            return false;
        }

        log.normalize_severity();
        let event = StoreEvent::SymptomLogged {
            log_id: log.id.clone(),
            user_id: log.user_id.clone(),
        };
        self.symptom_logs.push(log);
        self.persist(Collection::SymptomLogs);

        info!(
            "event=symptom_log module=store status=ok symptom_logs={}",
            self.symptom_logs.len()
        );
        self.notify(&event);
        true
    }

    fn persist(&mut self, collection: Collection) {
        match collection {
            Collection::Users => write_collection(&mut self.storage, collection, &self.users),
            Collection::Medicines => {
                write_collection(&mut self.storage, collection, &self.medicines)
            }
            Collection::DoseLogs => {
                write_collection(&mut self.storage, collection, &self.dose_logs)
            }
            Collection::SymptomLogs => {
                write_collection(&mut self.storage, collection, &self.symptom_logs)
            }
        }
    }

    fn notify(&self, event: &StoreEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

fn load_collection<S, T>(
    storage: &S,
    collection: Collection,
    default: impl FnOnce() -> Vec<T>,
) -> Vec<T>
where
    S: KeyValueStore,
    T: PersistedRecord,
{
    let key = collection.key();
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("event=collection_load module=store status=default reason=absent key={key}");
            return default();
        }
        Err(err) => {
            warn!(
                "event=collection_load module=store status=fallback reason=read_failed key={} error={}",
                key, err
            );
            return default();
        }
    };

    match decode_collection::<T>(&text) {
        Ok(decoded) => {
            if decoded.normalized > 0 {
                warn!(
                    "event=collection_load module=store status=normalized key={} records={} kept={}",
                    key,
                    decoded.normalized,
                    decoded.items.len()
                );
            }
            decoded.items
        }
        Err(err) => {
            warn!(
                "event=collection_load module=store status=fallback reason=malformed key={} error={}",
                key, err
            );
            default()
        }
    }
}

fn write_collection<S, T>(storage: &mut S, collection: Collection, items: &[T])
where
    S: KeyValueStore,
    T: PersistedRecord,
{
    let key = collection.key();
    let text = match encode_collection(items) {
        Ok(text) => text,
        Err(err) => {
            error!(
                "event=collection_write module=store status=error reason=encode_failed key={} error={}",
                key, err
            );
            return;
        }
    };

    if let Err(err) = storage.set(key, &text) {
        error!(
            "event=collection_write module=store status=error reason=write_failed key={} error={}",
            key, err
        );
    }
}
