use medikeep_core::db::open_db;
use medikeep_core::{
    DoseAction, DoseLog, DoseStatus, DomainStore, Frequency, KeyValueStore, KvError, KvResult,
    MemoryKeyValueStore, Medicine, SqliteKeyValueStore, SymptomLog,
};
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn reload_reproduces_every_collection() {
    let mut store = DomainStore::load(MemoryKeyValueStore::new());
    let partner = store.add_user("Partner", "bg-purple-500");
    let mut med = Medicine::new(partner.id.clone(), "Lisinopril", 30, Frequency::Daily);
    med.rate = 0.5;
    med.expiry_date = "2031-03-01".to_string();
    let med_id = med.id.clone();
    store.add_medicine(med);
    store.add_medicine(Medicine::new("1", "Cetirizine", 10, Frequency::AsNeeded));
    store.log_dose(&med_id, DoseAction::Taken);
    store.log_dose(&med_id, DoseAction::Skipped);
    let mut symptom = SymptomLog::new(partner.id.clone(), "dizzy after dose", 6);
    symptom.ai_analysis = Some("possible hypotension".to_string());
    store.add_symptom_log(symptom);
    let before = store.snapshot();

    let reloaded = DomainStore::load(store.into_storage());

    assert_eq!(reloaded.snapshot(), before);
}

#[test]
fn loads_values_written_by_earlier_clients() {
    let storage = MemoryKeyValueStore::with_entries([
        (
            "medikeep_users",
            json!([
                {"id": "1", "name": "Me", "avatarColor": "bg-blue-500"},
                {"id": "1716200000000", "name": "Dad", "avatarColor": "bg-amber-500"}
            ])
            .to_string(),
        ),
        (
            "medikeep_medicines",
            json!([{
                "id": "1716200000123",
                "userId": "1716200000000",
                "name": "Atorvastatin",
                "description": "evening",
                "currentStock": 12,
                "totalStock": 28,
                "lowStockThreshold": 7,
                "expiryDate": "2025-11-30",
                "rate": 0.35,
                "frequency": "Daily",
                "prescriptionImage": "data:image/png;base64,AAAA"
            }])
            .to_string(),
        ),
        (
            "medikeep_doselogs",
            json!([{
                "id": "1716200000999",
                "medicineId": "1716200000123",
                "timestamp": "2024-05-20T10:13:20.999Z",
                "status": "missed"
            }])
            .to_string(),
        ),
    ]);

    let store = DomainStore::load(storage);

    assert_eq!(store.users().len(), 2);
    let med = store.medicine("1716200000123").unwrap();
    assert_eq!(med.user_id, "1716200000000");
    assert_eq!(med.frequency, Frequency::Daily);
    assert_eq!(
        med.prescription_image.as_deref(),
        Some("data:image/png;base64,AAAA")
    );
    assert_eq!(store.dose_logs()[0].status.as_str(), "missed");
    assert!(store.symptom_logs().is_empty());
}

#[test]
fn malformed_collection_falls_back_without_touching_others() {
    let storage = MemoryKeyValueStore::with_entries([
        ("medikeep_users", "{not json".to_string()),
        ("medikeep_medicines", "[]".to_string()),
        (
            "medikeep_symptoms",
            json!([{
                "id": "s1",
                "userId": "1",
                "timestamp": "2024-05-01T08:30:00.000Z",
                "description": "nausea",
                "severity": 4
            }])
            .to_string(),
        ),
        ("medikeep_doselogs", json!([{"id": 3}]).to_string()),
    ]);

    let store = DomainStore::load(storage);

    assert_eq!(store.users().len(), 1);
    assert_eq!(store.users()[0].name, "Me");
    assert!(store.dose_logs().is_empty());
    assert_eq!(store.symptom_logs().len(), 1);
    assert_eq!(
        store.storage().get("medikeep_users").unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn empty_users_fall_back_to_seed_profile() {
    let storage = MemoryKeyValueStore::with_entries([("medikeep_users", json!([]).to_string())]);

    let store = DomainStore::load(storage);

    assert_eq!(store.users().len(), 1);
    assert_eq!(store.users()[0].id, "1");
}

#[test]
fn repeated_user_ids_keep_first_profile() {
    let users = json!([
        {"id": "a", "name": "One", "avatarColor": "x"},
        {"id": "a", "name": "Two", "avatarColor": "y"},
        {"id": "b", "name": "Three", "avatarColor": "z"}
    ]);
    let storage = MemoryKeyValueStore::with_entries([("medikeep_users", users.to_string())]);

    let store = DomainStore::load(storage);

    let names: Vec<_> = store.users().iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["One", "Three"]);
}

#[test]
fn repeated_dose_log_ids_survive_next_mutation() {
    let storage = MemoryKeyValueStore::with_entries([(
        "medikeep_doselogs",
        json!([
            {"id": "1716200000001", "medicineId": "m1", "timestamp": "2024-05-20T10:13:20.001Z", "status": "taken"},
            {"id": "1716200000001", "medicineId": "m1", "timestamp": "2024-05-20T10:13:20.001Z", "status": "skipped"},
            {"id": "1716200000002", "medicineId": "m1", "timestamp": "2024-05-20T10:13:20.002Z", "status": "taken"}
        ])
        .to_string(),
    )]);
    let mut store = DomainStore::load(storage);
    assert_eq!(store.dose_logs().len(), 2);

    store.log_dose("m1", DoseAction::Skipped);

    let persisted = store.storage().get("medikeep_doselogs").unwrap().unwrap();
    let decoded: Vec<DoseLog> = serde_json::from_str(&persisted).unwrap();
    let ids: Vec<_> = decoded.iter().map(|log| log.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], "1716200000001");
    assert_eq!(ids[1], "1716200000002");
    assert_eq!(decoded[0].status, DoseStatus::Taken);
}

#[test]
fn repeated_symptom_log_ids_keep_first_entry() {
    let storage = MemoryKeyValueStore::with_entries([(
        "medikeep_symptoms",
        json!([
            {"id": "s1", "userId": "1", "timestamp": "2024-05-01T08:30:00.000Z", "description": "first", "severity": 3},
            {"id": "s1", "userId": "1", "timestamp": "2024-05-01T08:30:00.000Z", "description": "second", "severity": 4}
        ])
        .to_string(),
    )]);

    let store = DomainStore::load(storage);

    assert_eq!(store.symptom_logs().len(), 1);
    assert_eq!(store.symptom_logs()[0].description, "first");
}

#[test]
fn boxed_storage_works_as_collaborator() {
    let storage: Box<dyn KeyValueStore> = Box::new(MemoryKeyValueStore::new());
    let mut store = DomainStore::load(storage);

    let user = store.add_user("Boxed", "bg-lime-500");

    let persisted = store.storage().get("medikeep_users").unwrap().unwrap();
    assert!(persisted.contains(&user.id));
    let reloaded = DomainStore::load(store.into_storage());
    assert_eq!(reloaded.users().len(), 2);
}

#[test]
fn sqlite_store_wraps_existing_connection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.sqlite3");
    let conn = open_db(&path).unwrap();

    let mut store = DomainStore::load(SqliteKeyValueStore::from_connection(conn));
    store.add_user("Wrapped", "bg-cyan-500");
    drop(store);

    let reopened = DomainStore::load(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.users().len(), 2);
    assert_eq!(reopened.users()[1].name, "Wrapped");
}

#[test]
fn failed_write_for_one_key_does_not_block_others() {
    let storage = FlakyStorage::failing_on("medikeep_doselogs");
    let mut store = DomainStore::load(storage);
    let med = Medicine::new("1", "Amoxicillin", 2, Frequency::TwiceDaily);
    let med_id = med.id.clone();
    store.add_medicine(med);

    store.log_dose(&med_id, DoseAction::Taken);

    assert_eq!(store.dose_logs().len(), 1);
    assert_eq!(store.medicine(&med_id).unwrap().current_stock, 1);
    assert_eq!(store.storage().get("medikeep_doselogs").unwrap(), None);
    let persisted = store.storage().get("medikeep_medicines").unwrap().unwrap();
    let decoded: Vec<Medicine> = serde_json::from_str(&persisted).unwrap();
    assert_eq!(decoded[0].current_stock, 1);
}

#[test]
fn unreadable_storage_loads_defaults() {
    let storage = FlakyStorage {
        entries: BTreeMap::new(),
        failing_key: None,
        reads_fail: true,
    };

    let store = DomainStore::load(storage);

    assert_eq!(store.users().len(), 1);
    assert!(store.medicines().is_empty());
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("household.sqlite3");

    let snapshot = {
        let mut store = DomainStore::load(SqliteKeyValueStore::open(&path).unwrap());
        let user = store.add_user("Sam", "bg-teal-500");
        let med = Medicine::new(user.id.clone(), "Insulin", 5, Frequency::TwiceDaily);
        let med_id = med.id.clone();
        store.add_medicine(med);
        store.log_dose(&med_id, DoseAction::Taken);
        store.add_symptom_log(SymptomLog::new(user.id, "low sugar", 7));
        store.snapshot()
    };

    let reopened = DomainStore::load(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.snapshot(), snapshot);
    assert_eq!(reopened.medicines()[0].current_stock, 4);
}

struct FlakyStorage {
    entries: BTreeMap<String, String>,
    failing_key: Option<&'static str>,
    reads_fail: bool,
}

impl FlakyStorage {
    fn failing_on(key: &'static str) -> Self {
        Self {
            entries: BTreeMap::new(),
            failing_key: Some(key),
            reads_fail: false,
        }
    }
}

impl KeyValueStore for FlakyStorage {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        if self.reads_fail {
            return Err(KvError::Backend("disk unavailable".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        if self.failing_key == Some(key) {
            return Err(KvError::Backend(format!("quota exceeded for {key}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
