//! JSON codec for persisted collections.
//!
//! # Responsibility
//! - Serialize a whole collection into one self-describing text value.
//! - Decode text back into a validated typed collection.
//!
//! # Invariants
//! - Decoding never trusts shape alone: collection-specific rules must hold.
//! - Repeated ids keep their first record; later copies are dropped.
//! - Clampable fields are normalized instead of rejected.

use crate::model::dose_log::DoseLog;
use crate::model::medicine::Medicine;
use crate::model::symptom_log::SymptomLog;
use crate::model::user::User;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Persisted value could not be turned into a valid collection.
#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    /// Collection must hold at least one record but decoded empty.
    Empty,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Empty => write!(f, "collection must not be empty"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Record shape stored in one persisted collection.
pub trait PersistedRecord: Serialize + DeserializeOwned {
    /// Whether an empty collection is invalid.
    const REQUIRE_NON_EMPTY: bool = false;

    fn record_id(&self) -> &str;

    /// Repairs clampable fields. Returns whether anything changed.
    fn normalize(&mut self) -> bool {
        false
    }
}

impl PersistedRecord for User {
    const REQUIRE_NON_EMPTY: bool = true;

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl PersistedRecord for Medicine {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) -> bool {
        Medicine::normalize(self)
    }
}

impl PersistedRecord for DoseLog {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl PersistedRecord for SymptomLog {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn normalize(&mut self) -> bool {
        self.normalize_severity()
    }
}

/// Successfully decoded collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// Records in persisted order.
    pub items: Vec<T>,
    /// How many records needed clamping or were dropped as repeated ids.
    pub normalized: usize,
}

/// Serializes a full collection.
pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decodes and validates a full collection.
pub fn decode_collection<T: PersistedRecord>(text: &str) -> DecodeResult<Decoded<T>> {
    let parsed: Vec<T> = serde_json::from_str(text)?;

    if T::REQUIRE_NON_EMPTY && parsed.is_empty() {
        return Err(DecodeError::Empty);
    }

    let parsed_len = parsed.len();
    let mut seen = HashSet::with_capacity(parsed_len);
    let mut items: Vec<T> = parsed
        .into_iter()
        .filter(|item| seen.insert(item.record_id().to_string()))
        .collect();
    let dropped = parsed_len - items.len();

    let clamped = items
        .iter_mut()
        .map(|item| item.normalize())
        .filter(|changed| *changed)
        .count();

    Ok(Decoded {
        items,
        normalized: dropped + clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, encode_collection, DecodeError};
    use crate::model::dose_log::DoseLog;
    use crate::model::medicine::Medicine;
    use crate::model::symptom_log::SymptomLog;
    use crate::model::user::User;
    use serde_json::json;

    #[test]
    fn users_must_not_be_empty() {
        let err = decode_collection::<User>("[]").unwrap_err();
        assert!(matches!(err, DecodeError::Empty));
    }

    #[test]
    fn empty_medicines_are_valid() {
        let decoded = decode_collection::<Medicine>("[]").unwrap();
        assert!(decoded.items.is_empty());
    }

    #[test]
    fn repeated_ids_keep_first_record() {
        let text = json!([
            {"id": "1", "name": "Me", "avatarColor": "bg-blue-500"},
            {"id": "1", "name": "Twin", "avatarColor": "bg-red-500"},
            {"id": "2", "name": "Kid", "avatarColor": "bg-green-500"}
        ])
        .to_string();
        let decoded = decode_collection::<User>(&text).unwrap();
        let names: Vec<_> = decoded.items.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, vec!["Me", "Kid"]);
        assert_eq!(decoded.normalized, 1);
    }

    #[test]
    fn repeated_dose_log_ids_keep_history() {
        let text = json!([
            {"id": "1716200000001", "medicineId": "m1", "timestamp": "2024-05-20T10:13:20.001Z", "status": "taken"},
            {"id": "1716200000001", "medicineId": "m2", "timestamp": "2024-05-20T10:13:20.001Z", "status": "skipped"},
            {"id": "1716200000002", "medicineId": "m1", "timestamp": "2024-05-20T10:13:20.002Z", "status": "taken"}
        ])
        .to_string();
        let decoded = decode_collection::<DoseLog>(&text).unwrap();
        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.items[0].medicine_id, "m1");
        assert_eq!(decoded.normalized, 1);
    }

    #[test]
    fn wrong_shape_is_a_json_error() {
        let err = decode_collection::<User>(r#"{"id":"1"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
        assert!(err.to_string().starts_with("invalid JSON"));
    }

    #[test]
    fn stock_above_total_is_clamped() {
        let text = json!([{
            "id": "m1",
            "userId": "1",
            "name": "Aspirin",
            "description": "",
            "currentStock": 40,
            "totalStock": 30,
            "lowStockThreshold": 5,
            "expiryDate": "2030-01-01",
            "rate": 0.25,
            "frequency": "Twice Daily"
        }])
        .to_string();
        let decoded = decode_collection::<Medicine>(&text).unwrap();
        assert_eq!(decoded.normalized, 1);
        assert_eq!(decoded.items[0].current_stock, 30);
    }

    #[test]
    fn severity_out_of_range_is_clamped() {
        let text = json!([{
            "id": "s1",
            "userId": "1",
            "timestamp": "2024-05-01T08:30:00.000Z",
            "description": "dizzy",
            "severity": 0
        }])
        .to_string();
        let decoded = decode_collection::<SymptomLog>(&text).unwrap();
        assert_eq!(decoded.normalized, 1);
        assert_eq!(decoded.items[0].severity, 1);
        assert_eq!(decoded.items[0].ai_analysis, None);
    }

    #[test]
    fn encode_then_decode_preserves_order() {
        let users = vec![User::new("Ann", "bg-red-500"), User::new("Bo", "bg-green-500")];
        let text = encode_collection(&users).unwrap();
        let decoded = decode_collection::<User>(&text).unwrap();
        assert_eq!(decoded.items, users);
        assert_eq!(decoded.normalized, 0);
    }
}
