//! Symptom observation model.

use crate::model::{new_record_id, now_timestamp, SymptomLogId, UserId};
use serde::{Deserialize, Serialize};

/// Lowest accepted severity.
pub const SEVERITY_MIN: u8 = 1;
/// Highest accepted severity.
pub const SEVERITY_MAX: u8 = 10;

/// One free-form symptom observation for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomLog {
    pub id: SymptomLogId,
    /// Non-owning; may dangle after the profile is deleted.
    pub user_id: UserId,
    pub timestamp: String,
    pub description: String,
    /// 1 (mild) to 10 (severe).
    pub severity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

impl SymptomLog {
    /// Creates an observation stamped with the current time.
    pub fn new(user_id: impl Into<UserId>, description: impl Into<String>, severity: u8) -> Self {
        Self {
            id: new_record_id(),
            user_id: user_id.into(),
            timestamp: now_timestamp(),
            description: description.into(),
            severity: clamp_severity(severity),
            ai_analysis: None,
        }
    }

    /// Pulls `severity` into range. Returns whether a correction was needed.
    pub(crate) fn normalize_severity(&mut self) -> bool {
        let clamped = clamp_severity(self.severity);
        let changed = clamped != self.severity;
        self.severity = clamped;
        changed
    }
}

pub fn clamp_severity(value: u8) -> u8 {
    value.clamp(SEVERITY_MIN, SEVERITY_MAX)
}
