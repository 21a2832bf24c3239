//! Household profile model.

use crate::model::{new_record_id, UserId};
use serde::{Deserialize, Serialize};

/// Identifier of the profile seeded on first launch.
pub const SEED_USER_ID: &str = "1";
/// Display name of the profile seeded on first launch.
pub const SEED_USER_NAME: &str = "Me";
/// Avatar color token of the profile seeded on first launch.
pub const SEED_USER_AVATAR_COLOR: &str = "bg-blue-500";

/// One person in the household whose medicines are tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Presentation color token, stored verbatim.
    pub avatar_color: String,
}

impl User {
    /// Creates a profile with a freshly generated id.
    ///
    /// Empty `name` or `avatar_color` is accepted; blocking it is a
    /// presentation concern.
    pub fn new(name: impl Into<String>, avatar_color: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            avatar_color: avatar_color.into(),
        }
    }

    /// Returns the single-profile list used when nothing valid is persisted.
    pub fn seed_profiles() -> Vec<Self> {
        vec![Self {
            id: SEED_USER_ID.to_string(),
            name: SEED_USER_NAME.to_string(),
            avatar_color: SEED_USER_AVATAR_COLOR.to_string(),
        }]
    }
}
