//! Medicine inventory model.
//!
//! # Responsibility
//! - Describe one medicine owned by one household profile.
//! - Provide stock arithmetic that never leaves `[0, total_stock]`.
//!
//! # Invariants
//! - `0 <= current_stock <= total_stock`; assignment clamps.
//! - `frequency` is descriptive metadata only.
//! - `user_id` references an existing profile when the medicine is added.

use crate::model::{new_record_id, MedicineId, UserId};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a medicine is meant to be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "Twice Daily")]
    TwiceDaily,
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "As Needed")]
    AsNeeded,
}

impl Frequency {
    /// All frequencies in presentation order.
    pub const ALL: [Self; 4] = [Self::Daily, Self::TwiceDaily, Self::Weekly, Self::AsNeeded];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::TwiceDaily => "Twice Daily",
            Self::Weekly => "Weekly",
            Self::AsNeeded => "As Needed",
        }
    }
}

/// One medicine in a profile's inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    /// Remaining doses.
    pub current_stock: u32,
    /// Stock when the pack was full; upper bound for `current_stock`.
    pub total_stock: u32,
    pub low_stock_threshold: u32,
    /// ISO date (`YYYY-MM-DD`) or full RFC 3339 timestamp. May be empty.
    pub expiry_date: String,
    /// Cost per unit.
    pub rate: f64,
    pub frequency: Frequency,
    /// Base64-encoded image, when a prescription was attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription_image: Option<String>,
}

impl Medicine {
    /// Creates a full-stock medicine with a freshly generated id.
    pub fn new(
        user_id: impl Into<UserId>,
        name: impl Into<String>,
        total_stock: u32,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: new_record_id(),
            user_id: user_id.into(),
            name: name.into(),
            description: String::new(),
            current_stock: total_stock,
            total_stock,
            low_stock_threshold: 0,
            expiry_date: String::new(),
            rate: 0.0,
            frequency,
            prescription_image: None,
        }
    }

    /// Assigns `current_stock`, clamped to `total_stock`.
    pub fn set_current_stock(&mut self, value: u32) {
        self.current_stock = value.min(self.total_stock);
    }

    /// Consumes one unit of stock. Returns `false` when stock was already 0.
    pub fn consume_one(&mut self) -> bool {
        match self.current_stock.checked_sub(1) {
            Some(next) => {
                self.current_stock = next;
                true
            }
            None => false,
        }
    }

    /// Pulls `current_stock` back into `[0, total_stock]` and replaces a
    /// non-finite `rate` with `0.0`.
    ///
    /// Returns whether a correction was needed.
    pub(crate) fn normalize(&mut self) -> bool {
        let mut changed = false;
        if self.current_stock > self.total_stock {
            self.current_stock = self.total_stock;
            changed = true;
        }
        if !self.rate.is_finite() {
            self.rate = 0.0;
            changed = true;
        }
        changed
    }

    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.low_stock_threshold
    }

    /// Remaining stock as a percentage of `total_stock`; `0.0` for an empty pack.
    pub fn stock_percent(&self) -> f64 {
        if self.total_stock == 0 {
            return 0.0;
        }
        f64::from(self.current_stock) / f64::from(self.total_stock) * 100.0
    }

    /// Value of the remaining stock at `rate` per unit.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.current_stock) * self.rate
    }

    /// Parsed expiry date, or `None` when `expiry_date` is empty or unreadable.
    pub fn expiry(&self) -> Option<NaiveDate> {
        let raw = self.expiry_date.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|value| value.date_naive())
            })
    }

    /// Whether the medicine expired before `today`. Unknown expiry is never expired.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry().is_some_and(|expiry| expiry < today)
    }
}
