//! Dose-log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single medication administration event.
///
/// Entries are created when a dose is logged (directly or through a
/// pillbox) and are never mutated afterwards except through an explicit
/// edit of notes/timestamps or a deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugLogEntry {
    /// Primary key - null until first save
    pub id: Option<i64>,
    /// The resident this dose was given to
    pub resident_id: i64,
    /// The medicine that was administered
    pub medicine_id: i64,
    /// Free text; by convention encodes the dose amount (pill count)
    pub notes: Option<String>,
    /// When the dose was signed out of the facility
    pub checked_out: Option<DateTime<Utc>>,
    /// When the dose was signed back in
    pub checked_in: Option<DateTime<Utc>>,
    /// Source pillbox slot when the entry came from a pillbox log action
    pub pillbox_item_id: Option<i64>,
    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
    /// Last update timestamp
    pub updated: Option<DateTime<Utc>>,
}

impl DrugLogEntry {
    /// Create a new unlogged entry for a resident/medicine pair.
    pub fn new(resident_id: i64, medicine_id: i64) -> Self {
        Self {
            id: None,
            resident_id,
            medicine_id,
            notes: None,
            checked_out: None,
            checked_in: None,
            pillbox_item_id: None,
            created: None,
            updated: None,
        }
    }

    /// Create an entry with the dose amount encoded in the notes,
    /// matching the quick "Log 1...4" action.
    pub fn with_amount(resident_id: i64, medicine_id: i64, amount: u32) -> Self {
        let mut entry = Self::new(resident_id, medicine_id);
        entry.notes = Some(amount.to_string());
        entry
    }

    /// Check if this dose is currently checked out of the facility
    /// (signed out, not yet signed back in).
    pub fn is_checked_out(&self) -> bool {
        self.checked_out.is_some() && self.checked_in.is_none()
    }
}
