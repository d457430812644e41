//! Pillbox models.

use serde::{Deserialize, Serialize};

/// A pre-filled multi-drug dose container, logged as a single batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pillbox {
    /// Primary key - null until first save
    pub id: Option<i64>,
    /// Owning resident
    pub resident_id: i64,
    /// Display name (shown uppercased in the UI)
    pub name: String,
    /// Free-form notes
    pub notes: Option<String>,
}

impl Pillbox {
    /// Create a new pillbox for a resident.
    pub fn new(resident_id: i64, name: String) -> Self {
        Self {
            id: None,
            resident_id,
            name,
            notes: None,
        }
    }
}

/// A (pillbox, medicine) slot holding a pill count.
///
/// The medicine must belong to the same resident as the pillbox (or be
/// OTC). A quantity of 0 means the slot is empty; the unsigned type rules
/// out negative counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PillboxItem {
    /// Primary key - null until first save
    pub id: Option<i64>,
    /// Owning resident (same as the pillbox's)
    pub resident_id: i64,
    /// The pillbox this slot belongs to
    pub pillbox_id: i64,
    /// The medicine loaded into this slot
    pub medicine_id: i64,
    /// Number of pills currently loaded
    pub quantity: u32,
}

impl PillboxItem {
    /// Create a slot with a single pill loaded.
    pub fn new(resident_id: i64, pillbox_id: i64, medicine_id: i64) -> Self {
        Self {
            id: None,
            resident_id,
            pillbox_id,
            medicine_id,
            quantity: 1,
        }
    }

    /// Check if this slot currently holds any pills.
    pub fn is_loaded(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_loaded() {
        let item = PillboxItem::new(1, 2, 3);
        assert_eq!(item.quantity, 1);
        assert!(item.is_loaded());

        let mut empty = item.clone();
        empty.quantity = 0;
        assert!(!empty.is_loaded());
    }
}
