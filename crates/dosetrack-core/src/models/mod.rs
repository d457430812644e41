//! Domain models for the dosing-state engine.

mod drug_log;
mod medicine;
mod pillbox;
mod resident;

pub use drug_log::*;
pub use medicine::*;
pub use pillbox::*;
pub use resident::*;

use thiserror::Error;

/// Display label for a log entry whose medicine no longer exists.
///
/// Historical entries stay inspectable after their medicine is deleted;
/// dangling references render as this label instead of failing the view.
pub const MEDICINE_REMOVED: &str = "UNKNOWN - Medicine removed!";

/// Validation failures for record saves.
///
/// These block the triggering save action and are surfaced inline;
/// the engine never silently corrects invalid input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Drug name is required")]
    EmptyDrugName,

    #[error("First and last name are required")]
    EmptyResidentName,

    #[error("{field} must be fully populated or fully empty")]
    PartialDate { field: &'static str },

    #[error("{field} is not a real calendar date")]
    InvalidDate { field: &'static str },

    #[error("{field} may not be in the future")]
    FutureDate { field: &'static str },

    #[error("A non-OTC medicine must belong to a resident")]
    MissingResident,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Outcome of an edit dialog, reported back to the host.
///
/// Replaces the pattern of signalling a delete by negating the record's id:
/// the host matches on the variant instead of inspecting the id's sign.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome<T> {
    /// The record should be created or updated.
    Saved(T),
    /// The record with this id should be deleted.
    Deleted(i64),
    /// The edit was abandoned; nothing changes.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_outcome_variants() {
        let saved: EditOutcome<&str> = EditOutcome::Saved("record");
        let deleted: EditOutcome<&str> = EditOutcome::Deleted(42);

        assert!(matches!(saved, EditOutcome::Saved("record")));
        assert!(matches!(deleted, EditOutcome::Deleted(42)));
        assert!(matches!(
            EditOutcome::<&str>::Cancelled,
            EditOutcome::Cancelled
        ));
    }
}
