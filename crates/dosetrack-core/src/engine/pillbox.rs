//! Pillbox state tracking and batch log construction.
//!
//! A pillbox's state is derived, never stored: it is recomputed from the
//! dose-log snapshot every time the log is read, so a new calendar day
//! flips `LoggedToday` back to `Loaded` with no stored transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DrugLogEntry, Medicine, Pillbox, PillboxItem, MEDICINE_REMOVED};
use crate::sort::{multi_sort, SortCriterion, SortDirection};
use crate::temporal::is_same_day;

/// Pillbox logging errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PillboxError {
    #[error("Pillbox has not been saved yet")]
    Unsaved,

    #[error("Pillbox \"{0}\" has no loaded slots")]
    Empty(String),

    #[error("Pillbox \"{0}\" has already been logged today")]
    AlreadyLoggedToday(String),

    #[error("Medicine {0} no longer exists in the catalog")]
    UnknownMedicine(i64),

    #[error("Medicine {medicine_id} does not belong to resident {resident_id}")]
    ForeignMedicine { medicine_id: i64, resident_id: i64 },
}

pub type PillboxResult<T> = Result<T, PillboxError>;

/// Derived pillbox state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PillboxState {
    /// No slot holds any pills
    Empty,
    /// At least one loaded slot, not all logged today
    Loaded,
    /// Every loaded slot has a same-day log entry
    LoggedToday,
}

/// A display line for one pillbox slot that was logged today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PillboxLineItem {
    /// The source slot
    pub pillbox_item_id: Option<i64>,
    /// The slot's medicine
    pub medicine_id: i64,
    /// Medicine name, or the removed-medicine fallback label
    pub drug: String,
    /// Medicine strength
    pub strength: Option<String>,
    /// Whether the medicine is still active
    pub active: bool,
    /// Pill count loaded in the slot
    pub quantity: u32,
    /// Notes from the log entry
    pub notes: Option<String>,
    /// When the slot was logged
    pub logged_at: Option<DateTime<Utc>>,
}

/// The slots of a pillbox that currently hold pills.
pub fn loaded_items<'a>(pillbox_id: i64, items: &'a [PillboxItem]) -> Vec<&'a PillboxItem> {
    items
        .iter()
        .filter(|item| item.pillbox_id == pillbox_id && item.is_loaded())
        .collect()
}

/// Find the log entry created today for a given slot, if any.
///
/// A slot counts as logged only when the entry references both the slot id
/// and the slot's medicine: entries surviving a slot re-assignment to a
/// different medicine do not count.
fn same_day_entry<'a>(
    item: &PillboxItem,
    dose_log: &'a [DrugLogEntry],
    now: &DateTime<Utc>,
) -> Option<&'a DrugLogEntry> {
    dose_log.iter().find(|entry| {
        entry.pillbox_item_id == item.id
            && entry.pillbox_item_id.is_some()
            && entry.medicine_id == item.medicine_id
            && entry
                .updated
                .map(|updated| is_same_day(&updated, now))
                .unwrap_or(false)
    })
}

/// Derive the current state of a pillbox from its slots and the dose log.
pub fn pillbox_state(
    pillbox: &Pillbox,
    items: &[PillboxItem],
    dose_log: &[DrugLogEntry],
    now: &DateTime<Utc>,
) -> PillboxState {
    let Some(pillbox_id) = pillbox.id else {
        return PillboxState::Empty;
    };
    let loaded = loaded_items(pillbox_id, items);
    if loaded.is_empty() {
        return PillboxState::Empty;
    }
    if loaded
        .iter()
        .all(|item| same_day_entry(item, dose_log, now).is_some())
    {
        PillboxState::LoggedToday
    } else {
        PillboxState::Loaded
    }
}

/// The "already given today" view of a pillbox: one line per loaded slot
/// with a same-day log entry, cross-referenced against the catalog.
///
/// Sorted by quantity ascending then drug name descending, matching the
/// pillbox log display. Slots whose medicine was deleted render with the
/// fallback label rather than being dropped.
pub fn logged_line_items(
    pillbox: &Pillbox,
    items: &[PillboxItem],
    medicines: &[Medicine],
    dose_log: &[DrugLogEntry],
    now: &DateTime<Utc>,
) -> Vec<PillboxLineItem> {
    let Some(pillbox_id) = pillbox.id else {
        return Vec::new();
    };

    let lines: Vec<PillboxLineItem> = loaded_items(pillbox_id, items)
        .into_iter()
        .filter_map(|item| {
            let entry = same_day_entry(item, dose_log, now)?;
            let medicine = medicines.iter().find(|med| med.id == Some(item.medicine_id));
            Some(PillboxLineItem {
                pillbox_item_id: item.id,
                medicine_id: item.medicine_id,
                drug: medicine
                    .map(|med| med.drug.clone())
                    .unwrap_or_else(|| MEDICINE_REMOVED.to_string()),
                strength: medicine.and_then(|med| med.strength.clone()),
                active: medicine.map(|med| med.active).unwrap_or(false),
                quantity: item.quantity,
                notes: entry.notes.clone(),
                logged_at: entry.updated,
            })
        })
        .collect();

    multi_sort(
        &lines,
        &[
            SortCriterion::by_key(|line: &PillboxLineItem| line.quantity, SortDirection::Ascending),
            SortCriterion::by_key(
                |line: &PillboxLineItem| line.drug.clone(),
                SortDirection::Descending,
            ),
        ],
    )
}

/// Build the batch of log entries for a "log pillbox" action.
///
/// One entry per loaded slot that has not already been logged today; each
/// entry carries the slot id and encodes the slot quantity in its notes.
/// Fails fast before producing anything:
/// - `Empty` when no slot is loaded,
/// - `AlreadyLoggedToday` when every loaded slot has a same-day entry
///   (repeating the action on the same day is an error, not a re-log),
/// - `UnknownMedicine`/`ForeignMedicine` when a slot references a medicine
///   that is gone or belongs to a different resident.
///
/// Slots already logged today are skipped, so re-running after a partial
/// failure creates only the missing entries and never duplicates a slot.
pub fn log_pillbox(
    pillbox: &Pillbox,
    items: &[PillboxItem],
    medicines: &[Medicine],
    dose_log: &[DrugLogEntry],
    now: &DateTime<Utc>,
) -> PillboxResult<Vec<DrugLogEntry>> {
    let pillbox_id = pillbox.id.ok_or(PillboxError::Unsaved)?;

    let loaded = loaded_items(pillbox_id, items);
    if loaded.is_empty() {
        return Err(PillboxError::Empty(pillbox.name.clone()));
    }

    for item in &loaded {
        let medicine = medicines
            .iter()
            .find(|med| med.id == Some(item.medicine_id))
            .ok_or(PillboxError::UnknownMedicine(item.medicine_id))?;
        if !medicine.belongs_to(pillbox.resident_id) {
            return Err(PillboxError::ForeignMedicine {
                medicine_id: item.medicine_id,
                resident_id: pillbox.resident_id,
            });
        }
    }

    let pending: Vec<&PillboxItem> = loaded
        .into_iter()
        .filter(|item| same_day_entry(item, dose_log, now).is_none())
        .collect();
    if pending.is_empty() {
        return Err(PillboxError::AlreadyLoggedToday(pillbox.name.clone()));
    }

    Ok(pending
        .into_iter()
        .map(|item| {
            let mut entry =
                DrugLogEntry::with_amount(pillbox.resident_id, item.medicine_id, item.quantity);
            entry.pillbox_item_id = item.id;
            entry.created = Some(*now);
            entry.updated = Some(*now);
            entry
        })
        .collect())
}

/// Deterministic replacement after deleting the active pillbox: the first
/// remaining pillbox in list order, or none.
pub fn next_active_pillbox(deleted_id: i64, pillboxes: &[Pillbox]) -> Option<&Pillbox> {
    pillboxes.iter().find(|pb| pb.id != Some(deleted_id))
}
