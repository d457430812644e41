//! Checkout ledger: doses signed out of the facility and not yet returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DrugLogEntry, Medicine, Resident, MEDICINE_REMOVED};
use crate::sort::{multi_sort, SortCriterion, SortDirection};

/// The doses currently checked out: `checked_out` set, `checked_in` unset.
///
/// Ordered by checkout time ascending. Derived from the snapshot on every
/// call; callers must not cache the result across log changes.
pub fn checked_out_doses(dose_log: &[DrugLogEntry]) -> Vec<DrugLogEntry> {
    let out: Vec<DrugLogEntry> = dose_log
        .iter()
        .filter(|entry| entry.is_checked_out())
        .cloned()
        .collect();
    multi_sort(
        &out,
        &[SortCriterion::by_key(
            |entry: &DrugLogEntry| entry.checked_out,
            SortDirection::Ascending,
        )],
    )
}

/// Printable medication sign-out sheet for one resident.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSheet {
    /// Resident's full display name
    pub resident_name: String,
    /// When the sheet was produced
    pub generated_at: DateTime<Utc>,
    /// One line per checked-out dose
    pub line_items: Vec<CheckoutLineItem>,
}

/// One checked-out dose on the sign-out sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    /// Medicine display name, or the removed-medicine fallback label
    pub drug: String,
    /// When the dose was signed out
    pub checked_out: Option<DateTime<Utc>>,
    /// Entry notes (dose amount by convention)
    pub notes: Option<String>,
}

impl CheckoutSheet {
    /// Build the sheet from a resident's checked-out doses.
    ///
    /// Entries whose medicine is missing from the catalog render with the
    /// fallback label; historical entries stay printable after their
    /// medicine is deleted.
    pub fn build(
        resident: &Resident,
        checkout: &[DrugLogEntry],
        medicines: &[Medicine],
        now: &DateTime<Utc>,
    ) -> Self {
        let line_items = checkout
            .iter()
            .map(|entry| {
                let drug = medicines
                    .iter()
                    .find(|med| med.id == Some(entry.medicine_id))
                    .map(|med| med.display_name())
                    .unwrap_or_else(|| MEDICINE_REMOVED.to_string());
                CheckoutLineItem {
                    drug,
                    checked_out: entry.checked_out,
                    notes: entry.notes.clone(),
                }
            })
            .collect();

        Self {
            resident_name: resident.full_name(),
            generated_at: *now,
            line_items,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("resident,drug,checked_out,notes\n");
        for item in &self.line_items {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                escape_csv(&self.resident_name),
                escape_csv(&item.drug),
                item.checked_out
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                escape_csv(item.notes.as_deref().unwrap_or("")),
            ));
        }
        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap()
    }

    fn entry(id: i64, out: Option<DateTime<Utc>>, back: Option<DateTime<Utc>>) -> DrugLogEntry {
        let mut e = DrugLogEntry::new(1, 7);
        e.id = Some(id);
        e.checked_out = out;
        e.checked_in = back;
        e
    }

    #[test]
    fn test_checked_out_partition() {
        let log = vec![
            entry(1, Some(at(10)), None),
            entry(2, Some(at(8)), Some(at(9))), // Returned: excluded
            entry(3, None, None),               // Never out: excluded
            entry(4, Some(at(6)), None),
        ];

        let out = checked_out_doses(&log);
        assert_eq!(out.len(), 2);
        // Ordered by checkout time ascending regardless of input order
        assert_eq!(out[0].id, Some(4));
        assert_eq!(out[1].id, Some(1));
    }

    #[test]
    fn test_empty_log() {
        assert!(checked_out_doses(&[]).is_empty());
    }

    #[test]
    fn test_sheet_falls_back_for_removed_medicine() {
        let mut resident = Resident::new("Ada".into(), "Lovelace".into());
        resident.id = Some(1);

        let mut med = Medicine::new("Aspirin".into(), Some(1));
        med.id = Some(7);
        med.strength = Some("81 MG".into());

        let mut dangling = entry(2, Some(at(11)), None);
        dangling.medicine_id = 99; // No such medicine

        let checkout = vec![entry(1, Some(at(10)), None), dangling];
        let sheet = CheckoutSheet::build(&resident, &checkout, &[med], &at(12));

        assert_eq!(sheet.resident_name, "Ada Lovelace");
        assert_eq!(sheet.line_items.len(), 2);
        assert_eq!(sheet.line_items[0].drug, "Aspirin 81 MG");
        assert_eq!(sheet.line_items[1].drug, MEDICINE_REMOVED);
    }

    #[test]
    fn test_sheet_csv() {
        let resident = Resident::new("Ada".into(), "Lovelace".into());
        let mut med = Medicine::new("Prednisone, taper".into(), Some(1));
        med.id = Some(7);

        let mut e = entry(1, Some(at(10)), None);
        e.notes = Some("2".into());
        let sheet = CheckoutSheet::build(&resident, &[e], &[med], &at(12));

        let csv = sheet.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2); // Header + 1 item
        assert!(lines[0].starts_with("resident,drug"));
        // Comma in the drug name is quoted
        assert!(lines[1].contains("\"Prednisone, taper\""));
    }

    #[test]
    fn test_sheet_json() {
        let resident = Resident::new("Ada".into(), "Lovelace".into());
        let sheet = CheckoutSheet::build(&resident, &[], &[], &at(12));
        let json = sheet.to_json().unwrap();
        assert!(json.contains("Ada Lovelace"));
    }
}
