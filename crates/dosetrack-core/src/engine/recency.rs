//! Dose recency: how long ago was a drug last given, and how urgent is it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::DrugLogEntry;
use crate::temporal::hours_since;

/// Hours elapsed since the last dose of a medicine, or `None` if the log
/// holds no entry for it.
///
/// "Last" means the entry with the greatest `updated` timestamp; when two
/// entries share a timestamp the one with the larger id wins, preferring
/// the most recently created record. Entries without an `updated`
/// timestamp are ignored.
pub fn last_dose_hours(
    medicine_id: i64,
    dose_log: &[DrugLogEntry],
    now: &DateTime<Utc>,
) -> Option<f64> {
    dose_log
        .iter()
        .filter(|entry| entry.medicine_id == medicine_id)
        .filter_map(|entry| entry.updated.map(|updated| (updated, entry.id)))
        .max_by_key(|(updated, id)| (*updated, *id))
        .map(|(updated, _)| hours_since(&updated, now))
}

/// Urgency classification of a last-dose interval.
///
/// Drives the dosing-status color coding. The numeric buckets at 4 and 8
/// hours are the contract; exactly 4 hours is `Elevated`, exactly 8 is
/// `Normal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UrgencyLevel {
    /// No dose on record
    Unknown,
    /// Given less than 4 hours ago - too soon to repeat
    Immediate,
    /// Given 4 to 8 hours ago
    Elevated,
    /// Given 8 or more hours ago - safe to give
    Normal,
}

impl UrgencyLevel {
    /// Classify an elapsed-hours value.
    pub fn from_hours(hours: Option<f64>) -> Self {
        match hours {
            None => UrgencyLevel::Unknown,
            Some(h) if h < 4.0 => UrgencyLevel::Immediate,
            Some(h) if h < 8.0 => UrgencyLevel::Elevated,
            Some(_) => UrgencyLevel::Normal,
        }
    }

    /// Bootstrap-style badge variant used by the hosting UI.
    pub fn badge_variant(&self) -> &'static str {
        match self {
            UrgencyLevel::Unknown => "light",
            UrgencyLevel::Immediate => "danger",
            UrgencyLevel::Elevated => "warning",
            UrgencyLevel::Normal => "primary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(id: i64, medicine_id: i64, updated: Option<DateTime<Utc>>) -> DrugLogEntry {
        let mut e = DrugLogEntry::new(1, medicine_id);
        e.id = Some(id);
        e.updated = updated;
        e
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_no_matching_entries() {
        let now = at(12, 0);
        let log = vec![entry(1, 99, Some(at(8, 0)))];
        assert_eq!(last_dose_hours(7, &log, &now), None);
        assert_eq!(last_dose_hours(7, &[], &now), None);
    }

    #[test]
    fn test_most_recent_entry_wins() {
        let now = at(12, 0);
        let log = vec![
            entry(1, 7, Some(at(6, 0))),
            entry(2, 7, Some(at(10, 0))),
            entry(3, 7, Some(at(8, 0))),
            entry(4, 99, Some(at(11, 0))),
        ];
        let hours = last_dose_hours(7, &log, &now).unwrap();
        assert!((hours - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_timestamp_tie_broken_by_larger_id() {
        let now = at(12, 0);
        // Same `updated`; the larger id is the more recently created record
        let log = vec![entry(5, 7, Some(at(9, 0))), entry(6, 7, Some(at(9, 0)))];
        let hours = last_dose_hours(7, &log, &now).unwrap();
        assert!((hours - 3.0).abs() < 1e-9);

        // Order in the input does not matter
        let reversed: Vec<_> = log.into_iter().rev().collect();
        let hours = last_dose_hours(7, &reversed, &now).unwrap();
        assert!((hours - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_entries_without_updated_are_ignored() {
        let now = at(12, 0);
        let log = vec![entry(1, 7, None)];
        assert_eq!(last_dose_hours(7, &log, &now), None);
    }

    #[test]
    fn test_dose_just_given() {
        let now = at(12, 0);
        let log = vec![entry(1, 7, Some(now))];
        assert_eq!(last_dose_hours(7, &log, &now), Some(0.0));
        assert_eq!(
            UrgencyLevel::from_hours(Some(0.0)),
            UrgencyLevel::Immediate
        );
    }

    #[test]
    fn test_urgency_boundaries() {
        assert_eq!(UrgencyLevel::from_hours(None), UrgencyLevel::Unknown);
        assert_eq!(
            UrgencyLevel::from_hours(Some(3.99)),
            UrgencyLevel::Immediate
        );
        // Exactly 4 hours is not highest-urgency
        assert_eq!(UrgencyLevel::from_hours(Some(4.0)), UrgencyLevel::Elevated);
        assert_eq!(UrgencyLevel::from_hours(Some(7.99)), UrgencyLevel::Elevated);
        // Exactly 8 hours is normal
        assert_eq!(UrgencyLevel::from_hours(Some(8.0)), UrgencyLevel::Normal);
        assert_eq!(UrgencyLevel::from_hours(Some(48.0)), UrgencyLevel::Normal);
    }

    #[test]
    fn test_badge_variants() {
        assert_eq!(UrgencyLevel::Unknown.badge_variant(), "light");
        assert_eq!(UrgencyLevel::Immediate.badge_variant(), "danger");
        assert_eq!(UrgencyLevel::Elevated.badge_variant(), "warning");
        assert_eq!(UrgencyLevel::Normal.badge_variant(), "primary");
    }
}
