//! Resident models.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::temporal::{is_future_date, split_date, SplitDate};

use super::{ValidationError, ValidationResult};

/// A resident of the care facility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resident {
    /// Primary key - null until first save
    pub id: Option<i64>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Nickname (optional, shown quoted after the full name)
    pub nickname: String,
    /// Date of birth, year part
    pub dob_year: String,
    /// Date of birth, month part
    pub dob_month: String,
    /// Date of birth, day part
    pub dob_day: String,
    /// Free-form notes
    pub notes: String,
    /// Creation timestamp (set by the backend)
    pub created: Option<DateTime<Utc>>,
    /// Last update timestamp (set by the backend)
    pub updated: Option<DateTime<Utc>>,
    /// Soft-delete timestamp; set when the resident is trashed
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Resident {
    /// Create a new resident with required fields.
    pub fn new(first_name: String, last_name: String) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            nickname: String::new(),
            dob_year: String::new(),
            dob_month: String::new(),
            dob_day: String::new(),
            notes: String::new(),
            created: None,
            updated: None,
            deleted_at: None,
        }
    }

    /// Full display name: "First Last" plus the quoted nickname if any.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        if self.nickname.trim().is_empty() {
            name
        } else {
            format!("{} \"{}\"", name, self.nickname.trim())
        }
    }

    /// Check if this resident has been soft-deleted.
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check whether another record describes the same person.
    ///
    /// Identity is first/last name (case-insensitive) plus date of birth;
    /// a trashed resident matching a new one is reactivated instead of
    /// duplicated.
    pub fn matches_identity(&self, other: &Resident) -> bool {
        self.first_name.trim().eq_ignore_ascii_case(other.first_name.trim())
            && self.last_name.trim().eq_ignore_ascii_case(other.last_name.trim())
            && self.dob_year.trim() == other.dob_year.trim()
            && self.dob_month.trim() == other.dob_month.trim()
            && self.dob_day.trim() == other.dob_day.trim()
    }

    /// Validate the record before a save.
    ///
    /// Names must be non-empty and the date of birth must be a real,
    /// non-future calendar date with all three parts populated.
    pub fn validate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ValidationResult<()> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(ValidationError::EmptyResidentName);
        }
        match split_date(&self.dob_year, &self.dob_month, &self.dob_day) {
            SplitDate::Valid(date) => {
                if is_future_date(date, now) {
                    Err(ValidationError::FutureDate {
                        field: "Date of birth",
                    })
                } else {
                    Ok(())
                }
            }
            SplitDate::Invalid => Err(ValidationError::InvalidDate {
                field: "Date of birth",
            }),
            SplitDate::Empty | SplitDate::Partial => Err(ValidationError::PartialDate {
                field: "Date of birth",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_resident() -> Resident {
        let mut resident = Resident::new("Ada".into(), "Lovelace".into());
        resident.dob_year = "1950".into();
        resident.dob_month = "12".into();
        resident.dob_day = "10".into();
        resident
    }

    #[test]
    fn test_full_name() {
        let mut resident = make_resident();
        assert_eq!(resident.full_name(), "Ada Lovelace");

        resident.nickname = "Addie".into();
        assert_eq!(resident.full_name(), "Ada Lovelace \"Addie\"");
    }

    #[test]
    fn test_matches_identity() {
        let resident = make_resident();
        let mut same = make_resident();
        same.id = Some(99);
        same.first_name = "ADA".into();
        same.deleted_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(resident.matches_identity(&same));

        let mut different = make_resident();
        different.dob_day = "11".into();
        assert!(!resident.matches_identity(&different));
    }

    #[test]
    fn test_validate() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();

        assert!(make_resident().validate(&now).is_ok());

        let mut no_name = make_resident();
        no_name.last_name = "  ".into();
        assert_eq!(
            no_name.validate(&now),
            Err(ValidationError::EmptyResidentName)
        );

        let mut partial = make_resident();
        partial.dob_day = String::new();
        assert!(matches!(
            partial.validate(&now),
            Err(ValidationError::PartialDate { .. })
        ));

        let mut future = make_resident();
        future.dob_year = "2030".into();
        assert!(matches!(
            future.validate(&now),
            Err(ValidationError::FutureDate { .. })
        ));
    }
}
