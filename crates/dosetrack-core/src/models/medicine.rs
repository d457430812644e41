//! Medicine models.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::temporal::{is_future_date, split_date, SplitDate};

use super::{ValidationError, ValidationResult};

/// A prescription or over-the-counter medicine.
///
/// A medicine belongs to exactly one resident unless `otc` is true; OTC
/// medicines are shared across all residents and editing one affects
/// every resident's derived state on the next reload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Primary key - null until first save
    pub id: Option<i64>,
    /// Owning resident; null only for OTC medicines
    pub resident_id: Option<i64>,
    /// Drug name
    pub drug: String,
    /// Alternative/brand names, free text
    pub other_names: String,
    /// Strength (e.g., "100 MG")
    pub strength: Option<String>,
    /// Administration directions
    pub directions: Option<String>,
    /// Barcode for scan lookup
    pub barcode: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Whether this medicine is currently being administered
    pub active: bool,
    /// Over-the-counter flag; OTC medicines are shared across residents
    pub otc: bool,
    /// Last fill date, year part (all three parts populated or all empty)
    pub fill_date_year: String,
    /// Last fill date, month part
    pub fill_date_month: String,
    /// Last fill date, day part
    pub fill_date_day: String,
}

impl Medicine {
    /// Create a new medicine with required fields.
    pub fn new(drug: String, resident_id: Option<i64>) -> Self {
        Self {
            id: None,
            resident_id,
            drug,
            other_names: String::new(),
            strength: None,
            directions: None,
            barcode: None,
            notes: None,
            active: true,
            otc: false,
            fill_date_year: String::new(),
            fill_date_month: String::new(),
            fill_date_day: String::new(),
        }
    }

    /// Display name: "Drug Strength".
    pub fn display_name(&self) -> String {
        match self.strength.as_deref() {
            Some(strength) if !strength.trim().is_empty() => {
                format!("{} {}", self.drug, strength.trim())
            }
            _ => self.drug.clone(),
        }
    }

    /// Check whether this medicine is available to the given resident.
    pub fn belongs_to(&self, resident_id: i64) -> bool {
        self.otc || self.resident_id == Some(resident_id)
    }

    /// The fill date as a single logical date, if fully populated and valid.
    pub fn fill_date(&self) -> Option<NaiveDate> {
        match split_date(
            &self.fill_date_year,
            &self.fill_date_month,
            &self.fill_date_day,
        ) {
            SplitDate::Valid(date) => Some(date),
            _ => None,
        }
    }

    /// Validate the record before a save.
    ///
    /// The drug name must be non-empty, a non-OTC medicine needs an owning
    /// resident, and the fill date must be either fully empty or a real,
    /// non-future calendar date.
    pub fn validate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> ValidationResult<()> {
        if self.drug.trim().is_empty() {
            return Err(ValidationError::EmptyDrugName);
        }
        if !self.otc && self.resident_id.is_none() {
            return Err(ValidationError::MissingResident);
        }
        match split_date(
            &self.fill_date_year,
            &self.fill_date_month,
            &self.fill_date_day,
        ) {
            SplitDate::Empty => Ok(()),
            SplitDate::Partial => Err(ValidationError::PartialDate { field: "Fill date" }),
            SplitDate::Invalid => Err(ValidationError::InvalidDate { field: "Fill date" }),
            SplitDate::Valid(date) => {
                if is_future_date(date, now) {
                    Err(ValidationError::FutureDate { field: "Fill date" })
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_display_name() {
        let mut med = Medicine::new("Aspirin".into(), Some(1));
        assert_eq!(med.display_name(), "Aspirin");

        med.strength = Some("81 MG".into());
        assert_eq!(med.display_name(), "Aspirin 81 MG");

        med.strength = Some("  ".into());
        assert_eq!(med.display_name(), "Aspirin");
    }

    #[test]
    fn test_belongs_to() {
        let med = Medicine::new("Aspirin".into(), Some(1));
        assert!(med.belongs_to(1));
        assert!(!med.belongs_to(2));

        let mut otc = Medicine::new("Tums".into(), None);
        otc.otc = true;
        assert!(otc.belongs_to(1));
        assert!(otc.belongs_to(2));
    }

    #[test]
    fn test_validate_requires_drug_and_owner() {
        let mut med = Medicine::new("".into(), Some(1));
        assert_eq!(med.validate(&now()), Err(ValidationError::EmptyDrugName));

        med.drug = "Aspirin".into();
        med.resident_id = None;
        assert_eq!(med.validate(&now()), Err(ValidationError::MissingResident));

        med.otc = true;
        assert!(med.validate(&now()).is_ok());
    }

    #[test]
    fn test_validate_fill_date() {
        let mut med = Medicine::new("Aspirin".into(), Some(1));

        // All empty is fine
        assert!(med.validate(&now()).is_ok());
        assert_eq!(med.fill_date(), None);

        // Partial is rejected
        med.fill_date_year = "2024".into();
        assert!(matches!(
            med.validate(&now()),
            Err(ValidationError::PartialDate { .. })
        ));

        // Full and valid
        med.fill_date_month = "2".into();
        med.fill_date_day = "29".into();
        assert!(med.validate(&now()).is_ok());
        assert_eq!(med.fill_date(), NaiveDate::from_ymd_opt(2024, 2, 29));

        // 29 Feb on a non-leap year is not a real date
        med.fill_date_year = "2023".into();
        assert!(matches!(
            med.validate(&now()),
            Err(ValidationError::InvalidDate { .. })
        ));

        // Future dates are rejected
        med.fill_date_year = "2024".into();
        med.fill_date_month = "3".into();
        med.fill_date_day = "16".into();
        assert!(matches!(
            med.validate(&now()),
            Err(ValidationError::FutureDate { .. })
        ));
    }
}
