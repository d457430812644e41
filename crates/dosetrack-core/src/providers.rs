//! Persistence-facing traits.
//!
//! The engine itself never touches storage; hosts implement these traits
//! over whatever backend they have (an HTTP API, a local database, an
//! in-memory fixture in tests) and hand the engine plain snapshots.
//!
//! `load` and `search` have default implementations over the bulk loaders,
//! so a minimal backend only wires up load/post/delete; backends with a
//! server-side query push the filtering down by overriding them.

use thiserror::Error;

use crate::models::{DrugLogEntry, Medicine, Pillbox, PillboxItem, Resident};
use crate::search::filter_by_query;

/// Errors a storage backend can surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Record {0} not found")]
    NotFound(i64),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Backend returned an invalid record: {0}")]
    InvalidRecord(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Storage access for residents.
pub trait ResidentProvider {
    fn load_all(&self) -> ProviderResult<Vec<Resident>>;

    /// Load a single resident by id.
    fn load(&self, id: i64) -> ProviderResult<Resident> {
        self.load_all()?
            .into_iter()
            .find(|resident| resident.id == Some(id))
            .ok_or(ProviderError::NotFound(id))
    }

    /// Search residents by name prefix.
    fn search(&self, query: &str) -> ProviderResult<Vec<Resident>> {
        let all = self.load_all()?;
        Ok(filter_by_query(query, &all).into_iter().cloned().collect())
    }

    fn post(&mut self, resident: Resident) -> ProviderResult<Resident>;
    fn delete(&mut self, id: i64) -> ProviderResult<()>;
}

/// Storage access for the medicine catalog.
pub trait MedicineProvider {
    fn load_for_resident(&self, resident_id: i64) -> ProviderResult<Vec<Medicine>>;
    fn load_otc(&self) -> ProviderResult<Vec<Medicine>>;

    /// Search a resident's medicines (own plus shared OTC) by name prefix
    /// or barcode prefix, with the digit-dispatch rule of
    /// [`filter_by_query`].
    fn search(&self, resident_id: i64, query: &str) -> ProviderResult<Vec<Medicine>> {
        let mut catalog = self.load_for_resident(resident_id)?;
        catalog.extend(self.load_otc()?);
        Ok(filter_by_query(query, &catalog)
            .into_iter()
            .cloned()
            .collect())
    }

    fn post(&mut self, medicine: Medicine) -> ProviderResult<Medicine>;
    fn delete(&mut self, id: i64) -> ProviderResult<()>;
}

/// Storage access for the dose log.
pub trait DrugLogProvider {
    /// Load a resident's log, optionally restricted to the last `days` days.
    /// Engine computations assume the snapshot covers the window they care
    /// about; a 5-day window is enough for recency and same-day checks.
    fn load_for_resident(&self, resident_id: i64, days: Option<u32>) -> ProviderResult<Vec<DrugLogEntry>>;
    fn post(&mut self, entry: DrugLogEntry) -> ProviderResult<DrugLogEntry>;
    fn delete(&mut self, id: i64) -> ProviderResult<()>;
}

/// Storage access for pillboxes and their slots.
pub trait PillboxProvider {
    fn load_for_resident(&self, resident_id: i64) -> ProviderResult<Vec<Pillbox>>;
    fn load_items(&self, pillbox_id: i64) -> ProviderResult<Vec<PillboxItem>>;
    fn post(&mut self, pillbox: Pillbox) -> ProviderResult<Pillbox>;
    fn post_item(&mut self, item: PillboxItem) -> ProviderResult<PillboxItem>;
    fn delete(&mut self, id: i64) -> ProviderResult<()>;
}
