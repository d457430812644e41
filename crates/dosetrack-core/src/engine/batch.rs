//! Posting a pillbox batch through a log provider.

use thiserror::Error;

use crate::models::DrugLogEntry;
use crate::providers::{DrugLogProvider, ProviderError};

/// A pillbox batch that stopped partway through.
///
/// Entries in `created` were accepted by the backend before the failure;
/// because the log functions skip slots already logged today, retrying the
/// whole action later creates only the entries that are still missing.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Posted {} of the batch before failing: {source}", created.len())]
pub struct PartialLogFailure {
    /// Entries the backend accepted, in posting order
    pub created: Vec<DrugLogEntry>,
    /// The error that stopped the batch
    pub source: ProviderError,
}

/// Post a pillbox batch one entry at a time, stopping at the first failure.
///
/// Hosts should treat the whole call as a single busy action and not start
/// another log action for the same resident until it returns.
pub fn post_pillbox_log<P: DrugLogProvider>(
    provider: &mut P,
    batch: Vec<DrugLogEntry>,
) -> Result<Vec<DrugLogEntry>, PartialLogFailure> {
    let mut created = Vec::with_capacity(batch.len());
    for entry in batch {
        match provider.post(entry) {
            Ok(saved) => created.push(saved),
            Err(source) => return Err(PartialLogFailure { created, source }),
        }
    }
    Ok(created)
}
