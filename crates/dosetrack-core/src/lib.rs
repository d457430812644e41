//! Dosetrack Core Library
//!
//! Dosing-state engine for residential care medication tracking.
//!
//! # Architecture
//!
//! ```text
//!              Host (UI / storage backend)
//!                        │
//!          loads snapshots via provider traits
//!                        │
//!        ┌───────────────▼───────────────┐
//!        │   models (residents, meds,    │
//!        │   dose log, pillboxes)        │
//!        └───────────────┬───────────────┘
//!                        │
//!        ┌───────────────▼───────────────┐
//!        │   engine (pure computations)  │
//!        │   recency · checkout ·        │
//!        │   pillbox · batch posting     │
//!        └───────────────┬───────────────┘
//!                        │
//!              derived state + batches
//!                        │
//!                        ▼
//!            Host renders / persists
//! ```
//!
//! # Core Principle
//!
//! **All dosing state is derived, never stored.** Every computation takes a
//! data snapshot plus an explicit `now`; nothing here reads the clock or
//! touches storage, so the same inputs always produce the same answer.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Resident, Medicine, DrugLogEntry, Pillbox)
//! - [`temporal`]: Calendar and elapsed-time helpers
//! - [`engine`]: Dose recency, checkout ledger, pillbox tracking, batch posting
//! - [`sort`]: Stable multi-field sorting
//! - [`search`]: Prefix, substring, and fuzzy catalog search
//! - [`providers`]: Traits the host's storage backend implements

pub mod engine;
pub mod models;
pub mod providers;
pub mod search;
pub mod sort;
pub mod temporal;

// Re-export commonly used types
pub use engine::{
    checked_out_doses, last_dose_hours, log_pillbox, pillbox_state, post_pillbox_log,
    CheckoutSheet, PartialLogFailure, PillboxError, PillboxState, UrgencyLevel,
};
pub use models::{
    DrugLogEntry, EditOutcome, Medicine, Pillbox, PillboxItem, Resident, ValidationError,
    ValidationResult, MEDICINE_REMOVED,
};
pub use providers::{
    DrugLogProvider, MedicineProvider, PillboxProvider, ProviderError, ProviderResult,
    ResidentProvider,
};
pub use sort::{multi_sort, SortCriterion, SortDirection};
