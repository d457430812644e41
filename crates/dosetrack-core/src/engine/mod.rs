//! Dosing-state computations.
//!
//! Every function here is pure: it takes a data snapshot plus an explicit
//! `now` and returns derived state. Nothing reads the clock or storage.

pub mod batch;
pub mod checkout;
pub mod pillbox;
pub mod recency;

pub use batch::{post_pillbox_log, PartialLogFailure};
pub use checkout::{checked_out_doses, CheckoutLineItem, CheckoutSheet};
pub use pillbox::{
    loaded_items, log_pillbox, logged_line_items, next_active_pillbox, pillbox_state,
    PillboxError, PillboxLineItem, PillboxResult, PillboxState,
};
pub use recency::{last_dose_hours, UrgencyLevel};
