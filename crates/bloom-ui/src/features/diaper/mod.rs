//! Diaper tracker feature wiring.
//!
//! # Design
//! - Logging a change is the primary flow; editing reuses the same form.
//! - A failed list fetch shows an empty tracker rather than an error.

pub mod actions;
pub mod logic;
pub mod state;
pub mod sync;

pub use logic::{DailySummary, DiaperInputError, needs_attention};
pub use state::{DiaperForm, DiaperState};
pub use sync::DiaperController;
