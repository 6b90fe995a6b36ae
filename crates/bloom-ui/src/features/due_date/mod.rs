//! Due-date calculator feature wiring.
//!
//! # Design
//! - The clock is injected so the timeline is testable.
//! - A missing or unreachable saved log simply means "nothing to restore".

pub mod actions;
pub mod logic;
pub mod state;
pub mod sync;

pub use logic::{DueDateInputError, Pregnancy, Trimester};
pub use state::DueDateState;
pub use sync::DueDateController;
