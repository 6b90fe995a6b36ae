//! BMI calculator feature wiring.
//!
//! # Design
//! - `logic` owns unit conversion and classification; `sync` owns the remote list.
//! - Every computed result is auto-saved; save failures never block the form.
//! - The newest saved entry rehydrates the form on load.

pub mod actions;
pub mod logic;
pub mod state;
pub mod sync;

pub use logic::{BmiCategory, BmiInputError, HeightUnit, Trend, WeightUnit, compute_bmi};
pub use state::{BmiFormState, BmiState};
pub use sync::BmiController;
