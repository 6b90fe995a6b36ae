//! Tool feature slices.

pub mod bmi;
pub mod diaper;
pub mod due_date;
pub mod journal;
