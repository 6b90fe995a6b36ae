//! Due-date calculator state.
//!
//! # Design
//! - The last-period date is kept as the raw input text.
//! - The derived timeline is recomputed against the clock, never stored remotely.

use bloom_api_models::{DueDateLog, SaveDueDateRequest};
use chrono::{NaiveDate, NaiveTime};

use crate::features::due_date::logic::{Pregnancy, format_lmp};

/// Complete due-date tool state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DueDateState {
    /// Last-period date text (`YYYY-MM-DD`).
    pub lmp: String,
    /// Derived timeline for the current date.
    pub result: Option<Pregnancy>,
    /// Last calculation known to the backend.
    pub saved: Option<DueDateLog>,
    /// Initial fetch in flight.
    pub loading: bool,
    /// Save in flight.
    pub saving: bool,
    /// Inline error message.
    pub error: Option<String>,
}

impl DueDateState {
    /// Restore the form and timeline from a saved log.
    pub fn rehydrate(&mut self, log: DueDateLog, today: NaiveDate) {
        let lmp = log.lmp_date.date_naive();
        self.lmp = format_lmp(lmp);
        self.result = Some(Pregnancy::compute(lmp, today));
        self.saved = Some(log);
    }

    /// Clear the form and timeline, keeping the saved log.
    pub fn reset(&mut self) {
        self.lmp.clear();
        self.result = None;
        self.error = None;
    }
}

/// Build the save payload for a computed timeline.
#[must_use]
pub fn save_request(pregnancy: &Pregnancy) -> SaveDueDateRequest {
    SaveDueDateRequest {
        lmp_date: pregnancy.lmp.and_time(NaiveTime::MIN).and_utc(),
        weeks_pregnant: pregnancy.weeks,
    }
}
