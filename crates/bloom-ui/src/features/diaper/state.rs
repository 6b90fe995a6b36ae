//! Diaper tracker state.
//!
//! # Design
//! - Stool details are only sent for dirty or mixed changes.
//! - The entry list stays sorted newest first after every mutation.

use bloom_api_models::{DiaperLog, DiaperPayload, DiaperType, StoolColor, StoolConsistency};
use chrono::{DateTime, NaiveDate, Utc};

use crate::features::diaper::logic::{
    DailySummary, DiaperInputError, daily_summary, format_occurred_at, last_change,
    parse_occurred_at, sort_newest_first,
};

/// Entry form for a diaper change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiaperForm {
    /// Kind of change.
    pub diaper_type: DiaperType,
    /// When it happened, as typed.
    pub occurred_at: String,
    /// Stool color.
    pub color: Option<StoolColor>,
    /// Stool consistency.
    pub consistency: Option<StoolConsistency>,
    /// Free-form notes.
    pub notes: String,
}

impl Default for DiaperForm {
    fn default() -> Self {
        Self {
            diaper_type: DiaperType::Wet,
            occurred_at: String::new(),
            color: None,
            consistency: None,
            notes: String::new(),
        }
    }
}

impl DiaperForm {
    /// Fresh form stamped with `now`.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            occurred_at: format_occurred_at(now),
            ..Self::default()
        }
    }

    /// Form pre-filled from a saved entry.
    #[must_use]
    pub fn from_log(log: &DiaperLog) -> Self {
        Self {
            diaper_type: log.diaper_type,
            occurred_at: format_occurred_at(log.occurred_at),
            color: log.color,
            consistency: log.consistency,
            notes: log.notes.clone().unwrap_or_default(),
        }
    }

    /// Validate the form into a request payload.
    ///
    /// # Errors
    /// Returns [`DiaperInputError`] when the time is missing or malformed.
    pub fn payload(&self) -> Result<DiaperPayload, DiaperInputError> {
        let occurred_at = parse_occurred_at(&self.occurred_at)?;
        let dirty = self.diaper_type.is_dirty();
        let notes = self.notes.trim();
        Ok(DiaperPayload {
            diaper_type: self.diaper_type,
            occurred_at,
            color: self.color.filter(|_| dirty),
            consistency: self.consistency.filter(|_| dirty),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

/// Complete diaper tracker state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiaperState {
    /// Entry form.
    pub form: DiaperForm,
    /// Entry being edited, if any.
    pub editing: Option<i64>,
    /// Logged changes, newest first.
    pub entries: Vec<DiaperLog>,
    /// Initial fetch in flight.
    pub loading: bool,
    /// Add or edit in flight.
    pub saving: bool,
    /// Inline error message.
    pub error: Option<String>,
}

impl DiaperState {
    /// Replace the list with freshly fetched entries.
    pub fn set_entries(&mut self, mut entries: Vec<DiaperLog>) {
        sort_newest_first(&mut entries);
        self.entries = entries;
    }

    /// Insert a newly logged change.
    pub fn prepend_entry(&mut self, entry: DiaperLog) {
        self.entries.insert(0, entry);
        sort_newest_first(&mut self.entries);
    }

    /// Replace an entry in place; returns whether it was found.
    pub fn replace_entry(&mut self, entry: DiaperLog) -> bool {
        let Some(slot) = self
            .entries
            .iter_mut()
            .find(|existing| existing.id.is_some() && existing.id == entry.id)
        else {
            return false;
        };
        *slot = entry;
        sort_newest_first(&mut self.entries);
        true
    }

    /// Remove an entry; returns whether anything was removed.
    pub fn remove_entry(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != Some(id));
        self.entries.len() != before
    }

    /// Look up an entry.
    #[must_use]
    pub fn find_entry(&self, id: i64) -> Option<&DiaperLog> {
        self.entries.iter().find(|entry| entry.id == Some(id))
    }

    /// Totals for `day`.
    #[must_use]
    pub fn summary_for(&self, day: NaiveDate) -> DailySummary {
        daily_summary(&self.entries, day)
    }

    /// Most recent change.
    #[must_use]
    pub fn last_change(&self) -> Option<&DiaperLog> {
        last_change(&self.entries)
    }
}
