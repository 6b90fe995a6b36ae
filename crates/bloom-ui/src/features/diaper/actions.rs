//! Diaper tracker actions.
//!
//! # Design
//! - Form edits are local; submit, delete, and refresh talk to the service.

use bloom_api_models::{DiaperType, StoolColor, StoolConsistency};

/// User intents raised by the diaper tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiaperAction {
    /// Change type selected.
    SetType(DiaperType),
    /// Occurred-at field edited.
    SetOccurredAt(String),
    /// Stool color selected or cleared.
    SetColor(Option<StoolColor>),
    /// Stool consistency selected or cleared.
    SetConsistency(Option<StoolConsistency>),
    /// Notes edited.
    SetNotes(String),
    /// Save button pressed (adds, or updates the entry being edited).
    Submit,
    /// Edit button pressed on an entry.
    Edit(i64),
    /// Edit cancelled.
    CancelEdit,
    /// Delete button pressed on an entry.
    Delete(Option<i64>),
    /// Reload the list from the service.
    Refresh,
}

impl DiaperAction {
    /// Whether the action results in a remote call.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Submit | Self::Delete(Some(_)) | Self::Refresh)
    }
}
