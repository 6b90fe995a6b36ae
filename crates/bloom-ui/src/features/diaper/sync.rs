//! Diaper log synchronization.

use std::sync::Arc;

use bloom_api_models::{DiaperLog, DiaperPayload};
use bloom_tools_core::DiaperService;
use tracing::{debug, error, info, warn};

use crate::core::clock::Clock;
use crate::core::mount::MountHandle;
use crate::core::sync::{Reply, SyncOutcome};
use crate::features::diaper::actions::DiaperAction;
use crate::features::diaper::logic::{DailySummary, DiaperInputError};
use crate::features::diaper::state::{DiaperForm, DiaperState};

/// Message shown when an add or edit does not stick.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save diaper entry";
/// Message shown when a delete does not stick.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete diaper entry";

/// Diaper tracker controller bound to a diaper service.
pub struct DiaperController {
    service: Arc<dyn DiaperService>,
    clock: Clock,
    state: DiaperState,
    mount: MountHandle,
}

impl DiaperController {
    /// Controller with a form stamped at the current time.
    #[must_use]
    pub fn new(service: Arc<dyn DiaperService>, clock: Clock) -> Self {
        let state = DiaperState {
            form: DiaperForm::at(clock()),
            ..DiaperState::default()
        };
        Self {
            service,
            clock,
            state,
            mount: MountHandle::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &DiaperState {
        &self.state
    }

    /// Handle the owner uses to signal unmount.
    #[must_use]
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Totals for the current day.
    #[must_use]
    pub fn today(&self) -> DailySummary {
        self.state.summary_for((self.clock)().date_naive())
    }

    /// Apply a user action.
    pub async fn dispatch(&mut self, action: DiaperAction) -> SyncOutcome {
        match action {
            DiaperAction::SetType(diaper_type) => self.state.form.diaper_type = diaper_type,
            DiaperAction::SetOccurredAt(text) => self.state.form.occurred_at = text,
            DiaperAction::SetColor(color) => self.state.form.color = color,
            DiaperAction::SetConsistency(consistency) => {
                self.state.form.consistency = consistency;
            }
            DiaperAction::SetNotes(notes) => self.state.form.notes = notes,
            DiaperAction::Submit => {
                return self.submit().await.unwrap_or(SyncOutcome::Skipped);
            }
            DiaperAction::Edit(id) => {
                self.edit(id);
            }
            DiaperAction::CancelEdit => self.cancel_edit(),
            DiaperAction::Delete(id) => return self.delete(id).await,
            DiaperAction::Refresh => return self.load().await,
        }
        SyncOutcome::Skipped
    }

    /// Fetch the change log.
    pub async fn load(&mut self) -> SyncOutcome {
        self.state.loading = true;
        let reply = Reply::from(self.service.get_diapers().await);
        if !self.mount.is_mounted() {
            debug!("discarding diaper load result after unmount");
            return SyncOutcome::Discarded;
        }
        self.state.loading = false;

        let outcome = reply.outcome();
        match reply {
            Reply::Accepted(entries) => {
                let entries = entries.unwrap_or_default();
                info!(count = entries.len(), "loaded diaper log");
                self.state.set_entries(entries);
            }
            Reply::Rejected(message) => {
                debug!(error = ?message, "no diaper entries available");
                self.state.entries.clear();
            }
            Reply::Failed(err) => {
                warn!(error = %err, operation = err.operation(), "failed to load diaper log");
                self.state.entries.clear();
            }
        }
        outcome
    }

    /// Start editing an entry; returns whether it exists.
    pub fn edit(&mut self, id: i64) -> bool {
        let Some(entry) = self.state.find_entry(id) else {
            return false;
        };
        self.state.form = DiaperForm::from_log(entry);
        self.state.editing = Some(id);
        self.state.error = None;
        true
    }

    /// Leave edit mode with a fresh form.
    pub fn cancel_edit(&mut self) {
        self.state.editing = None;
        self.state.form = DiaperForm::at((self.clock)());
    }

    /// Validate the form and add or update the entry.
    ///
    /// # Errors
    /// Returns the validation error (also stored as the inline message).
    pub async fn submit(&mut self) -> Result<SyncOutcome, DiaperInputError> {
        self.state.error = None;
        let payload = match self.state.form.payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.state.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.state.saving = true;
        let outcome = match self.state.editing {
            Some(id) => self.update(id, payload).await,
            None => self.add(payload).await,
        };
        if outcome != SyncOutcome::Discarded {
            self.state.saving = false;
        }
        if outcome.is_applied() {
            self.cancel_edit();
        }
        Ok(outcome)
    }

    async fn add(&mut self, payload: DiaperPayload) -> SyncOutcome {
        let reply = Reply::from(self.service.add_diaper(payload).await);
        if !self.mount.is_mounted() {
            debug!("discarding diaper add result after unmount");
            return SyncOutcome::Discarded;
        }
        match reply {
            Reply::Accepted(Some(entry)) => {
                info!(id = ?entry.id, kind = ?entry.diaper_type, "logged diaper change");
                self.state.prepend_entry(entry);
                SyncOutcome::Applied
            }
            Reply::Accepted(None) | Reply::Rejected(_) => {
                warn!("backend did not store diaper change");
                self.state.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SyncOutcome::Rejected
            }
            Reply::Failed(err) => {
                error!(error = %err, operation = err.operation(), "error adding diaper change");
                self.state.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SyncOutcome::Failed
            }
        }
    }

    async fn update(&mut self, id: i64, payload: DiaperPayload) -> SyncOutcome {
        let reply = Reply::from(self.service.update_diaper(id, payload.clone()).await);
        if !self.mount.is_mounted() {
            debug!(id, "discarding diaper update result after unmount");
            return SyncOutcome::Discarded;
        }
        match reply {
            Reply::Accepted(entry) => {
                let mut entry = match (entry, self.state.find_entry(id)) {
                    (Some(entry), Some(existing)) => merge_returned(existing.clone(), entry),
                    (Some(entry), None) => entry,
                    (None, Some(existing)) => merge_payload(existing.clone(), payload),
                    (None, None) => {
                        warn!(id, "updated diaper entry is no longer listed");
                        return SyncOutcome::Applied;
                    }
                };
                entry.id.get_or_insert(id);
                info!(id, "updated diaper change");
                self.state.replace_entry(entry);
                SyncOutcome::Applied
            }
            Reply::Rejected(message) => {
                warn!(id, error = ?message, "backend refused diaper update");
                self.state.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SyncOutcome::Rejected
            }
            Reply::Failed(err) => {
                error!(id, error = %err, operation = err.operation(), "error updating diaper change");
                self.state.error = Some(SAVE_FAILED_MESSAGE.to_string());
                SyncOutcome::Failed
            }
        }
    }

    /// Delete an entry remotely, then locally.
    pub async fn delete(&mut self, id: Option<i64>) -> SyncOutcome {
        let Some(id) = id else {
            return SyncOutcome::Skipped;
        };
        self.state.error = None;
        let reply = Reply::from(self.service.delete_diaper(id).await);
        if !self.mount.is_mounted() {
            debug!(id, "discarding diaper delete result after unmount");
            return SyncOutcome::Discarded;
        }

        let outcome = reply.outcome();
        match reply {
            Reply::Accepted(_) => {
                self.state.remove_entry(id);
                if self.state.editing == Some(id) {
                    self.cancel_edit();
                }
                info!(id, "deleted diaper change");
            }
            Reply::Rejected(message) => {
                warn!(id, error = ?message, "backend refused diaper delete");
                self.state.error = Some(DELETE_FAILED_MESSAGE.to_string());
            }
            Reply::Failed(err) => {
                error!(id, error = %err, operation = err.operation(), "error deleting diaper change");
                self.state.error = Some(DELETE_FAILED_MESSAGE.to_string());
            }
        }
        outcome
    }
}

fn merge_payload(mut entry: DiaperLog, payload: DiaperPayload) -> DiaperLog {
    entry.diaper_type = payload.diaper_type;
    entry.occurred_at = payload.occurred_at;
    entry.color = payload.color;
    entry.consistency = payload.consistency;
    entry.notes = payload.notes;
    entry
}

/// Lay an update echo over the listed entry; the echo may omit bookkeeping fields.
fn merge_returned(existing: DiaperLog, returned: DiaperLog) -> DiaperLog {
    DiaperLog {
        id: returned.id.or(existing.id),
        user_id: returned.user_id.or(existing.user_id),
        created_at: returned.created_at.or(existing.created_at),
        updated_at: returned.updated_at.or(existing.updated_at),
        ..returned
    }
}
