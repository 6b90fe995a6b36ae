//! Saved due-date synchronization.

use std::sync::Arc;

use bloom_tools_core::DueDateService;
use tracing::{debug, error, info, warn};

use crate::core::clock::Clock;
use crate::core::mount::MountHandle;
use crate::core::sync::{Reply, SyncOutcome};
use crate::features::due_date::actions::DueDateAction;
use crate::features::due_date::logic::{DueDateInputError, Pregnancy, parse_lmp};
use crate::features::due_date::state::{DueDateState, save_request};

/// Due-date calculator controller bound to a due-date service.
pub struct DueDateController {
    service: Arc<dyn DueDateService>,
    clock: Clock,
    state: DueDateState,
    mount: MountHandle,
}

impl DueDateController {
    /// Controller with an empty form.
    #[must_use]
    pub fn new(service: Arc<dyn DueDateService>, clock: Clock) -> Self {
        Self {
            service,
            clock,
            state: DueDateState::default(),
            mount: MountHandle::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &DueDateState {
        &self.state
    }

    /// Handle the owner uses to signal unmount.
    #[must_use]
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Apply a user action.
    pub async fn dispatch(&mut self, action: DueDateAction) -> SyncOutcome {
        match action {
            DueDateAction::SetLmp(lmp) => {
                self.state.lmp = lmp;
                SyncOutcome::Skipped
            }
            DueDateAction::Calculate => self.calculate().await.unwrap_or(SyncOutcome::Skipped),
            DueDateAction::Reset => {
                self.state.reset();
                SyncOutcome::Skipped
            }
        }
    }

    /// Fetch the saved calculation and rehydrate from it.
    pub async fn load(&mut self) -> SyncOutcome {
        self.state.loading = true;
        let reply = Reply::from(self.service.get_due_date().await);
        if !self.mount.is_mounted() {
            debug!("discarding due-date load result after unmount");
            return SyncOutcome::Discarded;
        }
        self.state.loading = false;

        match reply {
            Reply::Accepted(Some(log)) => {
                info!(weeks = log.weeks_pregnant, "restored saved due date");
                let today = (self.clock)().date_naive();
                self.state.rehydrate(log, today);
                SyncOutcome::Applied
            }
            Reply::Accepted(None) | Reply::Rejected(_) => {
                debug!("no saved due date");
                SyncOutcome::Rejected
            }
            Reply::Failed(err) => {
                warn!(error = %err, operation = err.operation(), "failed to load saved due date");
                SyncOutcome::Failed
            }
        }
    }

    /// Validate the date, derive the timeline, and save it.
    ///
    /// # Errors
    /// Returns the validation error (also stored as the inline message).
    pub async fn calculate(&mut self) -> Result<SyncOutcome, DueDateInputError> {
        self.state.error = None;
        let today = (self.clock)().date_naive();
        let lmp = match parse_lmp(&self.state.lmp, today) {
            Ok(lmp) => lmp,
            Err(err) => {
                self.state.error = Some(err.to_string());
                self.state.result = None;
                return Err(err);
            }
        };
        let pregnancy = Pregnancy::compute(lmp, today);
        self.state.result = Some(pregnancy);

        self.state.saving = true;
        let reply = Reply::from(self.service.save_due_date(save_request(&pregnancy)).await);
        if !self.mount.is_mounted() {
            debug!("discarding due-date save result after unmount");
            return Ok(SyncOutcome::Discarded);
        }
        self.state.saving = false;

        let outcome = reply.outcome();
        match reply {
            Reply::Accepted(log) => {
                info!(weeks = pregnancy.weeks, "saved due date");
                if log.is_some() {
                    self.state.saved = log;
                }
            }
            Reply::Rejected(message) => {
                warn!(error = ?message, "backend did not store due date");
            }
            Reply::Failed(err) => {
                error!(error = %err, operation = err.operation(), "error saving due date");
            }
        }
        Ok(outcome)
    }
}
