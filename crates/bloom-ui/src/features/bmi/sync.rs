//! Saved BMI synchronization.
//!
//! # Design
//! - Fetch failures mean "no saved data"; only a transport error shows a message.
//! - Save failures are logged and never surface to the form.
//! - Delete failures surface inline and leave the local list untouched.
//! - Results arriving after unmount are dropped.

use std::sync::Arc;

use bloom_tools_core::MetricsService;
use tracing::{debug, error, info, warn};

use crate::core::mount::MountHandle;
use crate::core::sync::SyncOutcome;
use crate::features::bmi::actions::BmiAction;
use crate::features::bmi::logic::{BmiInputError, compute_bmi};
use crate::features::bmi::state::{
    BmiFormState, BmiNotes, BmiState, bmi_entries_by_recency, create_request,
};

/// Message shown when saved entries could not be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load saved BMI data";
/// Message shown when the backend does not explain a failed delete.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete saved BMI";

/// Result of a successful calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calculation {
    /// Rounded BMI.
    pub bmi: f64,
    /// What happened to the auto-save.
    pub save: SyncOutcome,
}

/// BMI calculator controller bound to a metrics service.
pub struct BmiController {
    service: Arc<dyn MetricsService>,
    state: BmiState,
    mount: MountHandle,
}

impl BmiController {
    /// Controller with an empty form.
    #[must_use]
    pub fn new(service: Arc<dyn MetricsService>) -> Self {
        Self {
            service,
            state: BmiState::default(),
            mount: MountHandle::new(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn state(&self) -> &BmiState {
        &self.state
    }

    /// Mutable access to the form fields.
    pub const fn form_mut(&mut self) -> &mut BmiFormState {
        &mut self.state.form
    }

    /// Handle the owner uses to signal unmount.
    #[must_use]
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Apply a user action.
    pub async fn dispatch(&mut self, action: BmiAction) -> SyncOutcome {
        match action {
            BmiAction::SetWeight(weight) => {
                self.state.form.weight = weight;
                SyncOutcome::Skipped
            }
            BmiAction::SetHeight(height) => {
                self.state.form.height = height;
                SyncOutcome::Skipped
            }
            BmiAction::SetWeightUnit(unit) => {
                self.state.form.weight_unit = unit;
                SyncOutcome::Skipped
            }
            BmiAction::SetHeightUnit(unit) => {
                self.state.form.height_unit = unit;
                SyncOutcome::Skipped
            }
            BmiAction::Calculate => self
                .calculate()
                .await
                .map_or(SyncOutcome::Skipped, |calculation| calculation.save),
            BmiAction::Restore(id) => {
                if self.restore(id) {
                    SyncOutcome::Applied
                } else {
                    SyncOutcome::Skipped
                }
            }
            BmiAction::Delete(id) => self.delete(id).await,
        }
    }

    /// Fetch saved entries and rehydrate the form from the newest one.
    pub async fn load(&mut self) -> SyncOutcome {
        self.state.loading = true;
        self.state.error = None;

        let result = self.service.get_all().await;
        if !self.mount.is_mounted() {
            debug!("discarding BMI load result after unmount");
            return SyncOutcome::Discarded;
        }
        self.state.loading = false;

        match result {
            Ok(envelope) if envelope.success => {
                let metrics = envelope.data.map(|list| list.metrics).unwrap_or_default();
                self.state.saved = bmi_entries_by_recency(metrics);
                info!(count = self.state.saved.len(), "loaded saved BMI entries");
                if let Some(latest) = self.state.saved.first().cloned()
                    && let Err(err) = self.state.restore_from(&latest)
                {
                    warn!(error = %err, id = ?latest.id, "failed to parse latest BMI metric notes");
                }
                SyncOutcome::Applied
            }
            Ok(envelope) => {
                debug!(error = ?envelope.error, "no saved BMI data available");
                self.state.saved.clear();
                SyncOutcome::Rejected
            }
            Err(err) => {
                error!(error = %err, operation = err.operation(), "failed to load saved BMI data");
                self.state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                SyncOutcome::Failed
            }
        }
    }

    /// Validate the form, compute the BMI, and auto-save it.
    ///
    /// # Errors
    /// Returns the validation error (also stored as the inline message) when
    /// the form cannot be computed; nothing is sent in that case.
    pub async fn calculate(&mut self) -> Result<Calculation, BmiInputError> {
        self.state.error = None;
        let bmi = match compute_bmi(&self.state.form.measurement()) {
            Ok(bmi) => bmi,
            Err(err) => {
                self.state.error = Some(err.to_string());
                return Err(err);
            }
        };
        self.state.bmi = Some(bmi);
        let save = self.save(bmi).await;
        Ok(Calculation { bmi, save })
    }

    async fn save(&mut self, bmi: f64) -> SyncOutcome {
        let Some(notes) = BmiNotes::from_form(&self.state.form) else {
            warn!("skipping BMI save for non-numeric form");
            return SyncOutcome::Skipped;
        };
        let request = match create_request(&self.state.form, &notes, bmi) {
            Ok(request) => request,
            Err(err) => {
                error!(error = %err, "failed to encode BMI notes");
                return SyncOutcome::Failed;
            }
        };

        self.state.saving = true;
        let result = self.service.create_metric(request).await;
        if !self.mount.is_mounted() {
            debug!("discarding BMI save result after unmount");
            return SyncOutcome::Discarded;
        }
        self.state.saving = false;

        match result {
            Ok(envelope) => match envelope.into_data() {
                Some(record) => {
                    info!(id = ?record.id, value = %record.value, "saved BMI entry");
                    self.state.prepend_saved(record);
                    SyncOutcome::Applied
                }
                None => {
                    warn!("backend did not store BMI entry");
                    SyncOutcome::Rejected
                }
            },
            Err(err) => {
                error!(error = %err, operation = err.operation(), "error saving BMI metric");
                SyncOutcome::Failed
            }
        }
    }

    /// Delete a saved entry remotely, then locally.
    pub async fn delete(&mut self, id: Option<i64>) -> SyncOutcome {
        // Zero is never a stored id.
        let Some(id) = id.filter(|id| *id != 0) else {
            return SyncOutcome::Skipped;
        };
        self.state.error = None;

        let result = self.service.delete_metric(id).await;
        if !self.mount.is_mounted() {
            debug!(id, "discarding BMI delete result after unmount");
            return SyncOutcome::Discarded;
        }

        match result {
            Ok(envelope) if envelope.success => {
                self.state.remove_saved(id);
                info!(id, "deleted saved BMI entry");
                SyncOutcome::Applied
            }
            Ok(envelope) => {
                warn!(id, error = ?envelope.error, "backend refused BMI delete");
                self.state.error = Some(
                    envelope
                        .error
                        .unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_string()),
                );
                SyncOutcome::Rejected
            }
            Err(err) => {
                error!(id, error = %err, operation = err.operation(), "failed to delete saved BMI");
                self.state.error = Some(DELETE_FAILED_MESSAGE.to_string());
                SyncOutcome::Failed
            }
        }
    }

    /// Restore the form from a saved entry; returns whether anything was applied.
    pub fn restore(&mut self, id: i64) -> bool {
        let Some(record) = self.state.find_saved(id).cloned() else {
            return false;
        };
        match self.state.restore_from(&record) {
            Ok(()) => true,
            Err(err) => {
                warn!(id, error = %err, "cannot restore BMI metric");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bmi::logic::{BmiCategory, HeightUnit, WeightUnit};
    use async_trait::async_trait;
    use bloom_api_models::{Ack, ApiEnvelope, CreateMetricRequest, MetricList, MetricRecord};
    use bloom_test_support::fixtures::{bmi_record, sample_bmi_record};
    use bloom_test_support::mocks::{Behavior, InMemoryMetrics, MockPlan};
    use bloom_tools_core::ServiceResult;
    use std::sync::Mutex;

    fn harness(service: InMemoryMetrics) -> (BmiController, Arc<InMemoryMetrics>) {
        let service = Arc::new(service);
        (BmiController::new(service.clone()), service)
    }

    #[tokio::test]
    async fn load_rehydrates_from_latest_entry() {
        let (mut controller, _) = harness(InMemoryMetrics::with_records(vec![
            bmi_record(2, "19.0", r#"{"weight":50,"height":162,"weightUnit":"kg","heightUnit":"cm"}"#, 1_000),
            sample_bmi_record(),
        ]));
        assert_eq!(controller.load().await, SyncOutcome::Applied);

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.saved.len(), 2);
        assert_eq!(state.saved[0].id, sample_bmi_record().id);
        assert_eq!(state.form.weight, "60");
        assert_eq!(state.form.height, "165");
        assert_eq!(state.bmi, Some(22.4));
        assert_eq!(state.category(), Some(BmiCategory::HealthyWeight));
    }

    #[tokio::test]
    async fn rejected_load_means_no_saved_data() {
        let (mut controller, _) = harness(
            InMemoryMetrics::with_records(vec![sample_bmi_record()]).with_plan(MockPlan::rejecting()),
        );
        assert_eq!(controller.load().await, SyncOutcome::Rejected);
        assert!(controller.state().saved.is_empty());
        assert!(controller.state().error.is_none());
        assert!(controller.state().bmi.is_none());
    }

    #[tokio::test]
    async fn transport_failure_on_load_sets_message_but_keeps_form_usable() {
        let (mut controller, _) = harness(InMemoryMetrics::new().with_plan(MockPlan::offline()));
        assert_eq!(controller.load().await, SyncOutcome::Failed);
        assert_eq!(controller.state().error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert!(!controller.state().loading);

        controller.dispatch(BmiAction::SetWeight("60".into())).await;
        controller.dispatch(BmiAction::SetHeight("165".into())).await;
        let calculation = controller.calculate().await.expect("valid input");
        assert!((calculation.bmi - 22.0).abs() < f64::EPSILON);
        assert_eq!(calculation.save, SyncOutcome::Failed);
        assert!(controller.state().error.is_none());
    }

    #[tokio::test]
    async fn calculate_saves_and_prepends_entry() {
        let (mut controller, service) =
            harness(InMemoryMetrics::with_records(vec![sample_bmi_record()]));
        controller.load().await;

        controller.dispatch(BmiAction::SetWeight("150".into())).await;
        controller.dispatch(BmiAction::SetWeightUnit(WeightUnit::Pounds)).await;
        controller.dispatch(BmiAction::SetHeight("5.6".into())).await;
        controller.dispatch(BmiAction::SetHeightUnit(HeightUnit::Feet)).await;
        assert_eq!(controller.dispatch(BmiAction::Calculate).await, SyncOutcome::Applied);

        let state = controller.state();
        assert_eq!(state.bmi, Some(23.5));
        assert!(!state.saving);
        assert_eq!(state.saved.len(), 2);
        assert_eq!(state.saved[0].value, "23.5");

        let calls = service.create_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].unit, "lbs/ft");
        let notes: serde_json::Value = serde_json::from_str(&calls[0].notes).expect("json notes");
        assert_eq!(notes["weightUnit"], "lbs");
        assert_eq!(notes["heightUnit"], "ft");
        assert_eq!(notes["weight"], 150.0);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_service() {
        let (mut controller, service) = harness(InMemoryMetrics::new());
        controller.form_mut().weight = "60".into();
        controller.form_mut().height = "0".into();
        let err = controller.calculate().await.expect_err("zero height");
        assert_eq!(err, BmiInputError::NonPositiveHeight);
        assert_eq!(
            controller.state().error.as_deref(),
            Some("Height must be greater than zero")
        );
        assert!(controller.state().bmi.is_none());

        controller.form_mut().height.clear();
        assert_eq!(controller.dispatch(BmiAction::Calculate).await, SyncOutcome::Skipped);
        assert!(service.create_calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_save_is_silent() {
        let plan = MockPlan {
            writes: Behavior::Reject,
            ..MockPlan::healthy()
        };
        let (mut controller, _) = harness(InMemoryMetrics::new().with_plan(plan));
        controller.form_mut().weight = "60".into();
        controller.form_mut().height = "165".into();
        let calculation = controller.calculate().await.expect("valid input");
        assert_eq!(calculation.save, SyncOutcome::Rejected);
        assert!(controller.state().saved.is_empty());
        assert!(controller.state().error.is_none());
        assert_eq!(controller.state().bmi, Some(22.0));
    }

    #[tokio::test]
    async fn delete_removes_entry_on_success() {
        let (mut controller, service) =
            harness(InMemoryMetrics::with_records(vec![sample_bmi_record()]));
        controller.load().await;
        let id = sample_bmi_record().id;
        assert_eq!(controller.dispatch(BmiAction::Delete(id)).await, SyncOutcome::Applied);
        assert!(controller.state().saved.is_empty());
        assert!(service.records().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_keeps_list_and_sets_error() {
        let (mut controller, _) =
            harness(InMemoryMetrics::with_records(vec![sample_bmi_record()]));
        controller.load().await;
        assert_eq!(controller.delete(Some(404)).await, SyncOutcome::Rejected);
        assert_eq!(controller.state().saved.len(), 1);
        assert_eq!(controller.state().error.as_deref(), Some("Metric not found"));
    }

    #[tokio::test]
    async fn delete_transport_failure_uses_default_message() {
        let plan = MockPlan {
            deletes: Behavior::Fail,
            ..MockPlan::healthy()
        };
        let (mut controller, _) =
            harness(InMemoryMetrics::with_records(vec![sample_bmi_record()]).with_plan(plan));
        controller.load().await;
        assert_eq!(
            controller.delete(sample_bmi_record().id).await,
            SyncOutcome::Failed
        );
        assert_eq!(controller.state().saved.len(), 1);
        assert_eq!(controller.state().error.as_deref(), Some(DELETE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn delete_without_id_is_ignored() {
        let (mut controller, _) = harness(InMemoryMetrics::new());
        assert_eq!(controller.delete(None).await, SyncOutcome::Skipped);
        assert_eq!(controller.delete(Some(0)).await, SyncOutcome::Skipped);
        assert!(controller.state().error.is_none());
    }

    #[tokio::test]
    async fn overflowing_measurement_is_not_stored() {
        let (mut controller, service) = harness(InMemoryMetrics::new());
        controller.form_mut().weight = "1e308".into();
        controller.form_mut().height = "1".into();
        controller.form_mut().height_unit = HeightUnit::Meters;
        let err = controller.calculate().await.expect_err("overflowing bmi");
        assert_eq!(err, BmiInputError::InvalidNumber);
        assert!(controller.state().bmi.is_none());
        assert_eq!(controller.state().error.as_deref(), Some("Invalid number entered"));
        assert!(service.create_calls().is_empty());
    }

    #[tokio::test]
    async fn restore_applies_saved_entry() {
        let older = bmi_record(
            5,
            "27.1",
            r#"{"weight":80,"height":1.72,"weightUnit":"kg","heightUnit":"m"}"#,
            100,
        );
        let (mut controller, _) =
            harness(InMemoryMetrics::with_records(vec![older, sample_bmi_record()]));
        controller.load().await;
        assert_eq!(controller.state().form.height_unit, HeightUnit::Centimeters);

        assert!(controller.restore(5));
        let state = controller.state();
        assert_eq!(state.form.weight, "80");
        assert_eq!(state.form.height, "1.72");
        assert_eq!(state.form.height_unit, HeightUnit::Meters);
        assert_eq!(state.bmi, Some(27.1));
        assert!(!controller.restore(999));
    }

    struct UnmountingMetrics {
        inner: InMemoryMetrics,
        handle: Mutex<Option<MountHandle>>,
    }

    impl UnmountingMetrics {
        fn unmount_owner(&self) {
            if let Some(handle) = self.handle.lock().expect("lock").as_ref() {
                handle.unmount();
            }
        }
    }

    #[async_trait]
    impl MetricsService for UnmountingMetrics {
        async fn get_all(&self) -> ServiceResult<ApiEnvelope<MetricList>> {
            self.unmount_owner();
            self.inner.get_all().await
        }

        async fn create_metric(
            &self,
            payload: CreateMetricRequest,
        ) -> ServiceResult<ApiEnvelope<MetricRecord>> {
            self.unmount_owner();
            self.inner.create_metric(payload).await
        }

        async fn delete_metric(&self, id: i64) -> ServiceResult<Ack> {
            self.unmount_owner();
            self.inner.delete_metric(id).await
        }
    }

    #[tokio::test]
    async fn late_results_are_discarded_after_unmount() {
        let service = Arc::new(UnmountingMetrics {
            inner: InMemoryMetrics::with_records(vec![sample_bmi_record()]),
            handle: Mutex::new(None),
        });
        let mut controller = BmiController::new(service.clone());
        *service.handle.lock().expect("lock") = Some(controller.mount_handle());

        assert_eq!(controller.load().await, SyncOutcome::Discarded);
        assert!(controller.state().saved.is_empty());
        assert!(controller.state().form.weight.is_empty());

        controller.form_mut().weight = "60".into();
        controller.form_mut().height = "165".into();
        let calculation = controller.calculate().await.expect("valid input");
        assert_eq!(calculation.save, SyncOutcome::Discarded);
        assert!(controller.state().saved.is_empty());
    }
}
