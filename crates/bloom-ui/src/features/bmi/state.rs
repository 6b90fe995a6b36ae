//! BMI feature state.
//!
//! # Design
//! - Keep form inputs as strings for lossless editing.
//! - Saved entries are kept newest-first; the head drives rehydration.
//! - Structured notes are the source of truth; the `kg/cm` unit string is a legacy fallback.

use bloom_api_models::{BMI_METRIC_TITLE, CreateMetricRequest, MetricRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::features::bmi::logic::{
    BmiCategory, HeightUnit, MeasurementInput, WeightUnit, parse_stored_value,
};

/// Mutable measurement form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BmiFormState {
    /// Weight text as typed.
    pub weight: String,
    /// Height text as typed.
    pub height: String,
    /// Selected weight unit.
    pub weight_unit: WeightUnit,
    /// Selected height unit.
    pub height_unit: HeightUnit,
}

impl BmiFormState {
    /// Borrow the form as a measurement input.
    #[must_use]
    pub fn measurement(&self) -> MeasurementInput<'_> {
        MeasurementInput {
            weight: &self.weight,
            weight_unit: self.weight_unit,
            height: &self.height,
            height_unit: self.height_unit,
        }
    }

    /// Unit string stored alongside a metric, e.g. `kg/cm`.
    #[must_use]
    pub fn unit_string(&self) -> String {
        format!("{}/{}", self.weight_unit, self.height_unit)
    }

    fn apply_notes(&mut self, notes: StoredNotes) {
        if let Some(weight) = notes.weight.as_ref().and_then(number_text) {
            self.weight = weight;
        }
        if let Some(height) = notes.height.as_ref().and_then(number_text) {
            self.height = height;
        }
        if let Some(unit) = notes.weight_unit.as_deref().and_then(WeightUnit::from_token) {
            self.weight_unit = unit;
        }
        if let Some(unit) = notes.height_unit.as_deref().and_then(HeightUnit::from_token) {
            self.height_unit = unit;
        }
    }

    /// Apply a legacy `weight/height` unit string.
    ///
    /// Anything other than exactly two recognised tokens is ignored.
    pub fn apply_legacy_units(&mut self, unit: &str) -> bool {
        let mut parts = unit.split('/');
        let (Some(weight), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
            debug!(unit, "ignoring malformed legacy unit string");
            return false;
        };
        match (WeightUnit::from_token(weight), HeightUnit::from_token(height)) {
            (Some(weight_unit), Some(height_unit)) => {
                self.weight_unit = weight_unit;
                self.height_unit = height_unit;
                true
            }
            _ => {
                debug!(unit, "ignoring unrecognised legacy unit string");
                false
            }
        }
    }
}

/// Structured notes written with every BMI entry.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BmiNotes {
    /// Weight in the selected unit.
    pub weight: f64,
    /// Height in the selected unit.
    pub height: f64,
    /// Weight unit token.
    pub weight_unit: &'static str,
    /// Height unit token.
    pub height_unit: &'static str,
}

impl BmiNotes {
    /// Capture the raw inputs of a form whose fields parse as numbers.
    #[must_use]
    pub fn from_form(form: &BmiFormState) -> Option<Self> {
        Some(Self {
            weight: form.weight.trim().parse().ok()?,
            height: form.height.trim().parse().ok()?,
            weight_unit: form.weight_unit.as_str(),
            height_unit: form.height_unit.as_str(),
        })
    }
}

/// Notes as read back from the backend; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNotes {
    #[serde(default)]
    weight: Option<Value>,
    #[serde(default)]
    height: Option<Value>,
    #[serde(default)]
    weight_unit: Option<String>,
    #[serde(default)]
    height_unit: Option<String>,
}

fn number_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => number.as_f64().map(|parsed| parsed.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

/// Build the creation payload for a computed BMI.
///
/// # Errors
/// Returns an error when the notes cannot be serialized.
pub fn create_request(
    form: &BmiFormState,
    notes: &BmiNotes,
    bmi: f64,
) -> Result<CreateMetricRequest, serde_json::Error> {
    Ok(CreateMetricRequest {
        title: BMI_METRIC_TITLE.to_string(),
        value: bmi.to_string(),
        unit: form.unit_string(),
        notes: serde_json::to_string(notes)?,
    })
}

/// Keep only BMI entries, newest first (update time, then creation time).
#[must_use]
pub fn bmi_entries_by_recency(records: Vec<MetricRecord>) -> Vec<MetricRecord> {
    let mut entries: Vec<MetricRecord> = records
        .into_iter()
        .filter(|record| record.title == BMI_METRIC_TITLE)
        .collect();
    entries.sort_by(|a, b| b.recency().cmp(&a.recency()));
    entries
}

/// Complete BMI tool state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BmiState {
    /// Measurement form.
    pub form: BmiFormState,
    /// Last computed or restored BMI.
    pub bmi: Option<f64>,
    /// Saved entries, newest first.
    pub saved: Vec<MetricRecord>,
    /// Initial fetch in flight.
    pub loading: bool,
    /// Save in flight.
    pub saving: bool,
    /// Inline error message.
    pub error: Option<String>,
}

impl BmiState {
    /// Band for the displayed BMI; a zero result shows the empty state.
    #[must_use]
    pub fn category(&self) -> Option<BmiCategory> {
        self.bmi
            .filter(|bmi| *bmi > 0.0)
            .map(BmiCategory::classify)
    }

    /// Look up a saved entry.
    #[must_use]
    pub fn find_saved(&self, id: i64) -> Option<&MetricRecord> {
        self.saved.iter().find(|record| record.id == Some(id))
    }

    /// Restore form fields and result from a saved entry.
    ///
    /// Nothing is applied when the notes are present but unreadable.
    ///
    /// # Errors
    /// Returns the JSON error for unreadable notes.
    pub fn restore_from(&mut self, record: &MetricRecord) -> Result<(), serde_json::Error> {
        match record.notes.as_deref().filter(|notes| !notes.is_empty()) {
            Some(notes) => {
                let stored: StoredNotes = serde_json::from_str(notes)?;
                self.form.apply_notes(stored);
            }
            None => {
                if let Some(unit) = record.unit.as_deref().filter(|unit| !unit.is_empty()) {
                    self.form.apply_legacy_units(unit);
                }
            }
        }
        if let Some(value) = parse_stored_value(&record.value) {
            self.bmi = Some(value);
        }
        Ok(())
    }

    /// Put a freshly saved entry at the head of the list.
    pub fn prepend_saved(&mut self, record: MetricRecord) {
        self.saved.insert(0, record);
    }

    /// Remove a saved entry; returns whether anything was removed.
    pub fn remove_saved(&mut self, id: i64) -> bool {
        let before = self.saved.len();
        self.saved.retain(|record| record.id != Some(id));
        self.saved.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: i64, created: i64, updated: Option<i64>) -> MetricRecord {
        MetricRecord {
            id: Some(id),
            title: BMI_METRIC_TITLE.to_string(),
            value: "22.4".to_string(),
            unit: Some("kg/cm".to_string()),
            notes: None,
            created_at: Utc.timestamp_opt(created, 0).single(),
            updated_at: updated.and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        }
    }

    #[test]
    fn newer_entries_sort_first_and_other_titles_are_dropped() {
        let mut weight = record(9, 5_000, None);
        weight.title = "Weight".to_string();
        let sorted = bmi_entries_by_recency(vec![
            record(1, 1_000, None),
            weight,
            record(2, 2_000, None),
            record(3, 500, Some(3_000)),
        ]);
        let ids: Vec<_> = sorted.iter().filter_map(|entry| entry.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn entries_without_timestamps_sort_last() {
        let mut undated = record(4, 0, None);
        undated.created_at = None;
        let sorted = bmi_entries_by_recency(vec![undated, record(5, 10, None)]);
        assert_eq!(sorted[0].id, Some(5));
        assert_eq!(sorted[1].id, Some(4));
    }

    #[test]
    fn notes_round_trip_reproduces_form_fields() {
        let form = BmiFormState {
            weight: "65.5".to_string(),
            height: "5.6".to_string(),
            weight_unit: WeightUnit::Pounds,
            height_unit: HeightUnit::Feet,
        };
        let notes = BmiNotes::from_form(&form).expect("numeric form");
        let request = create_request(&form, &notes, 23.5).expect("payload");
        assert_eq!(request.title, "BMI");
        assert_eq!(request.value, "23.5");
        assert_eq!(request.unit, "lbs/ft");

        let mut state = BmiState::default();
        let saved = MetricRecord {
            id: Some(7),
            title: request.title,
            value: request.value,
            unit: Some(request.unit),
            notes: Some(request.notes),
            ..MetricRecord::default()
        };
        state.restore_from(&saved).expect("notes parse");
        assert_eq!(state.form, form);
        assert_eq!(state.bmi, Some(23.5));
    }

    #[test]
    fn whole_numbers_are_written_without_fraction() {
        let form = BmiFormState {
            weight: "60".to_string(),
            height: "165".to_string(),
            ..BmiFormState::default()
        };
        let notes = BmiNotes::from_form(&form).expect("numeric form");
        let request = create_request(&form, &notes, 22.0).expect("payload");
        assert_eq!(request.value, "22");
        assert_eq!(request.unit, "kg/cm");

        let mut state = BmiState::default();
        state
            .restore_from(&MetricRecord {
                notes: Some(request.notes),
                value: request.value,
                ..MetricRecord::default()
            })
            .expect("notes parse");
        assert_eq!(state.form.weight, "60");
        assert_eq!(state.form.height, "165");
    }

    #[test]
    fn legacy_unit_string_is_used_without_notes() {
        let mut state = BmiState::default();
        let mut legacy = record(1, 0, None);
        legacy.unit = Some("lbs/m".to_string());
        state.restore_from(&legacy).expect("no notes to parse");
        assert_eq!(state.form.weight_unit, WeightUnit::Pounds);
        assert_eq!(state.form.height_unit, HeightUnit::Meters);
        assert_eq!(state.bmi, Some(22.4));
        assert!(state.form.weight.is_empty());
    }

    #[test]
    fn malformed_legacy_unit_strings_are_ignored() {
        let mut form = BmiFormState::default();
        for unit in ["lbs", "lbs/ft/extra", "stone/ft", "lbs/yards", "/"] {
            assert!(!form.apply_legacy_units(unit), "{unit}");
        }
        assert_eq!(form, BmiFormState::default());
    }

    #[test]
    fn unreadable_notes_leave_state_untouched() {
        let mut state = BmiState::default();
        let mut broken = record(1, 0, None);
        broken.notes = Some("{not json".to_string());
        assert!(state.restore_from(&broken).is_err());
        assert_eq!(state, BmiState::default());
    }

    #[test]
    fn unknown_units_in_notes_keep_current_selection() {
        let mut state = BmiState::default();
        let mut entry = record(1, 0, None);
        entry.notes = Some(r#"{"weight":"70","weightUnit":"stone","heightUnit":"m"}"#.to_string());
        state.restore_from(&entry).expect("notes parse");
        assert_eq!(state.form.weight, "70");
        assert_eq!(state.form.weight_unit, WeightUnit::Kilograms);
        assert_eq!(state.form.height_unit, HeightUnit::Meters);
    }

    #[test]
    fn remove_saved_reports_missing_ids() {
        let mut state = BmiState {
            saved: vec![record(1, 0, None), record(2, 0, None)],
            ..BmiState::default()
        };
        assert!(!state.remove_saved(99));
        assert_eq!(state.saved.len(), 2);
        assert!(state.remove_saved(1));
        assert_eq!(state.saved.len(), 1);
        assert!(state.find_saved(2).is_some());
    }

    #[test]
    fn zero_bmi_has_no_category() {
        let mut state = BmiState {
            bmi: Some(0.0),
            ..BmiState::default()
        };
        assert!(state.category().is_none());
        state.bmi = Some(31.2);
        assert_eq!(state.category(), Some(BmiCategory::Obese));
    }
}
