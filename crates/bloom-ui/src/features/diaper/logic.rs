//! Diaper log helpers: ordering, daily totals, and health hints.

use bloom_api_models::{DiaperLog, StoolColor, StoolConsistency};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Format produced by a `datetime-local` input.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Validation failures for the diaper form.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiaperInputError {
    /// No time entered.
    #[error("Please choose when the change happened")]
    MissingTime,
    /// Time could not be parsed.
    #[error("Invalid time entered")]
    InvalidTime,
}

/// Parse an occurred-at field, accepting `datetime-local` or RFC 3339 text.
///
/// # Errors
/// Returns [`DiaperInputError`] for empty or unparseable input.
pub fn parse_occurred_at(text: &str) -> Result<DateTime<Utc>, DiaperInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DiaperInputError::MissingTime);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, LOCAL_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| DiaperInputError::InvalidTime)
}

/// Format an instant for the occurred-at field.
#[must_use]
pub fn format_occurred_at(at: DateTime<Utc>) -> String {
    at.format(LOCAL_TIME_FORMAT).to_string()
}

/// Order entries newest first.
pub fn sort_newest_first(entries: &mut [DiaperLog]) {
    entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
}

/// Counts for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailySummary {
    /// Changes logged that day.
    pub total: usize,
    /// Changes that count as wet.
    pub wet: usize,
    /// Changes that count as dirty.
    pub dirty: usize,
}

/// Totals for the UTC calendar day `day`; a "both" change counts as wet and dirty.
#[must_use]
pub fn daily_summary(entries: &[DiaperLog], day: NaiveDate) -> DailySummary {
    entries
        .iter()
        .filter(|entry| entry.occurred_at.date_naive() == day)
        .fold(DailySummary::default(), |mut summary, entry| {
            summary.total += 1;
            summary.wet += usize::from(entry.diaper_type.is_wet());
            summary.dirty += usize::from(entry.diaper_type.is_dirty());
            summary
        })
}

/// Whether a change has stool worth mentioning to a pediatrician.
#[must_use]
pub fn needs_attention(entry: &DiaperLog) -> bool {
    entry.diaper_type.is_dirty()
        && (matches!(entry.consistency, Some(StoolConsistency::Watery))
            || matches!(entry.color, Some(StoolColor::Red | StoolColor::White)))
}

/// Most recent change, regardless of list order.
#[must_use]
pub fn last_change(entries: &[DiaperLog]) -> Option<&DiaperLog> {
    entries.iter().max_by_key(|entry| entry.occurred_at)
}
