//! Gestational date math.

use chrono::{NaiveDate, TimeDelta};
use thiserror::Error;

/// Length of a standard pregnancy counted from the last period.
pub const PREGNANCY_DAYS: i64 = 280;
/// Oldest accepted last-period date, in weeks before today.
pub const MAX_LMP_AGE_WEEKS: i64 = 42;
/// Week from which a pregnancy counts as full term.
pub const FULL_TERM_WEEKS: u32 = 37;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for the last-period date.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DueDateInputError {
    /// No date entered.
    #[error("Please select the first day of your last period")]
    Missing,
    /// Date could not be parsed.
    #[error("Invalid date entered")]
    Invalid,
    /// Date lies after today.
    #[error("Last period date cannot be in the future")]
    InFuture,
    /// Date is older than a full-length pregnancy allows.
    #[error("Last period date is too far in the past")]
    TooOld,
}

/// Parse and validate a `YYYY-MM-DD` last-period date against `today`.
///
/// # Errors
/// Returns the matching [`DueDateInputError`] for empty, malformed, future,
/// or implausibly old dates.
pub fn parse_lmp(text: &str, today: NaiveDate) -> Result<NaiveDate, DueDateInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DueDateInputError::Missing);
    }
    let lmp =
        NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| DueDateInputError::Invalid)?;
    if lmp > today {
        return Err(DueDateInputError::InFuture);
    }
    if today - lmp > TimeDelta::weeks(MAX_LMP_AGE_WEEKS) {
        return Err(DueDateInputError::TooOld);
    }
    Ok(lmp)
}

/// Format a date the way the input field expects it.
#[must_use]
pub fn format_lmp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Pregnancy trimester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trimester {
    /// Weeks 0 to 12.
    First,
    /// Weeks 13 to 27.
    Second,
    /// Week 28 onwards.
    Third,
}

impl Trimester {
    /// Trimester for a number of completed weeks.
    #[must_use]
    pub const fn from_weeks(weeks: u32) -> Self {
        match weeks {
            0..=12 => Self::First,
            13..=27 => Self::Second,
            _ => Self::Third,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First Trimester",
            Self::Second => "Second Trimester",
            Self::Third => "Third Trimester",
        }
    }
}

/// Everything derived from a last-period date on a given day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pregnancy {
    /// First day of the last period.
    pub lmp: NaiveDate,
    /// Estimated due date.
    pub due_date: NaiveDate,
    /// Completed weeks.
    pub weeks: u32,
    /// Days past the last completed week.
    pub days: u32,
    /// Days until the due date, never negative.
    pub days_remaining: u32,
    /// Current trimester.
    pub trimester: Trimester,
    /// Share of the 280 days elapsed, capped at 100.
    pub progress_percent: f64,
}

impl Pregnancy {
    /// Derive the pregnancy timeline for `today`.
    #[must_use]
    pub fn compute(lmp: NaiveDate, today: NaiveDate) -> Self {
        let due_date = lmp + TimeDelta::days(PREGNANCY_DAYS);
        let elapsed = non_negative_days(today - lmp);
        let weeks = elapsed / 7;
        let progress_percent = (f64::from(elapsed) / 280.0 * 100.0).min(100.0);
        Self {
            lmp,
            due_date,
            weeks,
            days: elapsed % 7,
            days_remaining: non_negative_days(due_date - today),
            trimester: Trimester::from_weeks(weeks),
            progress_percent,
        }
    }

    /// Whether the pregnancy has reached full term.
    #[must_use]
    pub const fn is_full_term(&self) -> bool {
        self.weeks >= FULL_TERM_WEEKS
    }
}

fn non_negative_days(delta: TimeDelta) -> u32 {
    u32::try_from(delta.num_days().max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn due_date_is_280_days_after_lmp() {
        let lmp = date(2025, 1, 1);
        let pregnancy = Pregnancy::compute(lmp, date(2025, 3, 1));
        assert_eq!(pregnancy.due_date, date(2025, 10, 8));
        assert_eq!(pregnancy.weeks, 8);
        assert_eq!(pregnancy.days, 3);
        assert_eq!(pregnancy.days_remaining, 221);
    }

    #[test]
    fn trimester_boundaries() {
        assert_eq!(Trimester::from_weeks(12), Trimester::First);
        assert_eq!(Trimester::from_weeks(13), Trimester::Second);
        assert_eq!(Trimester::from_weeks(27), Trimester::Second);
        assert_eq!(Trimester::from_weeks(28), Trimester::Third);
        assert_eq!(Trimester::Third.label(), "Third Trimester");
    }

    #[test]
    fn overdue_pregnancy_is_capped() {
        let today = date(2025, 10, 20);
        let pregnancy = Pregnancy::compute(date(2025, 1, 1), today);
        assert_eq!(pregnancy.days_remaining, 0);
        assert!((pregnancy.progress_percent - 100.0).abs() < f64::EPSILON);
        assert!(pregnancy.is_full_term());
    }

    #[test]
    fn full_term_starts_at_week_37() {
        let today = date(2025, 9, 1);
        let at_36 = Pregnancy::compute(today - TimeDelta::weeks(36), today);
        let at_37 = Pregnancy::compute(today - TimeDelta::weeks(37), today);
        assert!(!at_36.is_full_term());
        assert!(at_37.is_full_term());
        assert_eq!(at_37.days, 0);
    }

    #[test]
    fn lmp_validation_messages() {
        let today = date(2025, 6, 1);
        assert_eq!(
            parse_lmp("  ", today).unwrap_err().to_string(),
            "Please select the first day of your last period"
        );
        assert_eq!(parse_lmp("01/02/2025", today), Err(DueDateInputError::Invalid));
        assert_eq!(parse_lmp("2025-06-02", today), Err(DueDateInputError::InFuture));
        assert_eq!(parse_lmp("2024-01-01", today), Err(DueDateInputError::TooOld));
        assert_eq!(parse_lmp("2025-06-01", today), Ok(today));
        let oldest = today - TimeDelta::weeks(MAX_LMP_AGE_WEEKS);
        assert_eq!(parse_lmp(&format_lmp(oldest), today), Ok(oldest));
    }
}
