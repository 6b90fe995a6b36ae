//! Due-date calculator actions.

/// User intents raised by the due-date calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DueDateAction {
    /// Last-period date edited.
    SetLmp(String),
    /// Calculate button pressed.
    Calculate,
    /// Start over with an empty form.
    Reset,
}
