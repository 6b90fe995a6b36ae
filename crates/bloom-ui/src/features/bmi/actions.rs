//! BMI feature actions.
//!
//! # Design
//! - Capture user intent separate from rendering.
//! - Form edits are applied synchronously; the rest go through the controller.

use crate::features::bmi::logic::{HeightUnit, WeightUnit};

/// User intents raised by the BMI calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BmiAction {
    /// Weight field edited.
    SetWeight(String),
    /// Height field edited.
    SetHeight(String),
    /// Weight unit selected.
    SetWeightUnit(WeightUnit),
    /// Height unit selected.
    SetHeightUnit(HeightUnit),
    /// Calculate button pressed.
    Calculate,
    /// Restore button pressed on a saved entry.
    Restore(i64),
    /// Delete button pressed on a saved entry (entries without an id are ignored).
    Delete(Option<i64>),
}

impl BmiAction {
    /// Whether the action results in a remote call.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Calculate | Self::Delete(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::BmiAction;

    #[test]
    fn only_calculate_and_identified_deletes_are_remote() {
        assert!(BmiAction::Calculate.is_remote());
        assert!(BmiAction::Delete(Some(3)).is_remote());
        assert!(!BmiAction::Delete(None).is_remote());
        assert!(!BmiAction::Restore(3).is_remote());
        assert!(!BmiAction::SetWeight("60".into()).is_remote());
    }
}
