//! BMI unit conversion, computation, and classification.
//!
//! # Design
//! - Inputs stay as the raw strings typed by the user until computation.
//! - Every conversion is a pure function so the bands and constants are testable.
//! - Validation failures carry the inline message shown next to the form.

use std::fmt;

use thiserror::Error;

/// Kilograms per pound.
pub const KG_PER_POUND: f64 = 0.453_592;
/// Meters per foot.
pub const METERS_PER_FOOT: f64 = 0.3048;
/// Meters per inch.
pub const METERS_PER_INCH: f64 = 0.0254;

/// Inline validation failures for the measurement form.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum BmiInputError {
    /// Weight or height left blank.
    #[error("Please enter both weight and height")]
    MissingField,
    /// A field did not parse as a finite number.
    #[error("Invalid number entered")]
    InvalidNumber,
    /// Weight below zero.
    #[error("Weight cannot be negative")]
    NegativeWeight,
    /// Height converted to zero or less.
    #[error("Height must be greater than zero")]
    NonPositiveHeight,
}

/// Weight units accepted by the calculator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    /// Kilograms.
    #[default]
    Kilograms,
    /// Pounds.
    Pounds,
}

impl WeightUnit {
    /// Token used in unit strings and stored notes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lbs",
        }
    }

    /// Parse a unit token; unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(value: &str) -> Option<Self> {
        match value.trim() {
            "kg" => Some(Self::Kilograms),
            "lbs" => Some(Self::Pounds),
            _ => None,
        }
    }

    /// Convert a weight in this unit to kilograms.
    #[must_use]
    pub fn to_kilograms(self, value: f64) -> f64 {
        match self {
            Self::Kilograms => value,
            Self::Pounds => value * KG_PER_POUND,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Height units accepted by the calculator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HeightUnit {
    /// Centimeters.
    #[default]
    Centimeters,
    /// Meters.
    Meters,
    /// Feet, with the decimal part encoding inches (5.6 = 5 ft 7 in).
    Feet,
}

impl HeightUnit {
    /// Token used in unit strings and stored notes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Centimeters => "cm",
            Self::Meters => "m",
            Self::Feet => "ft",
        }
    }

    /// Parse a unit token; unknown tokens yield `None`.
    #[must_use]
    pub fn from_token(value: &str) -> Option<Self> {
        match value.trim() {
            "cm" => Some(Self::Centimeters),
            "m" => Some(Self::Meters),
            "ft" => Some(Self::Feet),
            _ => None,
        }
    }

    /// Convert a height in this unit to meters.
    #[must_use]
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            Self::Centimeters => value / 100.0,
            Self::Meters => value,
            Self::Feet => {
                let feet = value.floor();
                let inches = ((value - feet) * 12.0).round();
                feet.mul_add(METERS_PER_FOOT, inches * METERS_PER_INCH)
            }
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Raw measurement typed into the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasurementInput<'a> {
    /// Weight text.
    pub weight: &'a str,
    /// Weight unit.
    pub weight_unit: WeightUnit,
    /// Height text.
    pub height: &'a str,
    /// Height unit.
    pub height_unit: HeightUnit,
}

/// Compute the BMI for a measurement, rounded to one decimal place.
///
/// # Errors
/// Returns a [`BmiInputError`] when a field is empty or non-numeric, the
/// weight is negative, or the height does not convert to a positive value.
pub fn compute_bmi(input: &MeasurementInput<'_>) -> Result<f64, BmiInputError> {
    let weight = input.weight.trim();
    let height = input.height.trim();
    if weight.is_empty() || height.is_empty() {
        return Err(BmiInputError::MissingField);
    }

    let weight = parse_number(weight)?;
    let height = parse_number(height)?;
    if weight < 0.0 {
        return Err(BmiInputError::NegativeWeight);
    }

    let weight_kg = input.weight_unit.to_kilograms(weight);
    let height_m = input.height_unit.to_meters(height);
    if height_m <= 0.0 {
        return Err(BmiInputError::NonPositiveHeight);
    }

    // Extreme inputs can overflow the division or the rounding.
    let bmi = weight_kg / (height_m * height_m);
    if !bmi.is_finite() {
        return Err(BmiInputError::InvalidNumber);
    }
    let rounded = round_one_decimal(bmi);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(BmiInputError::InvalidNumber)
    }
}

fn parse_number(value: &str) -> Result<f64, BmiInputError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .ok_or(BmiInputError::InvalidNumber)
}

/// Round to one decimal place, halves away from zero.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parse a stored metric value for display; rejects non-finite and negative values.
#[must_use]
pub fn parse_stored_value(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed >= 0.0)
        .map(round_one_decimal)
}

/// Direction of the weight trend implied by a band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    /// Below the healthy band.
    Down,
    /// Inside the healthy band.
    Stable,
    /// Above the healthy band.
    Up,
}

/// BMI classification bands (inclusive lower bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    /// Below 18.5.
    Underweight,
    /// 18.5 up to 25.
    HealthyWeight,
    /// 25 up to 30.
    Overweight,
    /// 30 and above.
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::HealthyWeight
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::HealthyWeight => "Healthy Weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }

    /// Trend indicator for the band.
    #[must_use]
    pub const fn trend(self) -> Trend {
        match self {
            Self::Underweight => Trend::Down,
            Self::HealthyWeight => Trend::Stable,
            Self::Overweight | Self::Obese => Trend::Up,
        }
    }

    /// Pregnancy weight-gain recommendation for the band.
    #[must_use]
    pub const fn pregnancy_recommendation(self) -> &'static str {
        match self {
            Self::Underweight => "Aim for 12.5-18 kg weight gain during pregnancy",
            Self::HealthyWeight => "Aim for 11.5-16 kg weight gain during pregnancy",
            Self::Overweight => "Aim for 7-11.5 kg weight gain during pregnancy",
            Self::Obese => "Aim for 5-9 kg weight gain during pregnancy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(
        weight: &'a str,
        weight_unit: WeightUnit,
        height: &'a str,
        height_unit: HeightUnit,
    ) -> MeasurementInput<'a> {
        MeasurementInput {
            weight,
            weight_unit,
            height,
            height_unit,
        }
    }

    #[test]
    fn metric_measurement_lands_in_healthy_band() {
        let bmi = compute_bmi(&input(
            "60",
            WeightUnit::Kilograms,
            "165",
            HeightUnit::Centimeters,
        ))
        .expect("valid input");
        assert!((bmi - 22.0).abs() < f64::EPSILON);
        assert_eq!(BmiCategory::classify(bmi), BmiCategory::HealthyWeight);
    }

    #[test]
    fn imperial_measurement_decodes_inches_from_decimal_feet() {
        assert!((WeightUnit::Pounds.to_kilograms(150.0) - 68.0388).abs() < 1e-4);
        assert!((HeightUnit::Feet.to_meters(5.6) - 1.7018).abs() < 1e-9);
        let bmi = compute_bmi(&input("150", WeightUnit::Pounds, "5.6", HeightUnit::Feet))
            .expect("valid input");
        assert!((bmi - 23.5).abs() < f64::EPSILON);
    }

    #[test]
    fn meters_are_used_as_is() {
        let bmi = compute_bmi(&input(
            "81",
            WeightUnit::Kilograms,
            "1.8",
            HeightUnit::Meters,
        ))
        .expect("valid input");
        assert!((bmi - 25.0).abs() < f64::EPSILON);
        assert_eq!(BmiCategory::classify(bmi), BmiCategory::Overweight);
    }

    #[test]
    fn empty_fields_are_rejected_before_parsing() {
        let err = compute_bmi(&input("60", WeightUnit::Kilograms, "  ", HeightUnit::Meters))
            .expect_err("missing height");
        assert_eq!(err, BmiInputError::MissingField);
        assert_eq!(err.to_string(), "Please enter both weight and height");
    }

    #[test]
    fn non_numeric_and_non_finite_values_are_rejected() {
        for raw in ["abc", "NaN", "inf"] {
            let err = compute_bmi(&input(raw, WeightUnit::Kilograms, "165", HeightUnit::Centimeters))
                .expect_err("invalid number");
            assert_eq!(err.to_string(), "Invalid number entered");
        }
    }

    #[test]
    fn overflowing_results_are_rejected() {
        let err = compute_bmi(&input("1e308", WeightUnit::Kilograms, "1", HeightUnit::Meters))
            .expect_err("rounding overflows");
        assert_eq!(err, BmiInputError::InvalidNumber);

        let err = compute_bmi(&input("60", WeightUnit::Kilograms, "1e-200", HeightUnit::Meters))
            .expect_err("height squared underflows");
        assert_eq!(err, BmiInputError::InvalidNumber);
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = compute_bmi(&input("60", WeightUnit::Kilograms, "0", HeightUnit::Centimeters))
            .expect_err("zero height");
        assert_eq!(err, BmiInputError::NonPositiveHeight);

        // 0.04 ft rounds to zero inches.
        let err = compute_bmi(&input("60", WeightUnit::Kilograms, "0.04", HeightUnit::Feet))
            .expect_err("zero height");
        assert_eq!(err.to_string(), "Height must be greater than zero");
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = compute_bmi(&input("-5", WeightUnit::Kilograms, "165", HeightUnit::Centimeters))
            .expect_err("negative weight");
        assert_eq!(err, BmiInputError::NegativeWeight);
    }

    #[test]
    fn band_edges_use_inclusive_lower_bounds() {
        assert_eq!(BmiCategory::classify(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::HealthyWeight);
        assert_eq!(BmiCategory::classify(24.9), BmiCategory::HealthyWeight);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn bands_map_to_recommendations_and_trends() {
        assert_eq!(
            BmiCategory::Underweight.pregnancy_recommendation(),
            "Aim for 12.5-18 kg weight gain during pregnancy"
        );
        assert_eq!(BmiCategory::Obese.label(), "Obese");
        assert_eq!(BmiCategory::Underweight.trend(), Trend::Down);
        assert_eq!(BmiCategory::HealthyWeight.trend(), Trend::Stable);
        assert_eq!(BmiCategory::Overweight.trend(), Trend::Up);
    }

    #[test]
    fn stored_values_must_be_finite_and_non_negative() {
        assert_eq!(parse_stored_value("22.44"), Some(22.4));
        assert_eq!(parse_stored_value("-1"), None);
        assert_eq!(parse_stored_value("NaN"), None);
        assert_eq!(parse_stored_value("n/a"), None);
    }

    #[test]
    fn unit_tokens_round_trip() {
        assert_eq!(WeightUnit::from_token("lbs"), Some(WeightUnit::Pounds));
        assert_eq!(WeightUnit::from_token("stone"), None);
        assert_eq!(HeightUnit::from_token(" ft "), Some(HeightUnit::Feet));
        assert_eq!(HeightUnit::Meters.to_string(), "m");
    }
}
