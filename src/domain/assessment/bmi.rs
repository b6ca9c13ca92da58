//! Body mass index derived value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body mass index, `weight(kg) / height(m)^2`.
///
/// A height of zero yields a BMI of zero instead of a division error; the
/// questionnaire boundary treats that as degenerate input, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyMassIndex(f64);

impl BodyMassIndex {
    /// Derives the BMI from weight in kilograms and height in centimeters.
    pub fn from_measurements(weight_kg: f64, height_cm: f64) -> Self {
        if height_cm == 0.0 {
            return Self(0.0);
        }
        let height_m = height_cm / 100.0;
        Self(weight_kg / (height_m * height_m))
    }

    /// Wraps an already-computed BMI value.
    pub fn from_value(value: f64) -> Self {
        Self(value)
    }

    /// Returns the value as kg/m^2.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for BodyMassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_matches_reference_computation() {
        // 70 kg at 170 cm: 70 / 1.7^2
        let bmi = BodyMassIndex::from_measurements(70.0, 170.0);
        assert!((bmi.value() - 24.2214).abs() < 0.001);
    }

    #[test]
    fn bmi_of_zero_height_is_zero() {
        let bmi = BodyMassIndex::from_measurements(70.0, 0.0);
        assert_eq!(bmi.value(), 0.0);
    }

    #[test]
    fn bmi_displays_with_two_decimals() {
        let bmi = BodyMassIndex::from_measurements(70.0, 170.0);
        assert_eq!(format!("{}", bmi), "24.22");
    }

    #[test]
    fn bmi_serializes_as_plain_number() {
        let bmi = BodyMassIndex::from_value(24.5);
        assert_eq!(serde_json::to_string(&bmi).unwrap(), "24.5");
    }
}
