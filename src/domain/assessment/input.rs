//! Validated clinical questionnaire input.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::domain::foundation::ValidationError;

use super::BodyMassIndex;

/// One respondent's clinical measurements, immutable once constructed.
///
/// Construction enforces the questionnaire bounds; everything downstream
/// (scoring, registration) may assume the values are in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessmentInput {
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    systolic_bp_mmhg: f64,
    is_smoker: bool,
    has_diabetes: bool,
    abdominal_circumference_cm: f64,
}

/// Accepted age range in years.
pub const AGE_YEARS: RangeInclusive<u32> = 0..=120;
/// Accepted weight range in kilograms.
pub const WEIGHT_KG: RangeInclusive<f64> = 10.0..=200.0;
/// Accepted height range in centimeters.
pub const HEIGHT_CM: RangeInclusive<f64> = 50.0..=250.0;
/// Accepted systolic blood pressure range in mmHg.
pub const SYSTOLIC_BP_MMHG: RangeInclusive<f64> = 50.0..=200.0;
/// Accepted abdominal circumference range in centimeters.
pub const ABDOMINAL_CM: RangeInclusive<f64> = 50.0..=200.0;

impl RiskAssessmentInput {
    /// Creates a new input, validating every measurement against its bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        systolic_bp_mmhg: f64,
        is_smoker: bool,
        has_diabetes: bool,
        abdominal_circumference_cm: f64,
    ) -> Result<Self, ValidationError> {
        check_range("age", f64::from(age), &(*AGE_YEARS.start() as f64..=*AGE_YEARS.end() as f64))?;
        check_range("weight_kg", weight_kg, &WEIGHT_KG)?;
        check_range("height_cm", height_cm, &HEIGHT_CM)?;
        check_range("systolic_bp_mmhg", systolic_bp_mmhg, &SYSTOLIC_BP_MMHG)?;
        check_range(
            "abdominal_circumference_cm",
            abdominal_circumference_cm,
            &ABDOMINAL_CM,
        )?;

        Ok(Self {
            age,
            weight_kg,
            height_cm,
            systolic_bp_mmhg,
            is_smoker,
            has_diabetes,
            abdominal_circumference_cm,
        })
    }

    /// Age in years.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Height in centimeters.
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Systolic blood pressure in mmHg.
    pub fn systolic_bp_mmhg(&self) -> f64 {
        self.systolic_bp_mmhg
    }

    /// Whether the respondent smokes.
    pub fn is_smoker(&self) -> bool {
        self.is_smoker
    }

    /// Whether the respondent has diabetes.
    pub fn has_diabetes(&self) -> bool {
        self.has_diabetes
    }

    /// Abdominal circumference in centimeters.
    pub fn abdominal_circumference_cm(&self) -> f64 {
        self.abdominal_circumference_cm
    }

    /// Body mass index derived from weight and height.
    pub fn bmi(&self) -> BodyMassIndex {
        BodyMassIndex::from_measurements(self.weight_kg, self.height_cm)
    }
}

fn check_range(
    field: &str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ValidationError> {
    if !value.is_finite() || !range.contains(&value) {
        return Err(ValidationError::out_of_range(
            field,
            *range.start(),
            *range.end(),
            value,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_input() -> RiskAssessmentInput {
        RiskAssessmentInput::new(30, 70.0, 170.0, 120.0, false, false, 90.0).unwrap()
    }

    #[test]
    fn input_accepts_in_bounds_measurements() {
        let input = reference_input();
        assert_eq!(input.age(), 30);
        assert_eq!(input.weight_kg(), 70.0);
        assert!(!input.is_smoker());
    }

    #[test]
    fn input_rejects_out_of_range_age() {
        let result = RiskAssessmentInput::new(121, 70.0, 170.0, 120.0, false, false, 90.0);
        match result {
            Err(ValidationError::OutOfRange { field, max, actual, .. }) => {
                assert_eq!(field, "age");
                assert_eq!(max, 120.0);
                assert_eq!(actual, 121.0);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
    }

    #[test]
    fn input_rejects_out_of_range_weight() {
        assert!(RiskAssessmentInput::new(30, 9.9, 170.0, 120.0, false, false, 90.0).is_err());
        assert!(RiskAssessmentInput::new(30, 200.1, 170.0, 120.0, false, false, 90.0).is_err());
    }

    #[test]
    fn input_rejects_non_finite_measurements() {
        assert!(RiskAssessmentInput::new(30, f64::NAN, 170.0, 120.0, false, false, 90.0).is_err());
        assert!(
            RiskAssessmentInput::new(30, 70.0, f64::INFINITY, 120.0, false, false, 90.0).is_err()
        );
    }

    #[test]
    fn input_accepts_boundary_values() {
        assert!(RiskAssessmentInput::new(0, 10.0, 50.0, 50.0, true, true, 50.0).is_ok());
        assert!(RiskAssessmentInput::new(120, 200.0, 250.0, 200.0, true, true, 200.0).is_ok());
    }

    #[test]
    fn input_derives_bmi_from_measurements() {
        let bmi = reference_input().bmi();
        assert!((bmi.value() - 24.2214).abs() < 0.001);
    }

    #[test]
    fn input_serializes_to_json() {
        let json = serde_json::to_string(&reference_input()).unwrap();
        assert!(json.contains("\"age\":30"));
        assert!(json.contains("\"is_smoker\":false"));
    }
}
