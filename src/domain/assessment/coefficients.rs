//! Logistic model weights.

use serde::{Deserialize, Serialize};

/// The fixed weights defining one version of the risk model.
///
/// Coefficients are configuration data, not code: deployed model lineages
/// disagree on individual weights (the diabetes weight in particular exists
/// in the wild with either sign), so the scorer takes whichever set the
/// deploying party configures rather than arbitrating between lineages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    /// Model intercept.
    pub intercept: f64,
    /// Weight per year of age.
    pub age: f64,
    /// Weight per kg/m^2 of body mass index.
    pub bmi: f64,
    /// Weight per mmHg of systolic blood pressure.
    pub systolic_bp: f64,
    /// Weight applied when the respondent smokes.
    pub smoker: f64,
    /// Weight applied when the respondent has diabetes.
    pub diabetes: f64,
    /// Weight per centimeter of abdominal circumference.
    pub abdominal: f64,
}

impl CoefficientSet {
    /// The recalibrated hypertension model shipped with the questionnaire.
    pub const RECALIBRATED: Self = Self {
        intercept: -8.115_344_7,
        age: 0.052_994_9,
        bmi: 0.057_342_7,
        systolic_bp: 0.020_609_4,
        smoker: 0.665_454_5,
        diabetes: 1.731_060_7,
        abdominal: 0.000_290_2,
    };
}

impl Default for CoefficientSet {
    fn default() -> Self {
        Self::RECALIBRATED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_recalibrated_preset() {
        assert_eq!(CoefficientSet::default(), CoefficientSet::RECALIBRATED);
    }

    #[test]
    fn recalibrated_preset_carries_expected_weights() {
        let c = CoefficientSet::RECALIBRATED;
        assert_eq!(c.intercept, -8.1153447);
        assert_eq!(c.diabetes, 1.7310607);
    }

    #[test]
    fn coefficient_set_roundtrips_through_json() {
        let json = serde_json::to_string(&CoefficientSet::RECALIBRATED).unwrap();
        let back: CoefficientSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CoefficientSet::RECALIBRATED);
    }
}
