//! Pure logistic-regression risk scorer.

use super::{CoefficientSet, RiskAssessmentInput, RiskProbability};

/// Scores questionnaire input against an injected coefficient set.
///
/// # Contract
///
/// `score` is pure and total on in-bounds input: same input and same
/// coefficients produce the identical probability, no I/O happens, and no
/// value inside the questionnaire bounds can make it fail. The logistic
/// transform uses the precise `f64::exp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScorer {
    coefficients: CoefficientSet,
}

impl RiskScorer {
    /// Creates a scorer over the given coefficient set.
    pub fn new(coefficients: CoefficientSet) -> Self {
        Self { coefficients }
    }

    /// Returns the coefficient set this scorer applies.
    pub fn coefficients(&self) -> &CoefficientSet {
        &self.coefficients
    }

    /// Computes the risk probability for one respondent.
    ///
    /// Linear score: intercept plus each weight times its measurement, with
    /// the smoker and diabetes flags contributing 0 or 1 and BMI derived
    /// from weight and height (zero height degrades to BMI 0).
    pub fn score(&self, input: &RiskAssessmentInput) -> RiskProbability {
        let c = &self.coefficients;

        let linear = c.intercept
            + c.age * f64::from(input.age())
            + c.bmi * input.bmi().value()
            + c.systolic_bp * input.systolic_bp_mmhg()
            + c.smoker * flag(input.is_smoker())
            + c.diabetes * flag(input.has_diabetes())
            + c.abdominal * input.abdominal_circumference_cm();

        RiskProbability::new(logistic(linear))
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(CoefficientSet::default())
    }
}

/// Maps an unbounded linear score into `(0, 1)`.
fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn flag(present: bool) -> f64 {
    if present {
        1.0
    } else {
        0.0
    }
}
