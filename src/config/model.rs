//! Risk model configuration

use serde::Deserialize;

use crate::domain::assessment::CoefficientSet;

/// Coefficient configuration for the logistic risk model.
///
/// Every weight is individually overridable from the environment; the
/// defaults are the recalibrated hypertension model. Deployments tracking
/// a different model lineage (for instance one with a negative diabetes
/// weight) override the values rather than patching code.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model intercept
    #[serde(default = "default_intercept")]
    pub intercept: f64,

    /// Weight per year of age
    #[serde(default = "default_age")]
    pub age: f64,

    /// Weight per kg/m^2 of BMI
    #[serde(default = "default_bmi")]
    pub bmi: f64,

    /// Weight per mmHg of systolic blood pressure
    #[serde(default = "default_systolic_bp")]
    pub systolic_bp: f64,

    /// Weight applied to smokers
    #[serde(default = "default_smoker")]
    pub smoker: f64,

    /// Weight applied to diabetics
    #[serde(default = "default_diabetes")]
    pub diabetes: f64,

    /// Weight per centimeter of abdominal circumference
    #[serde(default = "default_abdominal")]
    pub abdominal: f64,
}

impl ModelConfig {
    /// Assembles the coefficient set the scorer will use.
    pub fn coefficient_set(&self) -> CoefficientSet {
        CoefficientSet {
            intercept: self.intercept,
            age: self.age,
            bmi: self.bmi,
            systolic_bp: self.systolic_bp,
            smoker: self.smoker,
            diabetes: self.diabetes,
            abdominal: self.abdominal,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            intercept: default_intercept(),
            age: default_age(),
            bmi: default_bmi(),
            systolic_bp: default_systolic_bp(),
            smoker: default_smoker(),
            diabetes: default_diabetes(),
            abdominal: default_abdominal(),
        }
    }
}

fn default_intercept() -> f64 {
    CoefficientSet::RECALIBRATED.intercept
}

fn default_age() -> f64 {
    CoefficientSet::RECALIBRATED.age
}

fn default_bmi() -> f64 {
    CoefficientSet::RECALIBRATED.bmi
}

fn default_systolic_bp() -> f64 {
    CoefficientSet::RECALIBRATED.systolic_bp
}

fn default_smoker() -> f64 {
    CoefficientSet::RECALIBRATED.smoker
}

fn default_diabetes() -> f64 {
    CoefficientSet::RECALIBRATED.diabetes
}

fn default_abdominal() -> f64 {
    CoefficientSet::RECALIBRATED.abdominal
}
