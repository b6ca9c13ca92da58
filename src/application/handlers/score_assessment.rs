//! ScoreAssessmentHandler - Command handler for computing risk probabilities.

use crate::domain::assessment::{
    Assessment, BodyMassIndex, CoefficientSet, RiskProbability, RiskScorer,
};
use crate::domain::foundation::DomainError;

/// Command to score one assessment.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentCommand {
    pub assessment: Assessment,
}

/// Result of successful scoring.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentResult {
    pub assessment: Assessment,
    pub probability: RiskProbability,
    pub bmi: BodyMassIndex,
}

/// Handler for the score step.
///
/// Pure: holds the configured scorer, performs no I/O, and leaves every
/// side effect to the registration handler.
#[derive(Debug, Clone)]
pub struct ScoreAssessmentHandler {
    scorer: RiskScorer,
}

impl ScoreAssessmentHandler {
    pub fn new(coefficients: CoefficientSet) -> Self {
        Self {
            scorer: RiskScorer::new(coefficients),
        }
    }

    pub fn handle(&self, cmd: ScoreAssessmentCommand) -> Result<ScoreAssessmentResult, DomainError> {
        let mut assessment = cmd.assessment;
        let probability = assessment.score_with(&self.scorer)?;
        let bmi = assessment.input().bmi();

        tracing::debug!(probability = %probability, "Assessment scored");

        Ok(ScoreAssessmentResult {
            assessment,
            probability,
            bmi,
        })
    }
}
