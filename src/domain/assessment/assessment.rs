//! Assessment aggregate with an explicit lifecycle.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, RecordId, StateMachine, Timestamp};

use super::{RiskAssessmentInput, RiskProbability, RiskRecord, RiskScorer};

/// Lifecycle of a single questionnaire submission.
///
/// Replaces ambient "has the user calculated yet" flags with explicit
/// state: an assessment is scored before it can be registered, may be
/// re-scored while the respondent adjusts answers, and is registered at
/// most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    /// Input collected, probability not yet computed.
    Unscored,
    /// Probability computed and shown to the respondent.
    Scored,
    /// Persisted in the backing store under a record id.
    Registered,
}

impl StateMachine for AssessmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AssessmentStatus::*;
        matches!((self, target), (Unscored, Scored) | (Scored, Scored) | (Scored, Registered))
    }

    fn is_terminal(&self) -> bool {
        matches!(self, AssessmentStatus::Registered)
    }
}

/// One respondent's submission moving through score-then-register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    input: RiskAssessmentInput,
    status: AssessmentStatus,
    probability: Option<RiskProbability>,
    record_id: Option<RecordId>,
}

impl Assessment {
    /// Starts an assessment from validated questionnaire input.
    pub fn new(input: RiskAssessmentInput) -> Self {
        Self {
            input,
            status: AssessmentStatus::Unscored,
            probability: None,
            record_id: None,
        }
    }

    /// The submitted measurements.
    pub fn input(&self) -> &RiskAssessmentInput {
        &self.input
    }

    /// Current lifecycle state.
    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    /// The computed probability, present once scored.
    pub fn probability(&self) -> Option<RiskProbability> {
        self.probability
    }

    /// The allocated record id, present once registered.
    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    /// Computes (or recomputes) the risk probability.
    ///
    /// Allowed while unscored or scored; a registered assessment is final.
    pub fn score_with(&mut self, scorer: &RiskScorer) -> Result<RiskProbability, DomainError> {
        let next = self.status.transition_to(AssessmentStatus::Scored).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                "A registered assessment cannot be re-scored",
            )
        })?;

        let probability = scorer.score(&self.input);
        self.probability = Some(probability);
        self.status = next;
        Ok(probability)
    }

    /// Marks the assessment as registered under the allocated id.
    pub fn register(&mut self, record_id: RecordId) -> Result<(), DomainError> {
        match self.status {
            AssessmentStatus::Unscored => Err(DomainError::new(
                ErrorCode::NotYetScored,
                "Calculate the risk before registering the assessment",
            )),
            AssessmentStatus::Registered => Err(DomainError::new(
                ErrorCode::AlreadyRegistered,
                "Assessment is already registered",
            )
            .with_detail("record_id", self.record_id.map(|id| id.to_string()).unwrap_or_default())),
            AssessmentStatus::Scored => {
                self.status = AssessmentStatus::Registered;
                self.record_id = Some(record_id);
                Ok(())
            }
        }
    }

    /// Builds the persistable record for a scored assessment.
    pub fn to_record(&self, recorded_at: Timestamp) -> Result<RiskRecord, DomainError> {
        let probability = self.probability.ok_or_else(|| {
            DomainError::new(
                ErrorCode::NotYetScored,
                "Calculate the risk before registering the assessment",
            )
        })?;
        Ok(RiskRecord::new(self.input.clone(), probability, recorded_at))
    }
}
