//! RegisterAssessmentHandler - Command handler for persisting confirmed
//! assessments.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::assessment::{Assessment, AssessmentStatus};
use crate::domain::foundation::{DomainError, RecordId, Timestamp};
use crate::ports::{IdAllocation, RecordStore, StoreError};

/// Command to register one scored assessment.
///
/// The presentation boundary issues this exactly once, after the
/// respondent has seen their probability and explicitly confirmed; consent
/// collection happens there, never here.
#[derive(Debug, Clone)]
pub struct RegisterAssessmentCommand {
    pub assessment: Assessment,
    pub recorded_at: Timestamp,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterAssessmentResult {
    pub assessment: Assessment,
    pub record_id: RecordId,
}

/// Errors raised by the registration flow.
///
/// A store failure is deliberately distinguishable from "not yet
/// calculated" so the boundary can show the right message.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("Risk has not been calculated yet")]
    NotYetScored,

    #[error("Assessment is already registered under {0}")]
    AlreadyRegistered(RecordId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Handler for the confirm-and-register step.
pub struct RegisterAssessmentHandler {
    store: Arc<dyn RecordStore>,
    allocation: IdAllocation,
}

impl RegisterAssessmentHandler {
    pub fn new(store: Arc<dyn RecordStore>, allocation: IdAllocation) -> Self {
        Self { store, allocation }
    }

    pub async fn handle(
        &self,
        cmd: RegisterAssessmentCommand,
    ) -> Result<RegisterAssessmentResult, RegisterError> {
        let mut assessment = cmd.assessment;

        // 1. Gate on the lifecycle before touching the store: nothing is
        //    allocated or persisted for an unscored or finished assessment.
        match assessment.status() {
            AssessmentStatus::Unscored => return Err(RegisterError::NotYetScored),
            AssessmentStatus::Registered => {
                let id = assessment.record_id().unwrap_or_else(|| RecordId::from_sequence(0));
                return Err(RegisterError::AlreadyRegistered(id));
            }
            AssessmentStatus::Scored => {}
        }

        // 2. Allocate the identifier.
        let sequence = match self.allocation {
            IdAllocation::CountDerived => self.store.count().await? + 1,
            IdAllocation::AtomicCounter => self.store.next_sequence().await?,
        };
        let record_id = RecordId::from_sequence(sequence);

        // 3. Persist the full record document.
        let record = assessment.to_record(cmd.recorded_at)?;
        self.store.persist(&record_id, &record.to_document()).await?;

        // 4. Advance the aggregate only after the write succeeded.
        assessment.register(record_id)?;

        tracing::info!(record_id = %record_id, allocation = ?self.allocation, "Assessment registered");

        Ok(RegisterAssessmentResult {
            assessment,
            record_id,
        })
    }
}
