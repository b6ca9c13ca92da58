//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

mod register_assessment;
mod score_assessment;

pub use register_assessment::{
    RegisterAssessmentCommand, RegisterAssessmentHandler, RegisterAssessmentResult, RegisterError,
};
pub use score_assessment::{ScoreAssessmentCommand, ScoreAssessmentHandler, ScoreAssessmentResult};
