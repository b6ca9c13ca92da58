//! Risk assessment bounded context.
//!
//! # Module Organization
//!
//! - `input` - Validated clinical questionnaire answers
//! - `bmi` - Body mass index derived from weight and height
//! - `coefficients` - Injectable logistic model weights
//! - `probability` - Risk probability value object
//! - `scorer` - Pure logistic-regression scorer
//! - `record` - Persisted risk record and its document projection
//! - `assessment` - Assessment aggregate with an explicit lifecycle

mod assessment;
mod bmi;
mod coefficients;
mod input;
mod probability;
mod record;
mod scorer;

pub use assessment::{Assessment, AssessmentStatus};
pub use bmi::BodyMassIndex;
pub use coefficients::CoefficientSet;
pub use input::RiskAssessmentInput;
pub use probability::RiskProbability;
pub use record::{DocumentValue, RecordDocument, RiskRecord, AFFIRMATIVE, NEGATIVE};
pub use scorer::RiskScorer;
