//! Persisted risk record and its document projection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

use super::{BodyMassIndex, RiskAssessmentInput, RiskProbability};

/// Questionnaire answer string persisted for a set flag.
pub const AFFIRMATIVE: &str = "Sí";
/// Questionnaire answer string persisted for an unset flag.
pub const NEGATIVE: &str = "No";

/// One scalar field of a persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentValue {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

/// Flat field-name to scalar mapping, the shape the backing store accepts.
pub type RecordDocument = BTreeMap<String, DocumentValue>;

/// A confirmed assessment as it is registered: the submitted measurements,
/// the derived BMI, the computed probability, and the creation moment.
///
/// Records are created exactly once at confirmation time and never mutated
/// or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    input: RiskAssessmentInput,
    bmi: BodyMassIndex,
    probability: RiskProbability,
    recorded_at: Timestamp,
}

impl RiskRecord {
    /// Assembles a record from a scored assessment's parts.
    pub fn new(
        input: RiskAssessmentInput,
        probability: RiskProbability,
        recorded_at: Timestamp,
    ) -> Self {
        let bmi = input.bmi();
        Self {
            input,
            bmi,
            probability,
            recorded_at,
        }
    }

    /// The submitted measurements.
    pub fn input(&self) -> &RiskAssessmentInput {
        &self.input
    }

    /// The derived body mass index.
    pub fn bmi(&self) -> BodyMassIndex {
        self.bmi
    }

    /// The computed risk probability.
    pub fn probability(&self) -> RiskProbability {
        self.probability
    }

    /// When the record was created.
    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }

    /// Projects the record onto the flat document shape the store persists.
    ///
    /// The smoker and diabetes flags persist as the questionnaire answer
    /// strings, the probability as a fraction, and the creation moment as
    /// separate `YYYY-MM-DD` and `HH:MM:SS` strings.
    pub fn to_document(&self) -> RecordDocument {
        let mut doc = RecordDocument::new();
        doc.insert("age".into(), DocumentValue::Integer(i64::from(self.input.age())));
        doc.insert("weight".into(), DocumentValue::Double(self.input.weight_kg()));
        doc.insert("height".into(), DocumentValue::Double(self.input.height_cm()));
        doc.insert("bmi".into(), DocumentValue::Double(self.bmi.value()));
        doc.insert("is_smoker".into(), answer(self.input.is_smoker()));
        doc.insert("has_diabetes".into(), answer(self.input.has_diabetes()));
        doc.insert(
            "systolic_blood_pressure".into(),
            DocumentValue::Double(self.input.systolic_bp_mmhg()),
        );
        doc.insert(
            "abdominal_circumference".into(),
            DocumentValue::Double(self.input.abdominal_circumference_cm()),
        );
        doc.insert(
            "probability".into(),
            DocumentValue::Double(self.probability.as_fraction()),
        );
        doc.insert("date".into(), DocumentValue::String(self.recorded_at.date_string()));
        doc.insert("time".into(), DocumentValue::String(self.recorded_at.time_string()));
        doc
    }

    /// Rebuilds a record from its persisted document.
    pub fn from_document(doc: &RecordDocument) -> Result<Self, DomainError> {
        let age = get_integer(doc, "age")?;
        let age = u32::try_from(age).map_err(|_| {
            DomainError::new(ErrorCode::InvalidFormat, format!("Negative age in document: {}", age))
        })?;

        let input = RiskAssessmentInput::new(
            age,
            get_double(doc, "weight")?,
            get_double(doc, "height")?,
            get_double(doc, "systolic_blood_pressure")?,
            get_answer(doc, "is_smoker")?,
            get_answer(doc, "has_diabetes")?,
            get_double(doc, "abdominal_circumference")?,
        )?;

        let probability = RiskProbability::try_new(get_double(doc, "probability")?)?;
        let recorded_at =
            Timestamp::from_date_time_strings(&get_string(doc, "date")?, &get_string(doc, "time")?)?;

        Ok(Self::new(input, probability, recorded_at))
    }
}

fn answer(flag: bool) -> DocumentValue {
    DocumentValue::String(if flag { AFFIRMATIVE } else { NEGATIVE }.to_string())
}

fn get(doc: &RecordDocument, field: &str) -> Result<DocumentValue, DomainError> {
    doc.get(field).cloned().ok_or_else(|| {
        DomainError::new(ErrorCode::InvalidFormat, format!("Document is missing field '{}'", field))
    })
}

fn get_integer(doc: &RecordDocument, field: &str) -> Result<i64, DomainError> {
    match get(doc, field)? {
        DocumentValue::Integer(v) => Ok(v),
        other => Err(type_mismatch(field, "integer", &other)),
    }
}

fn get_double(doc: &RecordDocument, field: &str) -> Result<f64, DomainError> {
    match get(doc, field)? {
        DocumentValue::Double(v) => Ok(v),
        // Stores that round-trip whole numbers as integers stay readable.
        DocumentValue::Integer(v) => Ok(v as f64),
        other => Err(type_mismatch(field, "double", &other)),
    }
}

fn get_string(doc: &RecordDocument, field: &str) -> Result<String, DomainError> {
    match get(doc, field)? {
        DocumentValue::String(v) => Ok(v),
        other => Err(type_mismatch(field, "string", &other)),
    }
}

fn get_answer(doc: &RecordDocument, field: &str) -> Result<bool, DomainError> {
    match get(doc, field)? {
        DocumentValue::String(s) if s == AFFIRMATIVE => Ok(true),
        DocumentValue::String(s) if s == NEGATIVE => Ok(false),
        DocumentValue::Boolean(b) => Ok(b),
        other => Err(DomainError::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' is not a questionnaire answer: {:?}", field, other),
        )),
    }
}

fn type_mismatch(field: &str, expected: &str, actual: &DocumentValue) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidFormat,
        format!("Field '{}' is not a {}: {:?}", field, expected, actual),
    )
}
