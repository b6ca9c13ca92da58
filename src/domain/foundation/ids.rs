//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Human-readable sequential identifier for a registered risk record.
///
/// Rendered as `CX` followed by the sequence number zero-padded to five
/// digits: sequence 1 is `CX00001`, sequence 42 is `CX00042`. Sequences
/// above 99999 keep their full width instead of truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(u64);

impl RecordId {
    /// Prefix shared by every record identifier.
    pub const PREFIX: &'static str = "CX";

    /// Creates a RecordId from a sequence number.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number behind this identifier.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:05}", Self::PREFIX, self.0)
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(Self::PREFIX).ok_or_else(|| {
            ValidationError::invalid_format("record_id", format!("missing {} prefix", Self::PREFIX))
        })?;

        if digits.len() < 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "record_id",
                "expected at least five decimal digits after the prefix",
            ));
        }

        let sequence = digits.parse::<u64>().map_err(|e| {
            ValidationError::invalid_format("record_id", format!("sequence overflow: {}", e))
        })?;

        Ok(Self(sequence))
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
