//! Risk probability value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A probability in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskProbability(f64);

impl RiskProbability {
    /// Certain absence of risk.
    pub const ZERO: Self = Self(0.0);

    /// Creates a probability, clamping into the valid range.
    ///
    /// Non-finite values collapse to zero; the scorer cannot produce them on
    /// bounded input, so this path only matters for hand-built values.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a probability, returning error if outside `[0, 1]`.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("probability", 0.0, 1.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the probability as a fraction in `[0, 1]`.
    pub fn as_fraction(&self) -> f64 {
        self.0
    }

    /// Returns the probability as a percentage in `[0, 100]`.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl Default for RiskProbability {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RiskProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}
