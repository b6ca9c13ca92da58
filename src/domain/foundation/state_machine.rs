//! State machine trait for status enums.
//!
//! Assessment lifecycles move through explicit states instead of ambient
//! boolean flags; this trait gives status enums validated transitions.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors declare which transitions are legal and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for AssessmentStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (Unscored, Scored) | (Scored, Scored) | (Scored, Registered)
///         )
///     }
///
///     fn is_terminal(&self) -> bool {
///         matches!(self, Registered)
///     }
/// }
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns true if no transition leaves this state.
    fn is_terminal(&self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Open,
        Confirmed,
        Filed,
    }

    impl StateMachine for TestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TestStatus::*;
            matches!((self, target), (Open, Confirmed) | (Confirmed, Filed))
        }

        fn is_terminal(&self) -> bool {
            matches!(self, TestStatus::Filed)
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = TestStatus::Open.transition_to(TestStatus::Confirmed);
        assert_eq!(result.unwrap(), TestStatus::Confirmed);
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = TestStatus::Open.transition_to(TestStatus::Filed);
        assert!(result.is_err());
    }

    #[test]
    fn terminal_state_admits_no_transitions() {
        assert!(TestStatus::Filed.is_terminal());
        assert!(!TestStatus::Filed.can_transition_to(&TestStatus::Open));
        assert!(!TestStatus::Filed.can_transition_to(&TestStatus::Confirmed));
    }

    #[test]
    fn non_terminal_states_report_as_such() {
        assert!(!TestStatus::Open.is_terminal());
        assert!(!TestStatus::Confirmed.is_terminal());
    }
}
