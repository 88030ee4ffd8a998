//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions across entity lifecycle statuses (Session, Timetable).

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

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

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Pending,
        Running,
        Done,
    }

    impl StateMachine for TestStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use TestStatus::*;
            matches!((self, target), (Pending, Running) | (Running, Done))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use TestStatus::*;
            match self {
                Pending => vec![Running],
                Running => vec![Done],
                Done => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let result = TestStatus::Pending.transition_to(TestStatus::Running);
        assert_eq!(result, Ok(TestStatus::Running));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let result = TestStatus::Pending.transition_to(TestStatus::Done);
        assert!(result.is_err());
    }

    #[test]
    fn transition_to_fails_when_moving_backward() {
        let result = TestStatus::Done.transition_to(TestStatus::Pending);
        assert!(result.is_err());
    }

    #[test]
    fn is_terminal_only_for_final_state() {
        assert!(TestStatus::Done.is_terminal());
        assert!(!TestStatus::Pending.is_terminal());
        assert!(!TestStatus::Running.is_terminal());
    }
}
