//! State machine trait for lifecycle enums.
//!
//! The assessment wizard is modelled as a small state machine: one state per
//! question step plus a terminal state. Implementors describe which moves are
//! legal and get checked transitions for free.

use super::{DomainError, ErrorCode};

/// Trait for enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// let next = AssessmentState::InProgress(StepId::Age)
///     .transition_to(AssessmentState::InProgress(StepId::Conditions))?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
