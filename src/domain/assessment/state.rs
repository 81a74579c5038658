//! AssessmentState - where the wizard currently is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, StepId};

use super::sequence::StepSequencer;

/// One state per step plus the terminal `Completed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "step")]
pub enum AssessmentState {
    InProgress(StepId),
    Completed,
}

impl AssessmentState {
    /// The initial state: the first step.
    pub fn initial() -> Self {
        AssessmentState::InProgress(StepSequencer::first())
    }

    /// The current step, if the wizard has not finished.
    pub fn step(&self) -> Option<StepId> {
        match self {
            AssessmentState::InProgress(step) => Some(*step),
            AssessmentState::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AssessmentState::Completed)
    }
}

impl StateMachine for AssessmentState {
    /// Valid transitions:
    /// - a step -> the adjacent step on either side
    /// - the last step -> Completed
    fn can_transition_to(&self, target: &Self) -> bool {
        use AssessmentState::*;
        match (self, target) {
            (InProgress(from), InProgress(to)) => {
                StepSequencer::order_index(*from).abs_diff(StepSequencer::order_index(*to)) == 1
            }
            (InProgress(from), Completed) => *from == StepSequencer::last(),
            (Completed, _) => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AssessmentState::*;
        match self {
            InProgress(step) => {
                let idx = StepSequencer::order_index(*step);
                let mut targets = Vec::new();
                if let Some(prev) = idx.checked_sub(1) {
                    targets.push(InProgress(StepSequencer::ORDER[prev]));
                }
                match StepSequencer::ORDER.get(idx + 1) {
                    Some(next) => targets.push(InProgress(*next)),
                    None => targets.push(Completed),
                }
                targets
            }
            Completed => vec![],
        }
    }
}

impl fmt::Display for AssessmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentState::InProgress(step) => write!(f, "{}", step),
            AssessmentState::Completed => write!(f, "completed"),
        }
    }
}
