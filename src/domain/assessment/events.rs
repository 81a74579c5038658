//! Assessment domain events.

use crate::domain::foundation::{AssessmentId, StepId, Timestamp};
use serde::{Deserialize, Serialize};

use super::answer::AnswerField;

/// Events recorded by the controller during one wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssessmentEvent {
    /// A new wizard session started.
    Started {
        assessment_id: AssessmentId,
        started_at: Timestamp,
    },

    /// An answer was written into the live record.
    AnswerUpdated {
        assessment_id: AssessmentId,
        field: String,
    },

    /// The wizard moved forward one step.
    Advanced {
        assessment_id: AssessmentId,
        from: StepId,
        to: StepId,
    },

    /// The wizard moved back one step.
    Retreated {
        assessment_id: AssessmentId,
        from: StepId,
        to: StepId,
    },

    /// An advance was rejected by the guard.
    ValidationFailed {
        assessment_id: AssessmentId,
        step: StepId,
        message: String,
    },

    /// The record was frozen and persisted.
    Completed {
        assessment_id: AssessmentId,
        completed_at: Timestamp,
    },
}

impl AssessmentEvent {
    pub(crate) fn answer_updated(assessment_id: AssessmentId, field: AnswerField) -> Self {
        AssessmentEvent::AnswerUpdated {
            assessment_id,
            field: field.as_str().to_string(),
        }
    }
}
