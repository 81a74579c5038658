//! StepSequencer - ordering of the questionnaire steps.
//!
//! # Step Order
//!
//! 1. Age → 2. Conditions → 3. Pregnancy → 4. Medications
//!
//! The list is the same for every record. Answers only change which
//! sub-questions ([`Prompt`]s) are rendered inside a step: the week picker
//! appears inside Pregnancy when the user is pregnant, and the free-text lists
//! appear once the matching yes/no question is answered yes. Keeping the step
//! count fixed means the progress denominator never moves when the pregnancy
//! answer is toggled.
//!
//! # Usage
//!
//! ```ignore
//! let steps = StepSequencer::active_steps(&record);
//! let next = StepSequencer::next(StepId::Conditions, &record); // Some(Pregnancy)
//! let prompts = StepSequencer::prompts(StepId::Pregnancy, &record);
//! ```

use crate::domain::foundation::StepId;

use super::record::AnswerRecord;

/// A sub-question rendered inside a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prompt {
    Age,
    HasConditions,
    ConditionList,
    PregnancyStatus,
    PregnancyWeek,
    TakingMedications,
    MedicationList,
}

/// Central location for step ordering logic.
pub struct StepSequencer;

impl StepSequencer {
    /// The canonical order of steps.
    pub const ORDER: [StepId; 4] = [
        StepId::Age,
        StepId::Conditions,
        StepId::Pregnancy,
        StepId::Medications,
    ];

    /// Returns the ordered steps active for `record`.
    ///
    /// Every step is always active; the record is taken so callers never
    /// need to know that.
    pub fn active_steps(_record: &AnswerRecord) -> Vec<StepId> {
        Self::ORDER.to_vec()
    }

    /// Denominator for progress.
    pub fn total_steps() -> usize {
        Self::ORDER.len()
    }

    /// Returns the 0-based index of a step in the sequence.
    #[inline]
    pub fn order_index(step: StepId) -> usize {
        match step {
            StepId::Age => 0,
            StepId::Conditions => 1,
            StepId::Pregnancy => 2,
            StepId::Medications => 3,
        }
    }

    /// Returns the step after `step`, or None at the end.
    pub fn next(step: StepId, record: &AnswerRecord) -> Option<StepId> {
        let steps = Self::active_steps(record);
        let idx = steps.iter().position(|s| *s == step)?;
        steps.get(idx + 1).copied()
    }

    /// Returns the step before `step`, or None at the start.
    pub fn previous(step: StepId, record: &AnswerRecord) -> Option<StepId> {
        let steps = Self::active_steps(record);
        let idx = steps.iter().position(|s| *s == step)?;
        idx.checked_sub(1).and_then(|i| steps.get(i)).copied()
    }

    pub fn first() -> StepId {
        Self::ORDER[0]
    }

    pub fn last() -> StepId {
        Self::ORDER[Self::ORDER.len() - 1]
    }

    pub fn is_first(step: StepId) -> bool {
        step == Self::first()
    }

    /// True if completing `step` finalizes the assessment.
    pub fn is_last(step: StepId, record: &AnswerRecord) -> bool {
        Self::next(step, record).is_none()
    }

    /// Returns the sub-questions rendered for `step` given the answers so far.
    pub fn prompts(step: StepId, record: &AnswerRecord) -> Vec<Prompt> {
        match step {
            StepId::Age => vec![Prompt::Age],
            StepId::Conditions => {
                let mut prompts = vec![Prompt::HasConditions];
                if record.has_pre_existing_conditions() {
                    prompts.push(Prompt::ConditionList);
                }
                prompts
            }
            StepId::Pregnancy => {
                let mut prompts = vec![Prompt::PregnancyStatus];
                if record.is_pregnant() {
                    prompts.push(Prompt::PregnancyWeek);
                }
                prompts
            }
            StepId::Medications => {
                let mut prompts = vec![Prompt::TakingMedications];
                if record.taking_medications() {
                    prompts.push(Prompt::MedicationList);
                }
                prompts
            }
        }
    }
}
