//! AssessmentController - the stateful wizard API.
//!
//! Owns the live [`AnswerRecord`] for one wizard session and combines the
//! sequencer, the guard and the persistence gateway:
//!
//! 1. `update_answer` mutates the record; no validation, no step change
//! 2. `advance` asks the guard; on the last step it freezes the record,
//!    re-checks every step against it, writes it to the gateway, enters
//!    `Completed` and fires the completion callback once
//! 3. `retreat` moves back one step (no-op on the first step)
//!
//! Operations after completion are caller bugs and are rejected with
//! `ErrorCode::AssessmentCompleted`.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::assessment::{
    Answer, AnswerRecord, AssessmentEvent, AssessmentState, Progress, Prompt, StepSequencer,
    TransitionGuard,
};
use crate::domain::foundation::{
    AssessmentId, DomainError, ErrorCode, StateMachine, StepId, Timestamp, ValidationError,
};
use crate::ports::{PersistenceError, PersistenceGateway, ASSESSMENT_STORAGE_KEY};

/// Callback invoked once when the assessment is finalized.
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Outcome of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The current step changed.
    Moved { from: StepId, to: StepId },
    /// Nothing changed (retreat from the first step).
    Stayed(StepId),
    /// The record was persisted and the wizard finished.
    Completed,
}

pub struct AssessmentController {
    id: AssessmentId,
    state: AssessmentState,
    record: AnswerRecord,
    gateway: Arc<dyn PersistenceGateway>,
    storage_key: String,
    on_complete: Option<CompletionCallback>,
    events: Vec<AssessmentEvent>,
}

impl AssessmentController {
    /// Starts a wizard at the first step with an empty record, persisting to
    /// the default key.
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_storage_key(gateway, ASSESSMENT_STORAGE_KEY)
    }

    /// Starts a wizard that persists under `storage_key`.
    pub fn with_storage_key(
        gateway: Arc<dyn PersistenceGateway>,
        storage_key: impl Into<String>,
    ) -> Self {
        let id = AssessmentId::new();
        let started_at = Timestamp::now();
        info!(assessment_id = %id, "assessment started");

        Self {
            id,
            state: AssessmentState::initial(),
            record: AnswerRecord::new(),
            gateway,
            storage_key: storage_key.into(),
            on_complete: None,
            events: vec![AssessmentEvent::Started {
                assessment_id: id,
                started_at,
            }],
        }
    }

    /// Registers the one-shot completion signal, replacing any earlier one.
    pub fn on_complete(&mut self, callback: impl FnOnce() + Send + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> AssessmentId {
        self.id
    }

    pub fn state(&self) -> AssessmentState {
        self.state
    }

    /// The step being shown, or None once completed.
    pub fn current_step(&self) -> Option<StepId> {
        self.state.step()
    }

    pub fn completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Read-only view of the answers so far.
    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Ordered steps of this wizard.
    pub fn steps(&self) -> Vec<StepId> {
        StepSequencer::active_steps(&self.record)
    }

    /// Sub-questions to render for the current step.
    pub fn prompts(&self) -> Vec<Prompt> {
        match self.state.step() {
            Some(step) => StepSequencer::prompts(step, &self.record),
            None => Vec::new(),
        }
    }

    /// Position of the current step; complete once finalized.
    pub fn progress(&self) -> Progress {
        let total = StepSequencer::total_steps();
        match self.state.step() {
            Some(step) => {
                let idx = self
                    .steps()
                    .iter()
                    .position(|s| *s == step)
                    .unwrap_or_else(|| StepSequencer::order_index(step));
                Progress::at_index(idx, total)
            }
            None => Progress::complete(total),
        }
    }

    /// True when advancing from the current step would finalize.
    pub fn is_on_last_step(&self) -> bool {
        self.state
            .step()
            .is_some_and(|step| StepSequencer::is_last(step, &self.record))
    }

    /// Drains recorded events.
    pub fn take_events(&mut self) -> Vec<AssessmentEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────────────────────────────────────────────
    // Operations
    // ───────────────────────────────────────────────────────────────

    /// Writes an answer into the live record.
    ///
    /// # Errors
    ///
    /// `AssessmentCompleted` if the wizard has already finished.
    pub fn update_answer(&mut self, answer: Answer) -> Result<(), DomainError> {
        self.ensure_in_progress("update_answer")?;
        let field = answer.field();
        debug!(assessment_id = %self.id, %field, "answer updated");
        answer.apply(&mut self.record);
        self.events
            .push(AssessmentEvent::answer_updated(self.id, field));
        Ok(())
    }

    /// Writes an answer addressed by wire field name.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if `field` is not a record field
    /// - `InvalidFormat` if `value` has the wrong type
    /// - `AssessmentCompleted` if the wizard has already finished
    pub fn update_field(&mut self, field: &str, value: Value) -> Result<(), DomainError> {
        let answer = Answer::from_field(field, value).inspect_err(|e| {
            error!(assessment_id = %self.id, field, error = %e, "rejected answer update");
        })?;
        self.update_answer(answer)
    }

    /// Moves forward one step, or finalizes on the last step.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` when the guard blocks; the message is user-facing
    ///   and the state is unchanged. On the last step this also covers answers
    ///   edited after their own step was passed; `details["step"]` names the
    ///   step to revisit
    /// - `StorageFailed` when the record could not be persisted; the wizard
    ///   stays on the last step
    /// - `AssessmentCompleted` if the wizard has already finished
    pub fn advance(&mut self) -> Result<Transition, DomainError> {
        let step = self.ensure_in_progress("advance")?;

        if let Err(rejection) = TransitionGuard::check_advance(step, &self.record) {
            warn!(assessment_id = %self.id, %step, reason = %rejection.message, "advance blocked");
            self.events.push(AssessmentEvent::ValidationFailed {
                assessment_id: self.id,
                step,
                message: rejection.message.clone(),
            });
            return Err(rejection);
        }

        match StepSequencer::next(step, &self.record) {
            Some(next) => {
                self.state = self.state.transition_to(AssessmentState::InProgress(next))?;
                debug!(assessment_id = %self.id, from = %step, to = %next, "advanced");
                self.events.push(AssessmentEvent::Advanced {
                    assessment_id: self.id,
                    from: step,
                    to: next,
                });
                Ok(Transition::Moved { from: step, to: next })
            }
            None => self.finalize(),
        }
    }

    /// Moves back one step. A no-op on the first step.
    ///
    /// # Errors
    ///
    /// `AssessmentCompleted` if the wizard has already finished.
    pub fn retreat(&mut self) -> Result<Transition, DomainError> {
        let step = self.ensure_in_progress("retreat")?;

        if !TransitionGuard::can_retreat(step) {
            return Ok(Transition::Stayed(step));
        }

        let Some(previous) = StepSequencer::previous(step, &self.record) else {
            return Ok(Transition::Stayed(step));
        };

        self.state = self
            .state
            .transition_to(AssessmentState::InProgress(previous))?;
        debug!(assessment_id = %self.id, from = %step, to = %previous, "retreated");
        self.events.push(AssessmentEvent::Retreated {
            assessment_id: self.id,
            from: step,
            to: previous,
        });
        Ok(Transition::Moved {
            from: step,
            to: previous,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn finalize(&mut self) -> Result<Transition, DomainError> {
        let completed = self.state.transition_to(AssessmentState::Completed)?;
        let frozen = self.record.freeze();
        self.check_finished(&frozen)?;

        let written = serde_json::to_string(&frozen)
            .map_err(|e| PersistenceError::SerializationFailed(e.to_string()))
            .and_then(|json| self.gateway.write(&self.storage_key, &json));
        if let Err(e) = written {
            error!(
                assessment_id = %self.id,
                key = %self.storage_key,
                error = %e,
                "failed to persist assessment"
            );
            return Err(storage_failed(e));
        }

        self.state = completed;
        self.record = frozen;

        let completed_at = Timestamp::now();
        info!(assessment_id = %self.id, key = %self.storage_key, "assessment completed");
        self.events.push(AssessmentEvent::Completed {
            assessment_id: self.id,
            completed_at,
        });

        if let Some(signal) = self.on_complete.take() {
            signal();
        }

        Ok(Transition::Completed)
    }

    /// Answers can change after their step was passed, so every step's guard
    /// runs again on the frozen record before anything is written.
    fn check_finished(&mut self, frozen: &AnswerRecord) -> Result<(), DomainError> {
        let Some(current) = self.state.step() else {
            return Ok(());
        };

        for step in StepSequencer::ORDER {
            if let Err(rejection) = TransitionGuard::check_advance(step, frozen) {
                warn!(
                    assessment_id = %self.id,
                    %step,
                    reason = %rejection.message,
                    "finalize blocked by an earlier answer"
                );
                self.events.push(AssessmentEvent::ValidationFailed {
                    assessment_id: self.id,
                    step,
                    message: rejection.message.clone(),
                });
                return Err(rejection);
            }
        }

        frozen.validate().map_err(|e| {
            warn!(assessment_id = %self.id, step = %current, error = %e, "finalize blocked by record schema");
            DomainError::validation(field_of(&e), e.to_string())
                .with_detail("step", current.as_str())
        })
    }

    fn ensure_in_progress(&self, operation: &str) -> Result<StepId, DomainError> {
        self.state.step().ok_or_else(|| {
            error!(assessment_id = %self.id, operation, "operation called after completion");
            DomainError::new(
                ErrorCode::AssessmentCompleted,
                format!("Cannot {} a completed assessment", operation),
            )
        })
    }
}

fn field_of(err: &ValidationError) -> &str {
    match err {
        ValidationError::EmptyField { field }
        | ValidationError::OutOfRange { field, .. }
        | ValidationError::InvalidFormat { field, .. } => field.as_str(),
    }
}

fn storage_failed(err: PersistenceError) -> DomainError {
    DomainError::new(ErrorCode::StorageFailed, err.to_string())
}
