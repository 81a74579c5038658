//! Assessment module - the questionnaire's data and navigation rules.
//!
//! - `AnswerRecord` - the answers, and the contract shared with consumers
//! - `validators` - pure predicates over single answers
//! - `StepSequencer` - fixed step order and per-step prompts
//! - `TransitionGuard` - forward/backward gating
//! - `AssessmentState` - the wizard state machine

mod answer;
mod catalog;
mod events;
mod guard;
mod progress;
mod record;
mod sequence;
mod state;
mod trimester;
pub mod validators;

pub use answer::{Answer, AnswerField};
pub use catalog::{common_condition, COMMON_CONDITIONS};
pub use events::AssessmentEvent;
pub use guard::{TransitionGuard, AGE_REQUIRED_MESSAGE, WEEK_REQUIRED_MESSAGE};
pub use progress::Progress;
pub use record::AnswerRecord;
pub use sequence::{Prompt, StepSequencer};
pub use state::AssessmentState;
pub use trimester::Trimester;
