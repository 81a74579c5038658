//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assessment domain.

mod errors;
mod ids;
mod state_machine;
mod step_id;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AssessmentId;
pub use state_machine::StateMachine;
pub use step_id::StepId;
pub use timestamp::Timestamp;
