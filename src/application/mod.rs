//! Application layer - stateful use cases built on the domain and ports.
//!
//! - `AssessmentController` - runs one wizard session and persists the result
//! - `AssessmentReader` - fail-soft read accessor for downstream features

mod assessment_controller;
mod assessment_reader;

pub use assessment_controller::{AssessmentController, CompletionCallback, Transition};
pub use assessment_reader::AssessmentReader;
