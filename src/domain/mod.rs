//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, step ids, errors)
//! - `assessment` - Answer record, validators, step sequencing and gating
//! - `guidance` - Pure consumers of a finished record (report, assistant context)

pub mod assessment;
pub mod foundation;
pub mod guidance;
