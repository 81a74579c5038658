//! Guidance module - pure consumers of a finished assessment.
//!
//! Both consumers take the record obtained through `AssessmentReader`; neither
//! reads storage on its own.

mod assistant_context;
mod report;

pub use assistant_context::{
    AssistantContext, ASSESSMENT_REQUIRED_NOTICE, GREETING, REPORT_LOCKED_MESSAGE,
};
pub use report::{
    BasicInformation, HealthReport, Recommendations, ReportError, ReportFormat, DISCLAIMER,
    REPORT_TITLE,
};
