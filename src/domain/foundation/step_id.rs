//! StepId enum representing the four logical questionnaire steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One logical screen of the assessment wizard.
///
/// Pregnancy covers both the status question and the week selection; it is a
/// single step for sequencing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Age,
    Conditions,
    Pregnancy,
    Medications,
}

impl StepId {
    /// Returns the stable machine name used in logs and error details.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Age => "age",
            StepId::Conditions => "conditions",
            StepId::Pregnancy => "pregnancy",
            StepId::Medications => "medications",
        }
    }

    /// Returns the question shown as the step heading.
    pub fn question(&self) -> &'static str {
        match self {
            StepId::Age => "What is your age?",
            StepId::Conditions => "Do you have any pre-existing health conditions?",
            StepId::Pregnancy => "Are you currently pregnant?",
            StepId::Medications => "Are you currently taking any medications?",
        }
    }

    /// Returns the explanatory line shown under the heading.
    pub fn hint(&self) -> &'static str {
        match self {
            StepId::Age => "This helps us tailor advice to your specific life stage.",
            StepId::Conditions => "This information helps us provide more personalized advice.",
            StepId::Pregnancy => "Your answer will help us tailor our assistance to your needs.",
            StepId::Medications => "This helps us identify potential interactions or concerns.",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
