//! AssistantContext - personalization handed to the conversational assistant.
//!
//! Built from the stored record when there is one; without a record the
//! assistant runs generically and report generation stays locked.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::AnswerRecord;

pub const GREETING: &str = "Hello! I'm your Gentle Birth Assistant. How can I help you today?";

pub const ASSESSMENT_REQUIRED_NOTICE: &str =
    "Complete the health assessment for personalized advice and to unlock report generation.";

pub const REPORT_LOCKED_MESSAGE: &str = "Please complete the health assessment first";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantContext {
    pub greeting: String,
    /// Facts about the user for the assistant's instructions; empty when
    /// no assessment exists.
    pub profile_facts: Vec<String>,
    pub report_unlocked: bool,
    pub notice: Option<String>,
}

impl AssistantContext {
    pub fn from_record(record: Option<&AnswerRecord>) -> Self {
        let Some(record) = record else {
            return Self {
                greeting: GREETING.to_string(),
                profile_facts: Vec::new(),
                report_unlocked: false,
                notice: Some(ASSESSMENT_REQUIRED_NOTICE.to_string()),
            };
        };

        let mut facts = Vec::new();
        if let Some(age) = record.age() {
            facts.push(format!("The user is {} years old.", age));
        }
        if record.is_pregnant() {
            match (record.pregnancy_week(), record.trimester()) {
                (Some(week), Some(trimester)) => facts.push(format!(
                    "The user is pregnant, currently in week {} ({}).",
                    week,
                    trimester.label()
                )),
                _ => facts.push("The user is pregnant.".to_string()),
            }
        } else {
            facts.push("The user is not pregnant.".to_string());
        }
        if !record.active_conditions().is_empty() {
            facts.push(format!(
                "Pre-existing conditions: {}.",
                record.active_conditions().join(", ")
            ));
        }
        if !record.active_medications().is_empty() {
            facts.push(format!(
                "Current medications: {}.",
                record.active_medications().join(", ")
            ));
        } else if record.taking_medications() {
            facts.push("The user takes medications but did not list them.".to_string());
        }

        Self {
            greeting: GREETING.to_string(),
            profile_facts: facts,
            report_unlocked: true,
            notice: None,
        }
    }

    /// Preamble for the assistant's system instructions.
    pub fn system_preamble(&self) -> String {
        let mut preamble = String::from(
            "You are the Gentle Birth Assistant, providing pregnancy guidance and support. \
             You do not replace professional medical advice.",
        );
        if self.profile_facts.is_empty() {
            preamble.push_str(" No health assessment is available; keep advice general.");
        } else {
            preamble.push_str("\n\nUser profile:\n");
            for fact in &self.profile_facts {
                preamble.push_str(&format!("- {}\n", fact));
            }
        }
        preamble
    }
}
