//! HealthReport - personalized summary generated from a finished assessment.
//!
//! Sections mirror what the assistant's report view shows: basic information,
//! conditions and medications (only when the user said yes and listed some),
//! recommendations, and a fixed disclaimer.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::AnswerRecord;
use crate::domain::foundation::Timestamp;

pub const REPORT_TITLE: &str = "Your Personalized Health Report";

pub const DISCLAIMER: &str = "This report is generated for informational purposes only and is not a substitute for professional medical advice. Always consult with your healthcare provider for medical guidance.";

const GENERAL_WELLNESS: &str = "Based on your health profile, we recommend focusing on general wellness and preventive care.";

const STAGE_TIPS: [&str; 4] = [
    "Stay hydrated and maintain a balanced diet rich in essential nutrients",
    "Engage in gentle exercise appropriate for your trimester",
    "Monitor any unusual symptoms and report them to your doctor",
    "Consider joining a prenatal support group",
];

/// Output formats the report can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
    Yaml,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

/// Errors while exporting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInformation {
    pub age: Option<i32>,
    pub pregnancy_status: String,
    /// Present only when pregnant.
    pub current_week: Option<i32>,
    pub trimester: Option<String>,
    pub taking_medications: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub summary: String,
    /// Stage tips, only for pregnant users.
    pub stage_tips: Vec<String>,
    pub medication_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub title: String,
    pub generated_at: Timestamp,
    pub basic_information: BasicInformation,
    pub conditions: Vec<String>,
    pub medications: Vec<String>,
    pub recommendations: Recommendations,
    pub disclaimer: String,
}

impl HealthReport {
    /// Builds the report for a finished assessment.
    pub fn from_record(record: &AnswerRecord, generated_at: Timestamp) -> Self {
        let pregnant = record.is_pregnant();
        let week = if pregnant { record.pregnancy_week() } else { None };

        let basic_information = BasicInformation {
            age: record.age(),
            pregnancy_status: if pregnant { "Pregnant" } else { "Not Pregnant" }.to_string(),
            current_week: week,
            trimester: record.trimester().map(|t| t.label().to_string()),
            taking_medications: record.taking_medications(),
        };

        let summary = match week {
            Some(week) => format!(
                "Based on your pregnancy status (Week {}), we recommend regular check-ups with your healthcare provider.",
                week
            ),
            None if pregnant => "Based on your pregnancy status, we recommend regular check-ups with your healthcare provider.".to_string(),
            None => GENERAL_WELLNESS.to_string(),
        };

        let stage_tips = if pregnant {
            STAGE_TIPS.iter().map(|t| t.to_string()).collect()
        } else {
            Vec::new()
        };

        let medication_note = record.taking_medications().then(|| {
            format!(
                "Please consult with your healthcare provider about the safety of your current medications{}.",
                if pregnant { " during pregnancy" } else { "" }
            )
        });

        Self {
            title: REPORT_TITLE.to_string(),
            generated_at,
            basic_information,
            conditions: record.active_conditions().to_vec(),
            medications: record.active_medications().to_vec(),
            recommendations: Recommendations {
                summary,
                stage_tips,
                medication_note,
            },
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Renders the report in the requested format.
    pub fn export(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(self)?),
        }
    }

    pub fn to_markdown(&self) -> String {
        let info = &self.basic_information;
        let mut doc = format!("# {}\n\n", self.title);
        doc.push_str(&format!(
            "_Generated {}_\n\n",
            self.generated_at.to_display_string()
        ));

        doc.push_str("## Basic Information\n\n");
        match info.age {
            Some(age) => doc.push_str(&format!("- **Age:** {} years\n", age)),
            None => doc.push_str("- **Age:** not provided\n"),
        }
        doc.push_str(&format!("- **Pregnancy Status:** {}\n", info.pregnancy_status));
        if let Some(week) = info.current_week {
            doc.push_str(&format!("- **Current Week:** {}\n", week));
        }
        if let Some(trimester) = &info.trimester {
            doc.push_str(&format!("- **Trimester:** {}\n", trimester));
        }
        doc.push_str(&format!(
            "- **Taking Medications:** {}\n\n",
            if info.taking_medications { "Yes" } else { "No" }
        ));

        if !self.conditions.is_empty() {
            doc.push_str("## Pre-existing Conditions\n\n");
            for condition in &self.conditions {
                doc.push_str(&format!("- {}\n", condition));
            }
            doc.push('\n');
        }

        if !self.medications.is_empty() {
            doc.push_str("## Current Medications\n\n");
            for med in &self.medications {
                doc.push_str(&format!("- {}\n", med));
            }
            doc.push('\n');
        }

        doc.push_str("## Recommendations\n\n");
        doc.push_str(&format!("{}\n\n", self.recommendations.summary));
        if !self.recommendations.stage_tips.is_empty() {
            doc.push_str("For your current stage:\n\n");
            for tip in &self.recommendations.stage_tips {
                doc.push_str(&format!("- {}\n", tip));
            }
            doc.push('\n');
        }
        if let Some(note) = &self.recommendations.medication_note {
            doc.push_str(&format!("{}\n\n", note));
        }

        doc.push_str("## Important Disclaimer\n\n");
        doc.push_str(&format!("> {}\n", self.disclaimer));
        doc
    }
}
