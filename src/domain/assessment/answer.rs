//! Answer updates accepted by the controller.
//!
//! `Answer` is the typed input surface; `Answer::from_field` is the dynamic
//! one used by UI collaborators that address fields by their wire name.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::record::AnswerRecord;
use super::trimester::Trimester;

/// The seven fields of an [`AnswerRecord`], by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    Age,
    HasPreExistingConditions,
    Conditions,
    IsPregnant,
    PregnancyWeek,
    TakingMedications,
    Medications,
}

impl AnswerField {
    pub const ALL: [AnswerField; 7] = [
        AnswerField::Age,
        AnswerField::HasPreExistingConditions,
        AnswerField::Conditions,
        AnswerField::IsPregnant,
        AnswerField::PregnancyWeek,
        AnswerField::TakingMedications,
        AnswerField::Medications,
    ];

    /// The camelCase name used in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerField::Age => "age",
            AnswerField::HasPreExistingConditions => "hasPreExistingConditions",
            AnswerField::Conditions => "conditions",
            AnswerField::IsPregnant => "isPregnant",
            AnswerField::PregnancyWeek => "pregnancyWeek",
            AnswerField::TakingMedications => "takingMedications",
            AnswerField::Medications => "medications",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnswerField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnswerField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownField,
                    format!("'{}' is not an assessment field", s),
                )
                .with_detail("field", s)
            })
    }
}

/// A single mutation of the live record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Age(Option<i32>),
    HasPreExistingConditions(bool),
    /// Replaces the whole list.
    Conditions(Vec<String>),
    AddCondition(String),
    RemoveCondition(String),
    ToggleCondition(String),
    IsPregnant(bool),
    PregnancyWeek(Option<i32>),
    /// Picks a trimester and pre-selects its default week.
    Trimester(Trimester),
    TakingMedications(bool),
    /// Replaces the whole list.
    Medications(Vec<String>),
    AddMedication(String),
    RemoveMedication(String),
}

impl Answer {
    /// Builds an answer from a wire field name and a JSON value.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if `field` is not one of the record's fields
    /// - `InvalidFormat` if `value` has the wrong JSON type for the field
    pub fn from_field(field: &str, value: Value) -> Result<Self, DomainError> {
        let field: AnswerField = field.parse()?;
        let answer = match field {
            AnswerField::Age => Answer::Age(decode(field, value)?),
            AnswerField::HasPreExistingConditions => {
                Answer::HasPreExistingConditions(decode(field, value)?)
            }
            AnswerField::Conditions => Answer::Conditions(decode(field, value)?),
            AnswerField::IsPregnant => Answer::IsPregnant(decode(field, value)?),
            AnswerField::PregnancyWeek => Answer::PregnancyWeek(decode(field, value)?),
            AnswerField::TakingMedications => Answer::TakingMedications(decode(field, value)?),
            AnswerField::Medications => Answer::Medications(decode(field, value)?),
        };
        Ok(answer)
    }

    /// The record field this answer writes to.
    pub fn field(&self) -> AnswerField {
        match self {
            Answer::Age(_) => AnswerField::Age,
            Answer::HasPreExistingConditions(_) => AnswerField::HasPreExistingConditions,
            Answer::Conditions(_)
            | Answer::AddCondition(_)
            | Answer::RemoveCondition(_)
            | Answer::ToggleCondition(_) => AnswerField::Conditions,
            Answer::IsPregnant(_) => AnswerField::IsPregnant,
            Answer::PregnancyWeek(_) | Answer::Trimester(_) => AnswerField::PregnancyWeek,
            Answer::TakingMedications(_) => AnswerField::TakingMedications,
            Answer::Medications(_) | Answer::AddMedication(_) | Answer::RemoveMedication(_) => {
                AnswerField::Medications
            }
        }
    }

    /// Writes the answer into the record. No range checks happen here.
    pub(crate) fn apply(self, record: &mut AnswerRecord) {
        match self {
            Answer::Age(age) => record.set_age(age),
            Answer::HasPreExistingConditions(v) => record.set_has_pre_existing_conditions(v),
            Answer::Conditions(list) => record.set_conditions(list),
            Answer::AddCondition(c) => {
                record.add_condition(&c);
            }
            Answer::RemoveCondition(c) => {
                record.remove_condition(&c);
            }
            Answer::ToggleCondition(c) => {
                record.toggle_condition(&c);
            }
            Answer::IsPregnant(v) => record.set_is_pregnant(v),
            Answer::PregnancyWeek(week) => record.set_pregnancy_week(week),
            Answer::Trimester(t) => record.select_trimester(t),
            Answer::TakingMedications(v) => record.set_taking_medications(v),
            Answer::Medications(list) => record.set_medications(list),
            Answer::AddMedication(m) => {
                record.add_medication(&m);
            }
            Answer::RemoveMedication(m) => {
                record.remove_medication(&m);
            }
        }
    }
}

fn decode<T: DeserializeOwned>(field: AnswerField, value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::from(ValidationError::invalid_format(field.as_str(), e.to_string())))
}
