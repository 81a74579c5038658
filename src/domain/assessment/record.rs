//! AnswerRecord - the structured set of questionnaire answers.
//!
//! This is the single contract shared with everything downstream: the
//! persisted JSON uses exactly these field names (camelCase) and optionality.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::trimester::Trimester;
use super::validators::{
    is_valid_age, is_valid_week, normalize_condition, normalize_medication, MAX_AGE, MAX_WEEK,
    MIN_AGE, MIN_WEEK,
};

/// Answers collected by the assessment wizard.
///
/// Mutators are crate-private: the live record is owned by the
/// `AssessmentController` and changes only through its update operations.
/// Values are stored as entered; range checks happen at transition time
/// (see `TransitionGuard`) and when reading a persisted record back
/// (see [`AnswerRecord::validate`]).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    age: Option<i32>,
    has_pre_existing_conditions: bool,
    conditions: Vec<String>,
    is_pregnant: bool,
    pregnancy_week: Option<i32>,
    taking_medications: bool,
    medications: Vec<String>,
}

impl AnswerRecord {
    /// Creates an empty record, as at the start of the wizard.
    pub fn new() -> Self {
        Self::default()
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn age(&self) -> Option<i32> {
        self.age
    }

    pub fn has_pre_existing_conditions(&self) -> bool {
        self.has_pre_existing_conditions
    }

    /// Conditions in the order they were added.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn is_pregnant(&self) -> bool {
        self.is_pregnant
    }

    pub fn pregnancy_week(&self) -> Option<i32> {
        self.pregnancy_week
    }

    pub fn taking_medications(&self) -> bool {
        self.taking_medications
    }

    pub fn medications(&self) -> &[String] {
        &self.medications
    }

    /// Trimester of the selected week, only while the pregnancy answer is yes.
    pub fn trimester(&self) -> Option<Trimester> {
        if !self.is_pregnant {
            return None;
        }
        self.pregnancy_week.and_then(Trimester::from_week)
    }

    /// Conditions that downstream consumers should act on.
    ///
    /// Entries are only meaningful when the user said yes to having conditions.
    pub fn active_conditions(&self) -> &[String] {
        if self.has_pre_existing_conditions {
            &self.conditions
        } else {
            &[]
        }
    }

    /// Medications that downstream consumers should act on.
    pub fn active_medications(&self) -> &[String] {
        if self.taking_medications {
            &self.medications
        } else {
            &[]
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Mutators (controller only)
    // ───────────────────────────────────────────────────────────────

    pub(crate) fn set_age(&mut self, age: Option<i32>) {
        self.age = age;
    }

    pub(crate) fn set_has_pre_existing_conditions(&mut self, value: bool) {
        self.has_pre_existing_conditions = value;
    }

    /// Adds a condition; returns false for blank input or an exact duplicate.
    pub(crate) fn add_condition(&mut self, raw: &str) -> bool {
        push_unique(&mut self.conditions, normalize_condition(raw))
    }

    /// Removes a condition; returns false if it was not present.
    pub(crate) fn remove_condition(&mut self, raw: &str) -> bool {
        remove_entry(&mut self.conditions, normalize_condition(raw))
    }

    /// Adds the condition if absent, removes it if present.
    pub(crate) fn toggle_condition(&mut self, raw: &str) -> bool {
        self.remove_condition(raw) || self.add_condition(raw)
    }

    /// Replaces the condition list, dropping blanks and repeated entries.
    pub(crate) fn set_conditions<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.conditions.clear();
        for entry in entries {
            self.add_condition(entry.as_ref());
        }
    }

    pub(crate) fn set_is_pregnant(&mut self, value: bool) {
        self.is_pregnant = value;
    }

    pub(crate) fn set_pregnancy_week(&mut self, week: Option<i32>) {
        self.pregnancy_week = week;
    }

    /// Picks a trimester, pre-selecting its default week.
    pub(crate) fn select_trimester(&mut self, trimester: Trimester) {
        self.pregnancy_week = Some(trimester.default_week());
    }

    pub(crate) fn set_taking_medications(&mut self, value: bool) {
        self.taking_medications = value;
    }

    pub(crate) fn add_medication(&mut self, raw: &str) -> bool {
        push_unique(&mut self.medications, normalize_medication(raw))
    }

    pub(crate) fn remove_medication(&mut self, raw: &str) -> bool {
        remove_entry(&mut self.medications, normalize_medication(raw))
    }

    pub(crate) fn set_medications<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.medications.clear();
        for entry in entries {
            self.add_medication(entry.as_ref());
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Finalisation and schema checks
    // ───────────────────────────────────────────────────────────────

    /// Produces the copy handed to persistence.
    ///
    /// A week left over from toggling pregnancy back to "no" is dropped, so the
    /// stored record only carries a week when the user is pregnant.
    pub fn freeze(&self) -> AnswerRecord {
        let mut frozen = self.clone();
        if !frozen.is_pregnant {
            frozen.pregnancy_week = None;
        }
        frozen
    }

    /// Checks the invariants a persisted record must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(age) = self.age {
            if !is_valid_age(age) {
                return Err(ValidationError::out_of_range("age", MIN_AGE, MAX_AGE, age));
            }
        }

        if let Some(week) = self.pregnancy_week {
            if !self.is_pregnant {
                return Err(ValidationError::invalid_format(
                    "pregnancyWeek",
                    "week is set but isPregnant is false",
                ));
            }
            if !is_valid_week(week) {
                return Err(ValidationError::out_of_range(
                    "pregnancyWeek",
                    MIN_WEEK,
                    MAX_WEEK,
                    week,
                ));
            }
        }

        validate_entries("conditions", &self.conditions)?;
        validate_entries("medications", &self.medications)?;
        Ok(())
    }
}

fn push_unique(list: &mut Vec<String>, entry: Option<String>) -> bool {
    match entry {
        Some(entry) if !list.contains(&entry) => {
            list.push(entry);
            true
        }
        _ => false,
    }
}

fn remove_entry(list: &mut Vec<String>, entry: Option<String>) -> bool {
    let Some(entry) = entry else {
        return false;
    };
    match list.iter().position(|e| *e == entry) {
        Some(idx) => {
            list.remove(idx);
            true
        }
        None => false,
    }
}

fn validate_entries(field: &str, entries: &[String]) -> Result<(), ValidationError> {
    for (idx, entry) in entries.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if entries[..idx].contains(entry) {
            return Err(ValidationError::invalid_format(
                field,
                format!("duplicate entry '{}'", entry),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pregnant_record() -> AnswerRecord {
        let mut record = AnswerRecord::new();
        record.set_age(Some(29));
        record.set_is_pregnant(true);
        record.set_pregnancy_week(Some(20));
        record
    }

    #[test]
    fn new_record_is_empty() {
        let record = AnswerRecord::new();
        assert_eq!(record.age(), None);
        assert!(!record.has_pre_existing_conditions());
        assert!(record.conditions().is_empty());
        assert!(!record.is_pregnant());
        assert_eq!(record.pregnancy_week(), None);
        assert!(!record.taking_medications());
        assert!(record.medications().is_empty());
    }

    #[test]
    fn adding_existing_condition_is_a_no_op() {
        let mut record = AnswerRecord::new();
        assert!(record.add_condition("Asthma"));
        assert!(!record.add_condition("Asthma"));
        assert!(!record.add_condition("  Asthma  "));
        assert_eq!(record.conditions(), &["Asthma".to_string()]);
    }

    #[test]
    fn condition_matching_is_case_sensitive() {
        let mut record = AnswerRecord::new();
        record.add_condition("Asthma");
        assert!(record.add_condition("asthma"));
        assert_eq!(record.conditions().len(), 2);
    }

    #[test]
    fn removing_missing_entries_is_a_no_op() {
        let mut record = AnswerRecord::new();
        record.add_medication("Iron");
        assert!(!record.remove_medication("Folic acid"));
        assert!(!record.remove_condition("Asthma"));
        assert_eq!(record.medications(), &["Iron".to_string()]);
    }

    #[test]
    fn blank_entries_are_ignored() {
        let mut record = AnswerRecord::new();
        assert!(!record.add_medication("   "));
        assert!(!record.add_condition(""));
        assert!(record.medications().is_empty());
        assert!(record.conditions().is_empty());
    }

    #[test]
    fn toggle_condition_adds_then_removes() {
        let mut record = AnswerRecord::new();
        assert!(record.toggle_condition("Diabetes"));
        assert_eq!(record.conditions(), &["Diabetes".to_string()]);
        assert!(record.toggle_condition("Diabetes"));
        assert!(record.conditions().is_empty());
    }

    #[test]
    fn set_conditions_preserves_insertion_order_and_collapses_duplicates() {
        let mut record = AnswerRecord::new();
        record.set_conditions(["Hypertension", "Asthma", "Hypertension", " "]);
        assert_eq!(
            record.conditions(),
            &["Hypertension".to_string(), "Asthma".to_string()]
        );
    }

    #[test]
    fn select_trimester_sets_default_week() {
        let mut record = AnswerRecord::new();
        record.set_is_pregnant(true);
        record.select_trimester(Trimester::Third);
        assert_eq!(record.pregnancy_week(), Some(34));
        assert_eq!(record.trimester(), Some(Trimester::Third));
    }

    #[test]
    fn trimester_is_none_when_not_pregnant() {
        let mut record = pregnant_record();
        record.set_is_pregnant(false);
        assert_eq!(record.trimester(), None);
    }

    #[test]
    fn active_lists_follow_their_flags() {
        let mut record = AnswerRecord::new();
        record.add_condition("Asthma");
        record.add_medication("Iron");
        assert!(record.active_conditions().is_empty());
        assert!(record.active_medications().is_empty());

        record.set_has_pre_existing_conditions(true);
        record.set_taking_medications(true);
        assert_eq!(record.active_conditions().len(), 1);
        assert_eq!(record.active_medications().len(), 1);
    }

    #[test]
    fn freeze_drops_stale_week() {
        let mut record = pregnant_record();
        record.set_is_pregnant(false);
        let frozen = record.freeze();
        assert_eq!(frozen.pregnancy_week(), None);
        assert_eq!(record.pregnancy_week(), Some(20));
    }

    #[test]
    fn freeze_keeps_week_when_pregnant() {
        assert_eq!(pregnant_record().freeze(), pregnant_record());
    }

    #[test]
    fn validate_accepts_complete_record() {
        let mut record = pregnant_record();
        record.set_has_pre_existing_conditions(true);
        record.add_condition("Asthma");
        assert!(record.validate().is_ok());
        assert!(AnswerRecord::new().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let mut record = pregnant_record();
        record.set_age(Some(101));
        assert!(matches!(
            record.validate(),
            Err(ValidationError::OutOfRange { .. })
        ));

        let mut record = pregnant_record();
        record.set_pregnancy_week(Some(43));
        assert!(record.validate().is_err());
    }

    #[test]
    fn validate_rejects_week_without_pregnancy() {
        let mut record = pregnant_record();
        record.set_is_pregnant(false);
        assert!(matches!(
            record.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let mut record = pregnant_record();
        record.set_has_pre_existing_conditions(true);
        record.add_condition("Asthma");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "age": 29,
                "hasPreExistingConditions": true,
                "conditions": ["Asthma"],
                "isPregnant": true,
                "pregnancyWeek": 20,
                "takingMedications": false,
                "medications": []
            })
        );
    }

    #[test]
    fn unset_optionals_serialize_as_null() {
        let value = serde_json::to_value(AnswerRecord::new()).unwrap();
        assert!(value["age"].is_null());
        assert!(value["pregnancyWeek"].is_null());
    }

    #[test]
    fn deserialize_rejects_wrong_types() {
        let raw = json!({
            "age": "twenty",
            "hasPreExistingConditions": false,
            "conditions": [],
            "isPregnant": false,
            "pregnancyWeek": null,
            "takingMedications": false,
            "medications": []
        });
        assert!(serde_json::from_value::<AnswerRecord>(raw).is_err());
    }
}
