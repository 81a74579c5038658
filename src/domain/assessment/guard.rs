//! TransitionGuard - decides whether the wizard may move right now.
//!
//! Guards are pure functions of the step and the record. A rejected advance
//! carries the message the host should show next to the offending step.

use crate::domain::foundation::{DomainError, StepId};

use super::record::AnswerRecord;
use super::sequence::StepSequencer;
use super::validators::{is_valid_age, is_valid_week};

pub const AGE_REQUIRED_MESSAGE: &str = "Please enter your age to continue";
pub const WEEK_REQUIRED_MESSAGE: &str = "Please select your pregnancy week to continue";

pub struct TransitionGuard;

impl TransitionGuard {
    /// Returns true if the user may leave `step` going forward.
    pub fn can_advance(step: StepId, record: &AnswerRecord) -> bool {
        Self::check_advance(step, record).is_ok()
    }

    /// Like [`can_advance`](Self::can_advance), but explains a rejection.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationFailed` error whose message is user-facing and
    /// whose `step` detail names the blocked step.
    pub fn check_advance(step: StepId, record: &AnswerRecord) -> Result<(), DomainError> {
        match step {
            StepId::Age => match record.age() {
                Some(age) if is_valid_age(age) => Ok(()),
                _ => Err(rejection(step, "age", AGE_REQUIRED_MESSAGE)),
            },
            StepId::Conditions => Ok(()),
            StepId::Pregnancy => {
                // A week left over from an earlier "yes" is ignored once the
                // answer is "no".
                if !record.is_pregnant() {
                    return Ok(());
                }
                match record.pregnancy_week() {
                    Some(week) if is_valid_week(week) => Ok(()),
                    _ => Err(rejection(step, "pregnancyWeek", WEEK_REQUIRED_MESSAGE)),
                }
            }
            StepId::Medications => Ok(()),
        }
    }

    /// Returns true unless `step` is the first step.
    pub fn can_retreat(step: StepId) -> bool {
        !StepSequencer::is_first(step)
    }
}

fn rejection(step: StepId, field: &str, message: &str) -> DomainError {
    DomainError::validation(field, message).with_detail("step", step.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use proptest::prelude::*;

    fn with_age(age: Option<i32>) -> AnswerRecord {
        let mut record = AnswerRecord::new();
        record.set_age(age);
        record
    }

    #[test]
    fn age_step_requires_valid_age() {
        for bad in [None, Some(0), Some(101), Some(-5), Some(11)] {
            assert!(
                !TransitionGuard::can_advance(StepId::Age, &with_age(bad)),
                "age {:?} should block",
                bad
            );
        }
        assert!(TransitionGuard::can_advance(StepId::Age, &with_age(Some(12))));
        assert!(TransitionGuard::can_advance(StepId::Age, &with_age(Some(100))));
    }

    #[test]
    fn age_rejection_carries_user_message() {
        let err = TransitionGuard::check_advance(StepId::Age, &with_age(None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, AGE_REQUIRED_MESSAGE);
        assert_eq!(err.details.get("step"), Some(&"age".to_string()));
    }

    #[test]
    fn conditions_and_medications_always_advance() {
        let record = AnswerRecord::new();
        assert!(TransitionGuard::can_advance(StepId::Conditions, &record));
        assert!(TransitionGuard::can_advance(StepId::Medications, &record));
    }

    #[test]
    fn pregnant_requires_week() {
        let mut record = AnswerRecord::new();
        record.set_is_pregnant(true);
        let err = TransitionGuard::check_advance(StepId::Pregnancy, &record).unwrap_err();
        assert_eq!(err.message, WEEK_REQUIRED_MESSAGE);
        assert_eq!(err.details.get("step"), Some(&"pregnancy".to_string()));

        record.set_pregnancy_week(Some(43));
        assert!(!TransitionGuard::can_advance(StepId::Pregnancy, &record));

        record.set_pregnancy_week(Some(14));
        assert!(TransitionGuard::can_advance(StepId::Pregnancy, &record));
    }

    #[test]
    fn not_pregnant_ignores_stale_week() {
        let mut record = AnswerRecord::new();
        record.set_is_pregnant(false);
        record.set_pregnancy_week(Some(99));
        assert!(TransitionGuard::can_advance(StepId::Pregnancy, &record));
    }

    #[test]
    fn retreat_blocked_only_on_first_step() {
        assert!(!TransitionGuard::can_retreat(StepId::Age));
        assert!(TransitionGuard::can_retreat(StepId::Conditions));
        assert!(TransitionGuard::can_retreat(StepId::Pregnancy));
        assert!(TransitionGuard::can_retreat(StepId::Medications));
    }

    proptest! {
        #[test]
        fn guard_is_deterministic(age in proptest::option::of(-50i32..150)) {
            let record = with_age(age);
            let first = TransitionGuard::can_advance(StepId::Age, &record);
            let second = TransitionGuard::can_advance(StepId::Age, &record);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first, age.map_or(false, |a| (12..=100).contains(&a)));
        }
    }
}
