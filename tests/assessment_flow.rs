//! Integration tests for the assessment wizard.
//!
//! Drives the controller through the public API the way a UI host does:
//! 1. Answers arrive through `update_field` (wire names, JSON values)
//! 2. Navigation via `advance` / `retreat`
//! 3. The finished record is read back through `AssessmentReader`
//!
//! Uses the in-memory gateway so no filesystem is involved.

use proptest::prelude::*;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gentle_birth::adapters::InMemoryGateway;
use gentle_birth::application::{AssessmentController, AssessmentReader, Transition};
use gentle_birth::domain::assessment::{AnswerRecord, AGE_REQUIRED_MESSAGE, WEEK_REQUIRED_MESSAGE};
use gentle_birth::domain::foundation::{ErrorCode, StepId, Timestamp};
use gentle_birth::domain::guidance::{AssistantContext, HealthReport};
use gentle_birth::ports::{PersistenceGateway, ASSESSMENT_STORAGE_KEY};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn controller() -> (AssessmentController, InMemoryGateway) {
    let gateway = InMemoryGateway::new();
    (AssessmentController::new(Arc::new(gateway.clone())), gateway)
}

fn reader(gateway: &InMemoryGateway) -> AssessmentReader {
    AssessmentReader::new(Arc::new(gateway.clone()))
}

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn full_wizard_persists_answers_and_signals_once() {
    let (mut wizard, gateway) = controller();
    let signals = Arc::new(AtomicUsize::new(0));
    let counter = signals.clone();
    wizard.on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    wizard.update_field("age", json!(31)).unwrap();
    assert_eq!(
        wizard.advance().unwrap(),
        Transition::Moved {
            from: StepId::Age,
            to: StepId::Conditions
        }
    );

    // No conditions selected
    wizard.advance().unwrap();
    assert_eq!(wizard.current_step(), Some(StepId::Pregnancy));

    wizard.update_field("isPregnant", json!(true)).unwrap();
    let err = wizard.advance().unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.message, WEEK_REQUIRED_MESSAGE);
    assert_eq!(wizard.current_step(), Some(StepId::Pregnancy));

    wizard.update_field("pregnancyWeek", json!(14)).unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.current_step(), Some(StepId::Medications));

    wizard.update_field("takingMedications", json!(true)).unwrap();
    wizard
        .update_field("medications", json!(["Folic acid"]))
        .unwrap();
    assert_eq!(wizard.advance().unwrap(), Transition::Completed);

    assert!(wizard.completed());
    assert_eq!(wizard.current_step(), None);
    assert_eq!(signals.load(Ordering::SeqCst), 1);

    let stored = reader(&gateway).load().expect("record persisted");
    assert_eq!(&stored, wizard.record());
    assert_eq!(stored.age(), Some(31));
    assert!(!stored.has_pre_existing_conditions());
    assert!(stored.is_pregnant());
    assert_eq!(stored.pregnancy_week(), Some(14));
    assert!(stored.taking_medications());
    assert_eq!(stored.medications(), ["Folic acid"]);

    // Operations after completion are rejected and do not fire the signal again
    assert_eq!(
        wizard.advance().unwrap_err().code,
        ErrorCode::AssessmentCompleted
    );
    assert_eq!(signals.load(Ordering::SeqCst), 1);
}

#[test]
fn round_trip_record_reads_back_structurally_equal() {
    let (mut wizard, gateway) = controller();
    wizard.update_field("age", json!(29)).unwrap();
    wizard.advance().unwrap();
    wizard
        .update_field("hasPreExistingConditions", json!(true))
        .unwrap();
    wizard.update_field("conditions", json!(["Asthma"])).unwrap();
    wizard.advance().unwrap();
    wizard.update_field("isPregnant", json!(true)).unwrap();
    wizard.update_field("pregnancyWeek", json!(20)).unwrap();
    wizard.advance().unwrap();
    wizard
        .update_field("takingMedications", json!(false))
        .unwrap();
    wizard.advance().unwrap();

    let expected: AnswerRecord = serde_json::from_value(json!({
        "age": 29,
        "isPregnant": true,
        "pregnancyWeek": 20,
        "hasPreExistingConditions": true,
        "conditions": ["Asthma"],
        "takingMedications": false,
        "medications": []
    }))
    .unwrap();

    assert_eq!(reader(&gateway).load(), Some(expected));
}

#[test]
fn persisted_json_uses_wire_field_names() {
    let (mut wizard, gateway) = controller();
    wizard.update_field("age", json!(45)).unwrap();
    for _ in 0..4 {
        wizard.advance().unwrap();
    }

    let raw = gateway.read(ASSESSMENT_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "age",
            "conditions",
            "hasPreExistingConditions",
            "isPregnant",
            "medications",
            "pregnancyWeek",
            "takingMedications"
        ]
    );
    assert_eq!(value["pregnancyWeek"], serde_json::Value::Null);
}

// =============================================================================
// Guards and edge cases
// =============================================================================

#[test]
fn invalid_ages_keep_the_wizard_on_the_age_step() {
    for bad in [json!(0), json!(null), json!(101), json!(-5)] {
        let (mut wizard, _) = controller();
        wizard.update_field("age", bad.clone()).unwrap();
        let err = wizard.advance().unwrap_err();
        assert_eq!(err.message, AGE_REQUIRED_MESSAGE, "age {}", bad);
        assert_eq!(wizard.current_step(), Some(StepId::Age));
    }
}

#[test]
fn stale_week_is_ignored_after_answering_not_pregnant() {
    let (mut wizard, gateway) = controller();
    wizard.update_field("age", json!(33)).unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();

    wizard.update_field("isPregnant", json!(true)).unwrap();
    wizard.update_field("pregnancyWeek", json!(99)).unwrap();
    wizard.update_field("isPregnant", json!(false)).unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.current_step(), Some(StepId::Medications));

    wizard.advance().unwrap();
    let stored = reader(&gateway).load().unwrap();
    assert!(!stored.is_pregnant());
    assert_eq!(stored.pregnancy_week(), None);
}

#[test]
fn answers_edited_after_their_step_block_completion() {
    let (mut wizard, gateway) = controller();
    let signals = Arc::new(AtomicUsize::new(0));
    let counter = signals.clone();
    wizard.on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    wizard.update_field("age", json!(30)).unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.update_field("isPregnant", json!(true)).unwrap();
    wizard.update_field("pregnancyWeek", json!(12)).unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.current_step(), Some(StepId::Medications));

    for (field, bad, message) in [
        ("age", json!(null), AGE_REQUIRED_MESSAGE),
        ("age", json!(500), AGE_REQUIRED_MESSAGE),
        ("pregnancyWeek", json!(50), WEEK_REQUIRED_MESSAGE),
        ("pregnancyWeek", json!(null), WEEK_REQUIRED_MESSAGE),
    ] {
        let good = if field == "age" { json!(30) } else { json!(12) };
        wizard.update_field(field, bad.clone()).unwrap();

        let err = wizard.advance().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed, "{field} = {bad}");
        assert_eq!(err.message, message, "{field} = {bad}");
        assert_eq!(wizard.current_step(), Some(StepId::Medications));
        assert!(!wizard.completed());
        assert_eq!(gateway.read(ASSESSMENT_STORAGE_KEY).unwrap(), None);

        wizard.update_field(field, good).unwrap();
    }
    assert_eq!(signals.load(Ordering::SeqCst), 0);

    assert_eq!(wizard.advance().unwrap(), Transition::Completed);
    let stored = reader(&gateway).load().expect("valid record persisted");
    assert_eq!(stored.age(), Some(30));
    assert_eq!(stored.pregnancy_week(), Some(12));
    assert_eq!(signals.load(Ordering::SeqCst), 1);
}

#[test]
fn adding_a_present_condition_is_idempotent() {
    let (mut wizard, _) = controller();
    wizard.update_field("conditions", json!(["Asthma"])).unwrap();
    wizard
        .update_field("conditions", json!(["Asthma", "Asthma"]))
        .unwrap();
    assert_eq!(wizard.record().conditions(), ["Asthma"]);
}

#[test]
fn retreat_from_first_step_changes_nothing() {
    let (mut wizard, _) = controller();
    let before = wizard.progress();
    assert_eq!(wizard.retreat().unwrap(), Transition::Stayed(StepId::Age));
    assert_eq!(wizard.progress(), before);
    assert_eq!(wizard.current_step(), Some(StepId::Age));
}

#[test]
fn unknown_field_is_rejected_without_mutation() {
    let (mut wizard, _) = controller();
    let err = wizard.update_field("bloodType", json!("O+")).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownField);
    assert_eq!(wizard.record(), &AnswerRecord::new());
}

// =============================================================================
// Downstream consumers
// =============================================================================

#[test]
fn consumers_fail_soft_on_malformed_record() {
    let gateway = InMemoryGateway::new();
    gateway
        .write(ASSESSMENT_STORAGE_KEY, "{\"age\": \"thirty\"")
        .unwrap();

    let loaded = reader(&gateway).load();
    assert!(loaded.is_none());
    let context = AssistantContext::from_record(loaded.as_ref());
    assert!(!context.report_unlocked);
}

#[test]
fn finished_assessment_unlocks_report_and_personalization() {
    let (mut wizard, gateway) = controller();
    wizard.update_field("age", json!(27)).unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.update_field("isPregnant", json!(true)).unwrap();
    wizard.update_field("pregnancyWeek", json!(30)).unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();

    let record = reader(&gateway).load().unwrap();
    let context = AssistantContext::from_record(Some(&record));
    assert!(context.report_unlocked);

    let report = HealthReport::from_record(&record, Timestamp::now());
    assert_eq!(report.basic_information.age, Some(27));
    assert!(report.to_markdown().contains("- **Current Week:** 30"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn progress_moves_by_one_quarter_per_successful_step(moves in prop::collection::vec(any::<bool>(), 1..40)) {
        let (mut wizard, gateway) = controller();
        wizard.update_field("age", json!(30)).unwrap();

        for forward in moves {
            let before = wizard.progress().as_fraction();
            let transition = if forward { wizard.advance() } else { wizard.retreat() }.unwrap();
            let after = wizard.progress().as_fraction();

            match transition {
                Transition::Moved { .. } if forward => prop_assert!((after - before - 0.25).abs() < 1e-9),
                Transition::Moved { .. } => prop_assert!((before - after - 0.25).abs() < 1e-9),
                Transition::Stayed(_) => prop_assert!((after - before).abs() < 1e-9),
                Transition::Completed => {
                    prop_assert!((after - 1.0).abs() < 1e-9);
                    prop_assert!(reader(&gateway).load().is_some());
                    break;
                }
            }
        }
    }
}
