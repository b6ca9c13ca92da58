//! Integration tests for the score-then-register flow.
//!
//! These tests verify the end-to-end path over the in-memory adapter:
//! 1. Questionnaire input becomes a scored assessment
//! 2. Registration allocates a sequential id and persists the record
//! 3. The persisted document decodes back into the original record
//!
//! They also pin down the id-allocation semantics: the legacy
//! count-derived strategy demonstrably collides under a shared pre-count,
//! while the atomic counter keeps concurrent registrations distinct.

use std::sync::Arc;

use cardioscore::adapters::InMemoryRecordStore;
use cardioscore::application::{
    RegisterAssessmentCommand, RegisterAssessmentHandler, ScoreAssessmentCommand,
    ScoreAssessmentHandler,
};
use cardioscore::domain::assessment::{
    Assessment, AssessmentStatus, CoefficientSet, DocumentValue, RiskAssessmentInput, RiskRecord,
};
use cardioscore::domain::foundation::{RecordId, Timestamp};
use cardioscore::ports::{IdAllocation, RecordStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

fn questionnaire_input() -> RiskAssessmentInput {
    RiskAssessmentInput::new(30, 70.0, 170.0, 120.0, false, false, 90.0).unwrap()
}

fn scored_assessment() -> Assessment {
    let handler = ScoreAssessmentHandler::new(CoefficientSet::RECALIBRATED);
    let result = handler
        .handle(ScoreAssessmentCommand {
            assessment: Assessment::new(questionnaire_input()),
        })
        .unwrap();
    result.assessment
}

fn fixed_timestamp() -> Timestamp {
    let dt = chrono::DateTime::parse_from_rfc3339("2024-11-05T09:30:07Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    Timestamp::from_datetime(dt)
}

#[tokio::test]
async fn full_flow_scores_registers_and_roundtrips_the_record() {
    init_tracing();

    let store = Arc::new(InMemoryRecordStore::new());
    let register = RegisterAssessmentHandler::new(store.clone(), IdAllocation::AtomicCounter);

    let assessment = scored_assessment();
    let probability = assessment.probability().unwrap();
    assert!((probability.as_percent() - 6.69).abs() < 0.01);

    let result = register
        .handle(RegisterAssessmentCommand {
            assessment,
            recorded_at: fixed_timestamp(),
        })
        .await
        .unwrap();

    assert_eq!(result.record_id, RecordId::from_sequence(1));
    assert_eq!(result.assessment.status(), AssessmentStatus::Registered);

    let document = store.fetch(&result.record_id).await.unwrap().unwrap();
    assert_eq!(document.get("date"), Some(&DocumentValue::String("2024-11-05".into())));
    assert_eq!(document.get("time"), Some(&DocumentValue::String("09:30:07".into())));
    assert_eq!(document.get("is_smoker"), Some(&DocumentValue::String("No".into())));

    let record = RiskRecord::from_document(&document).unwrap();
    assert_eq!(record.probability(), probability);
    assert_eq!(record.input(), &questionnaire_input());
    assert_eq!(record.recorded_at(), fixed_timestamp());
}

#[tokio::test]
async fn abandoning_before_confirmation_persists_nothing() {
    init_tracing();

    let store = Arc::new(InMemoryRecordStore::new());

    // Scoring alone must not touch the store; registration only happens on
    // the explicit confirm action, which this test never takes.
    let _scored = scored_assessment();

    assert_eq!(store.document_count().await, 0);
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn count_derived_ids_collide_when_reading_the_same_pre_count() {
    init_tracing();

    let store = Arc::new(InMemoryRecordStore::new());

    // Two confirmations read the collection size before either persists:
    // both derive count + 1 and the later write lands on the same id.
    let first_count = store.count().await.unwrap();
    let second_count = store.count().await.unwrap();

    let first_id = RecordId::from_sequence(first_count + 1);
    let second_id = RecordId::from_sequence(second_count + 1);
    assert_eq!(first_id, second_id, "shared pre-count must derive the same id");

    let first_doc = scored_assessment().to_record(fixed_timestamp()).unwrap().to_document();

    // A different respondent, so the overwrite is observable.
    let smoker_input = RiskAssessmentInput::new(45, 82.0, 175.0, 135.0, true, false, 98.0).unwrap();
    let mut second_assessment = Assessment::new(smoker_input);
    second_assessment
        .score_with(&cardioscore::domain::assessment::RiskScorer::new(
            CoefficientSet::RECALIBRATED,
        ))
        .unwrap();
    let second_doc = second_assessment.to_record(fixed_timestamp()).unwrap().to_document();
    assert_ne!(first_doc, second_doc);

    store.persist(&first_id, &first_doc).await.unwrap();
    store.persist(&second_id, &second_doc).await.unwrap();

    // Last write wins silently: one document, no error raised.
    assert_eq!(store.document_count().await, 1);
    let survivor = store.fetch(&first_id).await.unwrap().unwrap();
    assert_eq!(survivor, second_doc);
}

#[tokio::test]
async fn atomic_counter_keeps_concurrent_registrations_distinct() {
    init_tracing();

    let store = Arc::new(InMemoryRecordStore::new());
    let handler = Arc::new(RegisterAssessmentHandler::new(
        store.clone(),
        IdAllocation::AtomicCounter,
    ));

    let mut handles = Vec::new();
    for _ in 0..25 {
        let handler = handler.clone();
        handles.push(tokio::spawn(async move {
            handler
                .handle(RegisterAssessmentCommand {
                    assessment: scored_assessment(),
                    recorded_at: Timestamp::now(),
                })
                .await
                .unwrap()
                .record_id
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for handle in handles {
        let id = handle.await.unwrap();
        assert!(ids.insert(id), "concurrent registrations must never share an id");
    }

    assert_eq!(ids.len(), 25);
    assert_eq!(store.document_count().await, 25);
}

#[tokio::test]
async fn sequential_registrations_count_up_from_cx00001() {
    init_tracing();

    let store = Arc::new(InMemoryRecordStore::new());
    let handler = RegisterAssessmentHandler::new(store.clone(), IdAllocation::CountDerived);

    let first = handler
        .handle(RegisterAssessmentCommand {
            assessment: scored_assessment(),
            recorded_at: Timestamp::now(),
        })
        .await
        .unwrap();
    let second = handler
        .handle(RegisterAssessmentCommand {
            assessment: scored_assessment(),
            recorded_at: Timestamp::now(),
        })
        .await
        .unwrap();

    assert_eq!(first.record_id.to_string(), "CX00001");
    assert_eq!(second.record_id.to_string(), "CX00002");
}

#[tokio::test]
async fn persist_overwrites_are_silent_and_total() {
    init_tracing();

    let store = InMemoryRecordStore::new();
    let id = RecordId::from_sequence(1);

    let original = scored_assessment().to_record(fixed_timestamp()).unwrap().to_document();
    store.persist(&id, &original).await.unwrap();

    let mut replacement = original.clone();
    replacement.insert("probability".into(), DocumentValue::Double(0.5));
    store.persist(&id, &replacement).await.unwrap();

    // No error on the second write, and the read returns the replacement
    // whole: either the prior value or the new one, never a blend.
    let fetched = store.fetch(&id).await.unwrap().unwrap();
    assert_eq!(fetched, replacement);
    assert_eq!(store.count().await.unwrap(), 1);
}
