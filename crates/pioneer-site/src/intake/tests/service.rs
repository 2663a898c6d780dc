use std::sync::Arc;

use super::common::*;
use crate::intake::domain::{SubmissionRecord, ValidationError};
use crate::intake::schema::RecordKind;
use crate::intake::service::{SubmissionOutcome, SubmissionService};

#[test]
fn valid_application_is_stored_in_column_order() {
    let (_dir, service, store) = csv_service();

    let outcome = service.submit(RecordKind::Application, &application_fields());

    assert!(outcome.is_persisted());
    let contents =
        std::fs::read_to_string(store.path_for(RecordKind::Application)).expect("file");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        format!("{FIXED_TIMESTAMP},Ada,Lovelace,1990-01-01,ada@example.com,5551234,,,,,")
    );
}

#[test]
fn stored_values_are_trimmed() {
    let (service, store) = memory_service();
    let raw = fields(&[
        ("name", "  Bob  "),
        ("email", "\tbob@example.com\n"),
        ("message", "  hi there  "),
    ]);

    assert!(service.submit(RecordKind::Contact, &raw).is_persisted());

    match store.rows().as_slice() {
        [SubmissionRecord::Contact(record)] => {
            assert_eq!(record.timestamp, FIXED_TIMESTAMP);
            assert_eq!(record.name, "Bob");
            assert_eq!(record.email, "bob@example.com");
            assert_eq!(record.message, "hi there");
        }
        other => panic!("expected one contact row, found {other:?}"),
    }
}

#[test]
fn optional_application_fields_are_trimmed_and_kept() {
    let (service, store) = memory_service();
    let mut raw = application_fields();
    raw.insert("guarantor_name".to_string(), "  Charles Babbage ".to_string());
    raw.insert("consent".to_string(), " yes ".to_string());

    assert!(service.submit(RecordKind::Application, &raw).is_persisted());

    match store.rows().as_slice() {
        [SubmissionRecord::Application(record)] => {
            assert_eq!(record.guarantor_name, "Charles Babbage");
            assert_eq!(record.consent, "yes");
            assert_eq!(record.guarantor_occupation, "");
        }
        other => panic!("expected one application row, found {other:?}"),
    }
}

#[test]
fn invalid_contact_email_is_rejected_with_echoed_values() {
    let (_dir, service, store) = csv_service();
    let raw = fields(&[
        ("name", "Bob"),
        ("email", "not-an-email"),
        ("message", "hi"),
    ]);

    match service.submit(RecordKind::Contact, &raw) {
        SubmissionOutcome::Rejected { error, echoed } => {
            assert_eq!(error, ValidationError::InvalidEmailFormat { field: "email" });
            assert_eq!(echoed.get("name"), "Bob");
            assert_eq!(echoed.get("message"), "hi");
            assert_eq!(echoed.get("email"), "not-an-email");
        }
        other => panic!("expected rejection, found {other:?}"),
    }
    assert!(data_rows(&store, RecordKind::Contact).is_empty());
}

#[test]
fn application_without_phone_is_rejected() {
    let (_dir, service, store) = csv_service();
    let mut raw = application_fields();
    raw.remove("phone");

    let outcome = service.submit(RecordKind::Application, &raw);

    assert!(matches!(
        outcome,
        SubmissionOutcome::Rejected {
            error: ValidationError::MissingRequiredField { ref fields },
            ..
        } if fields == &vec!["phone"]
    ));
    assert!(data_rows(&store, RecordKind::Application).is_empty());
}

#[test]
fn rejected_submission_can_be_retried_after_correction() {
    let (service, store) = memory_service();
    let mut raw = contact_fields();
    raw.insert("message".to_string(), "   ".to_string());

    assert!(!service.submit(RecordKind::Contact, &raw).is_persisted());
    assert!(store.rows().is_empty());

    raw.insert("message".to_string(), "second try".to_string());
    assert!(service.submit(RecordKind::Contact, &raw).is_persisted());
    assert_eq!(store.rows().len(), 1);
}

#[test]
fn storage_failures_are_distinct_from_rejections() {
    let service = SubmissionService::with_clock(Arc::new(UnavailableStore), Arc::new(FixedClock));

    let outcome = service.submit(RecordKind::Contact, &contact_fields());

    match outcome {
        SubmissionOutcome::StorageFailed(err) => {
            assert!(err.to_string().contains("read-only volume"));
        }
        other => panic!("expected storage failure, found {other:?}"),
    }
}

#[test]
fn local_clock_timestamps_use_sortable_format() {
    let (_dir, store) = temp_store();
    let service = SubmissionService::new(store.clone());

    assert!(service.submit(RecordKind::Contact, &contact_fields()).is_persisted());

    let rows = data_rows(&store, RecordKind::Contact);
    let timestamp = &rows[0][0];
    assert!(
        chrono::NaiveDateTime::parse_from_str(timestamp, crate::intake::TIMESTAMP_FORMAT).is_ok(),
        "unexpected timestamp {timestamp}"
    );
}
