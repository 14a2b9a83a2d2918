//! Edge case tests for anonymization
//!
//! Malformed values, missing cells, unknown methods and detections that point
//! at columns the dataset does not have.

use privacy_checker::anonymization::anonymizer::{
    fake_email, fake_phone, hash_value, mask_email, mask_phone, mask_value,
};
use privacy_checker::anonymization::config::{AnonymizationConfig, AnonymizationMethod, MethodConfig};
use privacy_checker::anonymization::engine::AnonymizationEngine;
use privacy_checker::anonymization::store::MemoryStore;
use privacy_checker::domain::{Column, Dataset, Detection};
use std::sync::Arc;
use test_case::test_case;

fn engine() -> AnonymizationEngine {
    AnonymizationEngine::with_store(AnonymizationConfig::default(), Arc::new(MemoryStore::new()))
        .unwrap()
}

#[test]
fn test_missing_values_are_not_counted() {
    let dataset = Dataset::new(vec![Column::new(
        "email",
        vec![Some("a@b.com".to_string()), None, None],
    )])
    .unwrap();
    let detections = vec![Detection::new("email", "email", 1)];

    let (anonymized, report) = engine()
        .anonymize(&dataset, &detections, &MethodConfig::new(), false)
        .unwrap();

    let values = &anonymized.column("email").unwrap().values;
    assert_eq!(values[1], None);
    assert_eq!(values[2], None);
    assert_eq!(report.total_pii_values, 1);
    assert!(report.verification_passed);
}

#[test]
fn test_malformed_email_fails_verification() {
    let dataset =
        Dataset::new(vec![Column::from_text("email", ["good@x.org", "not-an-email"])]).unwrap();
    let detections = vec![Detection::new("email", "email", 2)];

    let (anonymized, report) = engine()
        .anonymize(&dataset, &detections, &MethodConfig::new(), false)
        .unwrap();

    assert_eq!(
        anonymized.column("email").unwrap().values[1].as_deref(),
        Some("not-an-email")
    );
    assert_eq!(report.total_pii_values, 2);
    assert_eq!(report.anonymized_count, 1);
    assert_eq!(report.anonymization_rate, 50.0);
    assert!(!report.verification_passed);
}

#[test]
fn test_absent_detection_column_is_skipped() {
    let dataset = Dataset::new(vec![Column::from_text("email", ["a@b.com"])]).unwrap();
    let detections = vec![
        Detection::new("ghost", "name", 4),
        Detection::new("email", "email", 1),
    ];

    let (anonymized, report) = engine()
        .anonymize(&dataset, &detections, &MethodConfig::new(), false)
        .unwrap();

    assert!(anonymized.column("ghost").is_none());
    assert_eq!(report.skipped_columns, vec!["ghost"]);
    assert_eq!(report.columns.len(), 1);
    assert!(report.verification_passed);
}

#[test]
fn test_unknown_method_redacts() {
    let dataset = Dataset::new(vec![Column::from_text("phone", ["0911234567"])]).unwrap();
    let detections = vec![Detection::new("phone", "phone", 1)];
    let methods = MethodConfig::new().with_method("phone", "scramble");

    let (anonymized, report) = engine()
        .anonymize(&dataset, &detections, &methods, false)
        .unwrap();

    assert_eq!(
        anonymized.column("phone").unwrap().values[0].as_deref(),
        Some("REDACTED")
    );
    assert_eq!(report.columns[0].method, AnonymizationMethod::Redact);
    assert_eq!(report.columns[0].unknown_method.as_deref(), Some("scramble"));
    assert!(report.format_console().contains("Unknown method 'scramble'"));
}

#[test]
fn test_method_names_are_case_sensitive() {
    let dataset = Dataset::new(vec![Column::from_text("ssn", ["123-45-6789"])]).unwrap();
    let detections = vec![Detection::new("ssn", "national_id", 1)];
    let methods = MethodConfig::new().with_method("national_id", "HASH");

    let (anonymized, report) = engine()
        .anonymize(&dataset, &detections, &methods, false)
        .unwrap();

    assert_eq!(
        anonymized.column("ssn").unwrap().values[0].as_deref(),
        Some("REDACTED")
    );
    assert_eq!(report.columns[0].unknown_method.as_deref(), Some("HASH"));
}

#[test]
fn test_value_equal_to_token_is_reported_unchanged() {
    let dataset = Dataset::new(vec![Column::from_text("notes", ["REDACTED", "secret"])]).unwrap();
    let detections = vec![Detection::new("notes", "name", 2)];

    let (_, report) = engine()
        .anonymize(&dataset, &detections, &MethodConfig::new(), false)
        .unwrap();

    assert_eq!(report.anonymized_count, 1);
    assert!(!report.verification_passed);
    assert_eq!(report.incomplete_columns().len(), 1);
}

#[test]
fn test_custom_label_uses_generic_strategies() {
    let dataset = Dataset::new(vec![Column::from_text("card", ["4111111111111111"])]).unwrap();
    let detections = vec![Detection::new("card", "Credit Card", 1)];
    let methods = MethodConfig::new().with_method("Credit Card", "mask");

    let (anonymized, _) = engine()
        .anonymize(&dataset, &detections, &methods, false)
        .unwrap();

    assert_eq!(
        anonymized.column("card").unwrap().values[0].as_deref(),
        Some("****************")
    );
}

#[test_case("" ; "empty")]
#[test_case("x" ; "single char")]
#[test_case("Ünïcödé näme" ; "unicode")]
fn test_mask_is_idempotent(value: &str) {
    let once = mask_value(value, 0);
    assert_eq!(mask_value(&once, 0), once);
    assert_eq!(once.chars().count(), value.chars().count());
}

#[test_case("name@host@x.org" ; "separated at signs")]
#[test_case("a@@b.com" ; "double at")]
#[test_case("no at sign" ; "no at")]
fn test_mask_email_wrong_shape(value: &str) {
    assert_eq!(mask_email(value, true, 1), value);
}

#[test]
fn test_mask_email_empty_local_part() {
    assert_eq!(mask_email("@b.com", true, 1), "*@b.com");
}

#[test]
fn test_mask_phone_without_digits() {
    assert_eq!(mask_phone("+ - ( )", 3), "+ - ( )");
}

#[test]
fn test_hash_length_is_clamped() {
    assert_eq!(hash_value("abc", 500).len(), 64);
    assert_eq!(hash_value("abc", 0), "");
}

#[test]
fn test_fake_values_never_equal_input() {
    for value in ["a@b.com", "user1@example.com", "+251911234567"] {
        assert_ne!(fake_email(value, "salt", "example.com"), value);
        assert_ne!(fake_phone(value, "salt", "+251"), value);
    }
}
