use idrecon::models::{DeclaredFields, FieldName, OverallStatus, ReconcileConfig, Severity};
use idrecon::processing::{OcrEngine, OcrProgress, TextFileOcr};
use idrecon::validation::{DateMatcher, DocumentClassifier, IdNumberMatcher, NameMatcher, PhoneMatcher};
use idrecon::{ReconcileError, Reconciler};
use std::cell::Cell;
use std::io::Write;
use std::path::Path;

const FRONT_OF_CARD: &str = "\
भारत सरकार
GOVERNMENT OF INDIA
ASHA VERMA
जन्म तिथि/DOB: 14/07/1995
महिला/ FEMALE
1234 5678 9012
आधार - आम आदमी का अधिकार";

fn asha() -> DeclaredFields {
    DeclaredFields {
        name: "  Asha Verma ".to_string(),
        id_number: "123456789012".to_string(),
        date_of_birth: "1995-07-14".to_string(),
        phone: "9876543210".to_string(),
    }
}

#[test]
fn name_found_verbatim() {
    let result = NameMatcher::check("Asha Verma", FRONT_OF_CARD, &ReconcileConfig::default());
    assert!(result.found);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn grouped_id_number_found_exactly() {
    let result = IdNumberMatcher::check("123456789012", FRONT_OF_CARD, &ReconcileConfig::default());
    assert!(result.found);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.extracted.as_deref(), Some("1234 5678 9012"));
}

#[test]
fn hyphenated_phone_found_exactly() {
    let result = PhoneMatcher::check("9876543210", "Mobile No: 98765-43210", &ReconcileConfig::default());
    assert!(result.found);
    assert_eq!(result.confidence, 1.0);
}

#[test]
fn month_name_date_is_a_full_match() {
    let result = DateMatcher::check("1995-07-14", "DOB 14 Jul 1995", &ReconcileConfig::default());
    assert!(result.found);
    assert!(result.confidence >= 0.86);
}

#[test]
fn unrelated_document_short_circuits() {
    let text = "Electricity bill\nConsumer: Asha Verma\nAmount due 1,250.00";
    let classification = DocumentClassifier::classify(text, &ReconcileConfig::default());
    assert!(!classification.is_expected_type);

    let verdict = Reconciler::new().reconcile(&asha(), text);
    assert_eq!(verdict.overall_status, OverallStatus::Invalid);
    assert_eq!(verdict.per_field.len(), 1);
    assert!(verdict.per_field.contains_key(&FieldName::DocumentType));
    assert!(!verdict.may_proceed());
}

#[test]
fn critical_fields_match_advisory_missing_is_warning() {
    let text = "GOVERNMENT OF INDIA\nASHA VERMA\nFEMALE\n1234 5678 9012\nAadhaar";
    let verdict = Reconciler::new().reconcile(&asha(), text);

    assert_eq!(verdict.overall_status, OverallStatus::Warning);
    assert!(verdict.may_proceed());

    let keys: Vec<FieldName> = verdict.per_field.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            FieldName::Name,
            FieldName::IdNumber,
            FieldName::DateOfBirth,
            FieldName::Phone
        ]
    );
    assert_eq!(verdict.per_field[&FieldName::Name].severity, Severity::Success);
    assert_eq!(verdict.per_field[&FieldName::IdNumber].severity, Severity::Success);
    assert_eq!(verdict.per_field[&FieldName::DateOfBirth].severity, Severity::Warning);
    assert_eq!(verdict.per_field[&FieldName::Phone].severity, Severity::Warning);
}

#[test]
fn near_miss_id_number_is_a_warning_not_valid() {
    let text = format!(
        "{}\nMobile: 98765 43210",
        FRONT_OF_CARD.replace("1234 5678 9012", "1234 5678 9013")
    );
    let verdict = Reconciler::new().reconcile(&asha(), &text);

    let id = &verdict.per_field[&FieldName::IdNumber];
    assert!(id.found);
    assert!(id.confidence < 1.0);
    assert_eq!(id.severity, Severity::Success);
    assert_eq!(verdict.per_field[&FieldName::Name].confidence, 1.0);
    assert_eq!(verdict.per_field[&FieldName::DateOfBirth].confidence, 1.0);
    assert_eq!(verdict.per_field[&FieldName::Phone].confidence, 1.0);

    assert_eq!(verdict.overall_status, OverallStatus::Warning);
    assert!(verdict.may_proceed());
}

#[test]
fn name_mismatch_blocks_submission() {
    let mut declared = asha();
    declared.name = "Priya Nair".to_string();
    let verdict = Reconciler::new().reconcile(&declared, FRONT_OF_CARD);
    assert_eq!(verdict.overall_status, OverallStatus::Invalid);
    assert_eq!(verdict.per_field[&FieldName::Name].severity, Severity::Error);
}

#[test]
fn retry_produces_an_independent_verdict() {
    let reconciler = Reconciler::new();
    let blurry = "GOVERNMENT OF INDIA\nA5HA VERMA\n1234 5678 9O12";
    let first = reconciler.reconcile(&asha(), blurry);
    let second = reconciler.reconcile(&asha(), FRONT_OF_CARD);

    assert_eq!(first.raw_ocr_text, blurry);
    assert_eq!(second.raw_ocr_text, FRONT_OF_CARD);
    assert_eq!(second.overall_status, OverallStatus::Warning);
}

#[test]
fn verdict_serializes_to_json() {
    let verdict = Reconciler::new().reconcile(&asha(), FRONT_OF_CARD);
    let json = serde_json::to_value(&verdict).unwrap();
    assert_eq!(json["overall_status"], "warning");
    assert_eq!(json["per_field"]["idNumber"]["severity"], "success");
    assert_eq!(json["extracted_fields"]["dateOfBirth"], "1995-07-14");
}

#[test]
fn reconcile_from_sidecar_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("card.jpg");
    let mut sidecar = std::fs::File::create(dir.path().join("card.txt")).unwrap();
    write!(sidecar, "{}\nMobile: +91 98765 43210", FRONT_OF_CARD).unwrap();

    let mut progress = Vec::new();
    let verdict = Reconciler::new()
        .reconcile_image(&asha(), &TextFileOcr::new(), &image, &mut |p| {
            progress.push(p.percent())
        })
        .unwrap();

    assert_eq!(verdict.overall_status, OverallStatus::Valid);
    assert_eq!(progress.last(), Some(&100));
}

struct FailingOcr {
    calls: Cell<u32>,
}

impl OcrEngine for FailingOcr {
    fn recognize(
        &self,
        _image: &Path,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, ReconcileError> {
        self.calls.set(self.calls.get() + 1);
        progress(OcrProgress::new(40));
        Err(ReconcileError::ocr("image unreadable"))
    }
}

#[test]
fn ocr_failure_is_retryable_and_not_a_verdict() {
    let engine = FailingOcr { calls: Cell::new(0) };
    let reconciler = Reconciler::new();

    for _ in 0..2 {
        let err = reconciler
            .reconcile_image(&asha(), &engine, Path::new("card.jpg"), &mut |_| {})
            .unwrap_err();
        assert!(err.is_retryable());
    }
    assert_eq!(engine.calls.get(), 2);
}

#[test]
fn stricter_config_downgrades_partial_matches() {
    let config = ReconcileConfig {
        high_confidence: 1.0,
        ..ReconcileConfig::default()
    };
    let text = format!("{}\nDOB: 14/01/1995", FRONT_OF_CARD.replace("14/07/1995", ""));
    let verdict = Reconciler::with_config(config).reconcile(&asha(), &text);
    let dob = &verdict.per_field[&FieldName::DateOfBirth];
    assert!(dob.found);
    assert_eq!(dob.severity, Severity::Warning);
}
