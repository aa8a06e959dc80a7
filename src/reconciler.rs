use crate::models::*;
use crate::processing::{OcrEngine, OcrProgress};
use crate::utils::ReconcileError;
use crate::validation::*;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Steps of a single submission. `Aggregated` is terminal; a retry starts a
/// fresh run from `Classifying`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStage {
    Pending,
    Classifying,
    Matching,
    Aggregated,
}

impl fmt::Display for ReconcileStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ReconcileStage::Pending => "pending",
            ReconcileStage::Classifying => "classifying",
            ReconcileStage::Matching => "matching",
            ReconcileStage::Aggregated => "aggregated",
        };
        f.write_str(name)
    }
}

/// Reconciles declared identity fields against OCR text.
///
/// Holds only configuration; every call is independent, so one instance can
/// serve concurrent submissions.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcileConfig,
}

impl Reconciler {
    pub fn new() -> Self {
        Reconciler::default()
    }

    pub fn with_config(config: ReconcileConfig) -> Self {
        Reconciler { config }
    }

    /// Run the OCR collaborator on `image`, then reconcile its text.
    ///
    /// OCR failure is returned as an error, never as a verdict, so the caller
    /// can retry without asking for a new upload.
    pub fn reconcile_image(
        &self,
        declared: &DeclaredFields,
        engine: &dyn OcrEngine,
        image: &Path,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<ReconciliationVerdict, ReconcileError> {
        let text = engine.recognize(image, progress).map_err(|e| {
            warn!("OCR failed for {}: {}", image.display(), e);
            e
        })?;
        Ok(self.reconcile(declared, &text))
    }

    /// Classify the document, match every field and aggregate the outcome.
    pub fn reconcile(&self, declared: &DeclaredFields, ocr_text: &str) -> ReconciliationVerdict {
        debug!("Reconciliation {}", ReconcileStage::Classifying);
        let classification = DocumentClassifier::classify(ocr_text, &self.config);
        if !classification.is_expected_type {
            warn!(
                "Document rejected by classifier (confidence {:.2})",
                classification.confidence
            );
            return Self::rejected(classification, ocr_text);
        }

        debug!("Reconciliation {}", ReconcileStage::Matching);
        let results = [
            (
                FieldName::Name,
                NameMatcher::check(&declared.name, ocr_text, &self.config),
            ),
            (
                FieldName::IdNumber,
                IdNumberMatcher::check(&declared.id_number, ocr_text, &self.config),
            ),
            (
                FieldName::DateOfBirth,
                DateMatcher::check(&declared.date_of_birth, ocr_text, &self.config),
            ),
            (
                FieldName::Phone,
                PhoneMatcher::check(&declared.phone, ocr_text, &self.config),
            ),
        ];

        let verdict = self.aggregate(classification, &results, ocr_text);
        info!(
            "Reconciliation {}: overall status {}",
            ReconcileStage::Aggregated,
            verdict.overall_status
        );
        verdict
    }

    fn aggregate(
        &self,
        classification: DocumentClassification,
        results: &[(FieldName, MatchResult)],
        ocr_text: &str,
    ) -> ReconciliationVerdict {
        let per_field: BTreeMap<FieldName, FieldValidation> = results
            .iter()
            .map(|(field, result)| (*field, self.field_validation(*field, result)))
            .collect();

        let extracted_fields: BTreeMap<FieldName, String> = results
            .iter()
            .filter_map(|(field, result)| {
                result
                    .extracted
                    .as_ref()
                    .filter(|_| result.found)
                    .map(|value| (*field, value.clone()))
            })
            .collect();

        let critical_missing = per_field
            .values()
            .any(|v| v.field_name.is_critical() && !v.found);
        // Severity is only a confidence badge; any imperfect match still downgrades the verdict.
        let degraded = results
            .iter()
            .any(|(_, result)| !result.found || result.confidence < 1.0);

        let overall_status = if critical_missing {
            OverallStatus::Invalid
        } else if degraded {
            OverallStatus::Warning
        } else {
            OverallStatus::Valid
        };

        ReconciliationVerdict {
            overall_status,
            classification,
            extracted_fields,
            per_field,
            raw_ocr_text: ocr_text.to_string(),
        }
    }

    fn field_validation(&self, field: FieldName, result: &MatchResult) -> FieldValidation {
        let percent = (result.confidence * 100.0).round();
        let (severity, message) = if result.found && result.confidence >= self.config.high_confidence
        {
            (
                Severity::Success,
                format!("{} matches the document ({}% confidence)", field, percent),
            )
        } else if result.found {
            (
                Severity::Warning,
                format!(
                    "{} only partially matches the document ({}% confidence)",
                    field, percent
                ),
            )
        } else if field.is_critical() {
            (
                Severity::Error,
                format!("{} does not match the document", field),
            )
        } else if field == FieldName::DateOfBirth {
            (
                Severity::Warning,
                format!(
                    "{} could not be confirmed on the document; please verify it manually",
                    field
                ),
            )
        } else {
            (
                Severity::Warning,
                format!("{} was not found on the document", field),
            )
        };

        FieldValidation {
            field_name: field,
            found: result.found,
            confidence: result.confidence,
            message,
            severity,
        }
    }

    fn rejected(classification: DocumentClassification, ocr_text: &str) -> ReconciliationVerdict {
        let entry = FieldValidation {
            field_name: FieldName::DocumentType,
            found: false,
            confidence: classification.confidence,
            message: "The uploaded document does not look like an Aadhaar card".to_string(),
            severity: Severity::Error,
        };

        let mut per_field = BTreeMap::new();
        per_field.insert(FieldName::DocumentType, entry);

        ReconciliationVerdict {
            overall_status: OverallStatus::Invalid,
            classification,
            extracted_fields: BTreeMap::new(),
            per_field,
            raw_ocr_text: ocr_text.to_string(),
        }
    }
}
