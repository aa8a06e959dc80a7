use crate::models::{DocumentClassification, ReconcileConfig};
use crate::processing::normalize;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Phrases printed on Aadhaar cards and letters, in English and Hindi.
pub const DOCUMENT_KEYWORDS: [&str; 7] = [
    "aadhaar",
    "aadhar",
    "uidai",
    "unique identification",
    "government of india",
    "आधार",
    "भारत सरकार",
];

lazy_static! {
    static ref NORMALIZED_KEYWORDS: Vec<String> =
        DOCUMENT_KEYWORDS.iter().map(|k| normalize(k)).collect();
    static ref STRUCTURAL_NUMBER: Regex = Regex::new(r"[0-9]{4}\s?[0-9]{4}\s?[0-9]{4}").unwrap();
}

pub struct DocumentClassifier;

impl DocumentClassifier {
    /// Decide whether the OCR text looks like an Aadhaar document.
    ///
    /// Confidence is the share of keywords present plus a bonus for a 4-4-4
    /// digit group, clamped to [0, 1].
    pub fn classify(ocr_text: &str, config: &ReconcileConfig) -> DocumentClassification {
        let text = normalize(ocr_text);
        let keyword_hits = NORMALIZED_KEYWORDS
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .count();
        let has_number = STRUCTURAL_NUMBER.is_match(ocr_text);

        let mut confidence = keyword_hits as f64 / NORMALIZED_KEYWORDS.len() as f64;
        if has_number {
            confidence += config.structural_bonus;
        }
        let confidence = confidence.clamp(0.0, 1.0);

        debug!(
            "Classifier: {} keyword(s), number pattern: {}, confidence {:.3}",
            keyword_hits, has_number, confidence
        );

        DocumentClassification {
            is_expected_type: confidence > config.classification_threshold,
            confidence,
        }
    }
}
