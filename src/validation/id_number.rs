use crate::models::{MatchResult, ReconcileConfig};
use crate::processing::{correct_numeric_confusions, digits_only, similarity};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    // Twelve digits, optionally printed as three groups of four.
    static ref ID_NUMBER_PATTERN: Regex = Regex::new(r"\b[0-9]{4} ?[0-9]{4} ?[0-9]{4}\b").unwrap();
}

pub struct IdNumberMatcher;

impl IdNumberMatcher {
    /// Find the declared 12-digit Aadhaar number in the OCR text.
    ///
    /// An exact digit match scores 1.0. Anything else must reach the strict
    /// `id_similarity` threshold; below it the result is not found with zero confidence.
    pub fn check(declared: &str, ocr_text: &str, config: &ReconcileConfig) -> MatchResult {
        let wanted = digits_only(declared);
        if wanted.is_empty() {
            debug!("Declared ID number has no digits");
            return MatchResult::not_found();
        }

        let corrected = correct_numeric_confusions(ocr_text);
        let mut best = MatchResult::not_found();

        for text in [ocr_text, corrected.as_str()] {
            for m in ID_NUMBER_PATTERN.find_iter(text) {
                let candidate = digits_only(m.as_str());
                if candidate == wanted {
                    debug!("ID number matched exactly");
                    return MatchResult::found(1.0, m.as_str());
                }

                let score = similarity(&wanted, &candidate);
                if score >= config.id_similarity {
                    best = best.better_of(MatchResult::found(score, m.as_str()));
                }
            }
        }

        debug!("ID number best confidence {:.3} (found: {})", best.confidence, best.found);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(id: &str, text: &str) -> MatchResult {
        IdNumberMatcher::check(id, text, &ReconcileConfig::default())
    }

    #[test]
    fn test_grouped_number() {
        let result = check("123456789012", "Your Aadhaar No.: 1234 5678 9012");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.extracted.as_deref(), Some("1234 5678 9012"));
    }

    #[test]
    fn test_ungrouped_number_with_formatted_declaration() {
        let result = check("1234-5678-9012", "UID 123456789012");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_letter_o_read_for_zero() {
        let result = check("123456789012", "1234 5678 9O12");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.extracted.as_deref(), Some("1234 5678 9012"));
    }

    #[test]
    fn test_similarity_threshold_boundary() {
        // 123456789012 vs 123456789013: 10 of 11 bigrams shared = 0.909
        let result = check("123456789012", "1234 5678 9013");
        assert!(result.found);
        assert!(result.confidence >= 0.9 && result.confidence < 1.0);

        // A mid-number error breaks two bigrams: 9 of 11 = 0.818
        let result = check("123456789012", "1234 5078 9012");
        assert!(!result.found);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_longer_digit_runs_are_not_candidates() {
        let result = check("123456789012", "VID 9123456789012345");
        assert!(!result.found);
    }

    #[test]
    fn test_empty_declared() {
        assert!(!check("", "1234 5678 9012").found);
    }
}
