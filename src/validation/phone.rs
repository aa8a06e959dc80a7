use crate::models::{MatchResult, ReconcileConfig};
use crate::processing::{correct_numeric_confusions, digits_only, last_digits, similarity};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

const LOCAL_DIGITS: usize = 10;

lazy_static! {
    // Candidate phone numbers, most specific first.
    static ref PHONE_PATTERNS: Vec<Regex> = vec![
        // Indian mobile: ten digits starting 6-9
        Regex::new(r"\b[6-9][0-9]{9}\b").unwrap(),
        // Any bare ten-digit run
        Regex::new(r"\b[0-9]{10}\b").unwrap(),
        // Grouped 3-3-4
        Regex::new(r"\b[0-9]{3}[-.\s][0-9]{3}[-.\s][0-9]{4}\b").unwrap(),
        // Country code prefix, or the common 5-5 grouping without one
        Regex::new(r"(?:\+?\b(?:00)?91[-\s]?[6-9][0-9]{4}[-\s]?[0-9]{5}|\b[6-9][0-9]{4}[-\s][0-9]{5})\b").unwrap(),
    ];
}

pub struct PhoneMatcher;

impl PhoneMatcher {
    /// Compare the last ten digits of the declared number with every phone-like
    /// candidate in the OCR text.
    pub fn check(declared: &str, ocr_text: &str, config: &ReconcileConfig) -> MatchResult {
        let declared_digits = digits_only(declared);
        let wanted = last_digits(&declared_digits, LOCAL_DIGITS);
        if wanted.is_empty() {
            debug!("Declared phone has no digits");
            return MatchResult::not_found();
        }

        let corrected = correct_numeric_confusions(ocr_text);
        let mut best = MatchResult::not_found();

        for text in [ocr_text, corrected.as_str()] {
            for pattern in PHONE_PATTERNS.iter() {
                for m in pattern.find_iter(text) {
                    let candidate_digits = digits_only(m.as_str());
                    let candidate = last_digits(&candidate_digits, LOCAL_DIGITS);

                    if candidate == wanted {
                        debug!("Phone matched exactly: {}", m.as_str());
                        return MatchResult::found(1.0, m.as_str().trim());
                    }

                    let score = similarity(wanted, candidate);
                    if score >= config.phone_similarity {
                        best = best.better_of(MatchResult::found(score, m.as_str().trim()));
                    }
                }
            }
        }

        debug!("Phone best confidence {:.3} (found: {})", best.confidence, best.found);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(phone: &str, text: &str) -> MatchResult {
        PhoneMatcher::check(phone, text, &ReconcileConfig::default())
    }

    #[test]
    fn test_hyphenated_five_five() {
        let result = check("9876543210", "Mobile: 98765-43210");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.extracted.as_deref(), Some("98765-43210"));
    }

    #[test]
    fn test_country_code_on_both_sides() {
        let result = check("+91 98765 43210", "Ph +919876543210");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_grouped_three_three_four() {
        let result = check("(987) 654-3210", "tel 987-654-3210");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_ocr_confusion_corrected() {
        let result = check("9876543210", "Mobile 98765432l0");
        assert!(result.found);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.extracted.as_deref(), Some("9876543210"));
    }

    #[test]
    fn test_near_miss_accepted_by_similarity() {
        // One trailing digit differs: 8 of 9 bigrams shared.
        let result = check("9876543210", "9876543211");
        assert!(result.found);
        assert!((result.confidence - 8.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_phone_in_text() {
        let result = check("9876543210", "GOVERNMENT OF INDIA Asha Verma");
        assert!(!result.found);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_declared_without_digits() {
        assert!(!check("n/a", "9876543210").found);
    }
}
