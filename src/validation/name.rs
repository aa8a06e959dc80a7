use crate::models::{MatchResult, ReconcileConfig};
use crate::processing::{normalize, similarity};
use log::debug;

pub struct NameMatcher;

impl NameMatcher {
    /// Look for the declared full name in the OCR text.
    ///
    /// Tried in order: whole-name containment, per-token containment, then a
    /// sliding window of OCR tokens scored by bigram similarity.
    pub fn check(declared: &str, ocr_text: &str, config: &ReconcileConfig) -> MatchResult {
        let name = normalize(declared);
        let text = normalize(ocr_text);

        let tokens: Vec<&str> = name
            .split(' ')
            .filter(|t| t.chars().count() > 1)
            .collect();
        if tokens.is_empty() {
            debug!("Name '{}' has no usable tokens", declared);
            return MatchResult::not_found();
        }

        if text.contains(&name) {
            debug!("Name found verbatim");
            return MatchResult::found(1.0, name);
        }

        let matched: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|t| text.contains(t))
            .collect();
        let fraction = matched.len() as f64 / tokens.len() as f64;
        if fraction >= config.name_token_fraction {
            debug!("Name tokens matched: {}/{}", matched.len(), tokens.len());
            return MatchResult::found(fraction, matched.join(" "));
        }

        Self::best_window(&tokens, &text, config)
    }

    fn best_window(tokens: &[&str], text: &str, config: &ReconcileConfig) -> MatchResult {
        let wanted = tokens.join(" ");
        let text_tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();
        if text_tokens.is_empty() {
            return MatchResult::not_found();
        }

        let size = tokens.len().min(text_tokens.len());
        let mut best_score = 0.0;
        let mut best_window = String::new();
        for window in text_tokens.windows(size) {
            let candidate = window.join(" ");
            let score = similarity(&wanted, &candidate);
            if score > best_score {
                best_score = score;
                best_window = candidate;
            }
        }

        debug!("Best name window '{}' scored {:.3}", best_window, best_score);
        if best_score >= config.name_similarity {
            MatchResult::found(best_score, best_window)
        } else {
            MatchResult {
                found: false,
                confidence: best_score,
                extracted: None,
            }
        }
    }
}
