use crate::utils::ReconcileError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Decision thresholds used by the matchers, classifier and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Fraction of name tokens that must appear individually in the OCR text.
    pub name_token_fraction: f64,
    /// Minimum sliding-window similarity for a fuzzy name match.
    pub name_similarity: f64,
    pub phone_similarity: f64,
    /// ID numbers get no partial credit, so this stays strict.
    pub id_similarity: f64,
    /// Last-resort digit similarity for dates.
    pub date_digit_similarity: f64,
    /// Found fields at or above this confidence are reported as success.
    pub high_confidence: f64,
    /// Classifier confidence must exceed this to accept the document.
    pub classification_threshold: f64,
    /// Added to the classifier confidence when a 4-4-4 digit group is present.
    pub structural_bonus: f64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        ReconcileConfig {
            name_token_fraction: 0.6,
            name_similarity: 0.7,
            phone_similarity: 0.8,
            id_similarity: 0.9,
            date_digit_similarity: 0.6,
            high_confidence: 0.9,
            classification_threshold: 0.3,
            structural_bonus: 0.3,
        }
    }
}

impl ReconcileConfig {
    /// Load a config from JSON; missing keys fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ReconcileError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ReconcileError> {
        let config: ReconcileConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconcileError> {
        let checks = [
            ("name_token_fraction", self.name_token_fraction),
            ("name_similarity", self.name_similarity),
            ("phone_similarity", self.phone_similarity),
            ("id_similarity", self.id_similarity),
            ("date_digit_similarity", self.date_digit_similarity),
            ("high_confidence", self.high_confidence),
            ("classification_threshold", self.classification_threshold),
            ("structural_bonus", self.structural_bonus),
        ];
        for (key, value) in checks {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReconcileError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}
