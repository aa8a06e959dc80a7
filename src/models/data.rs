use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Verdict of a single field matcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub found: bool,
    pub confidence: f64,
    pub extracted: Option<String>,
}

impl MatchResult {
    pub fn found(confidence: f64, extracted: impl Into<String>) -> Self {
        MatchResult {
            found: true,
            confidence: confidence.clamp(0.0, 1.0),
            extracted: Some(extracted.into()),
        }
    }

    pub fn not_found() -> Self {
        MatchResult {
            found: false,
            confidence: 0.0,
            extracted: None,
        }
    }

    /// Keeps whichever of the two results is more convincing.
    pub fn better_of(self, other: MatchResult) -> MatchResult {
        match (self.found, other.found) {
            (true, false) => self,
            (false, true) => other,
            _ if other.confidence > self.confidence => other,
            _ => self,
        }
    }
}

/// Keys of the per-field map. Ordering follows declaration order, with the
/// classification gate first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    DocumentType,
    Name,
    IdNumber,
    DateOfBirth,
    Phone,
}

impl FieldName {
    /// Fields whose mismatch invalidates the whole submission.
    pub fn is_critical(self) -> bool {
        matches!(self, FieldName::Name | FieldName::IdNumber)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldName::DocumentType => "Document type",
            FieldName::Name => "Name",
            FieldName::IdNumber => "Aadhaar number",
            FieldName::DateOfBirth => "Date of birth",
            FieldName::Phone => "Phone number",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidation {
    pub field_name: FieldName,
    pub found: bool,
    pub confidence: f64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Valid,
    Warning,
    Invalid,
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverallStatus::Valid => write!(f, "VALID"),
            OverallStatus::Warning => write!(f, "WARNING"),
            OverallStatus::Invalid => write!(f, "INVALID"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentClassification {
    pub is_expected_type: bool,
    pub confidence: f64,
}

/// Outcome of one document submission. Built once, never mutated; a retry
/// produces a new verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationVerdict {
    pub overall_status: OverallStatus,
    pub classification: DocumentClassification,
    pub extracted_fields: BTreeMap<FieldName, String>,
    pub per_field: BTreeMap<FieldName, FieldValidation>,
    pub raw_ocr_text: String,
}

impl ReconciliationVerdict {
    /// Whether the caller may move on to the next workflow step.
    pub fn may_proceed(&self) -> bool {
        matches!(
            self.overall_status,
            OverallStatus::Valid | OverallStatus::Warning
        )
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldValidation> {
        self.per_field.get(&name)
    }
}

/// Values the user typed into the form. Untrimmed input is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredFields {
    pub name: String,
    pub id_number: String,
    pub date_of_birth: String,
    pub phone: String,
}

/// A date broken into components; any component may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParts {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl DateParts {
    pub fn new(day: Option<u32>, month: Option<u32>, year: Option<i32>) -> Self {
        DateParts {
            day: day.filter(|d| (1..=31).contains(d)),
            month: month.filter(|m| (1..=12).contains(m)),
            year,
        }
    }

    pub fn year_only(year: i32) -> Self {
        DateParts {
            day: None,
            month: None,
            year: Some(year),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.day.is_none() && self.month.is_none() && self.year.is_none()
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?)
    }
}
