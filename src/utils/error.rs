use thiserror::Error;

/// Failures that can end a reconciliation attempt before a verdict exists.
///
/// Field mismatches are never errors; they are reported inside
/// [`ReconciliationVerdict`](crate::models::ReconciliationVerdict).
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The OCR collaborator could not produce text for the image.
    #[error("OCR error: {reason}")]
    Ocr { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReconcileError {
    pub fn ocr(reason: impl Into<String>) -> Self {
        ReconcileError::Ocr {
            reason: reason.into(),
        }
    }

    /// True when the caller can retry with the same image instead of asking for a new upload.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReconcileError::Ocr { .. })
    }
}
