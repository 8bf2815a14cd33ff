use thiserror::Error;

/// Errors raised when decoding study records supplied by a host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// Confidence ratings run from 1 to 5.
    #[error("Confidence must be between 1 and 5, got {0}")]
    InvalidConfidence(u8),
    /// Unknown lesson status string.
    #[error("Unknown lesson status: {0}")]
    InvalidLessonStatus(String),
    /// Unknown call event status string.
    #[error("Unknown call event status: {0}")]
    InvalidCallStatus(String),
}
