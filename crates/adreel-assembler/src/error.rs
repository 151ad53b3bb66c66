//! Assembly error types.

use serde::Serialize;
use thiserror::Error;

pub type AssembleResult<T> = Result<T, AssembleError>;

/// Errors from a pipeline run.
///
/// Validation and generation errors propagate to the caller uncaught; no
/// partial-success state is persisted. Orphaned run-keyed intermediates in
/// the export sink are acceptable after a failure.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Validation error: {0}")]
    Validation(#[from] adreel_models::StoryboardError),

    #[error("Generation error: {0}")]
    Generation(#[from] adreel_backend::BackendError),

    #[error("Encode error: {0}")]
    Media(#[from] adreel_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssembleError {
    /// Error kind for the user-visible failure payload.
    pub fn kind(&self) -> &'static str {
        match self {
            AssembleError::Validation(_) => "validation",
            AssembleError::Generation(_) => "generation",
            AssembleError::Media(adreel_media::MediaError::Cancelled) => "cancelled",
            AssembleError::Media(_) => "encode",
            AssembleError::Io(_) => "io",
        }
    }

    /// Structured payload handed to the caller on failure.
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            ok: false,
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// User-visible failure shape: the error kind plus the underlying cause.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub ok: bool,
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use adreel_models::StoryboardError;

    #[test]
    fn test_payload_carries_kind_and_cause() {
        let err = AssembleError::from(StoryboardError::NoScenes);
        let payload = err.payload();
        assert!(!payload.ok);
        assert_eq!(payload.kind, "validation");
        assert!(payload.message.contains("at least one scene"));
    }

    #[test]
    fn test_cancellation_has_its_own_kind() {
        let err = AssembleError::from(adreel_media::MediaError::Cancelled);
        assert_eq!(err.kind(), "cancelled");
    }
}
