//! Backend error types.

use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors from generation backends.
///
/// Remote failures carry the backend's own detail so a paid run that loses
/// its voice track fails loudly instead of silently degrading mid-run.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Speech synthesis failed: {message}")]
    TtsFailed {
        message: String,
        status: Option<u16>,
    },

    #[error("Image generation failed: {message}")]
    ImageFailed {
        message: String,
        status: Option<u16>,
    },

    #[error("Pro mode requires an API key")]
    MissingCredentials,

    #[error("Unexpected backend response: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Media error: {0}")]
    Media(#[from] adreel_media::MediaError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// Create a speech synthesis failure.
    pub fn tts_failed(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::TtsFailed {
            message: message.into(),
            status,
        }
    }

    /// Create an image generation failure.
    pub fn image_failed(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::ImageFailed {
            message: message.into(),
            status,
        }
    }
}
