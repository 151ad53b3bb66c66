//! Generation backends for the Adreel assembly pipeline.
//!
//! The pipeline never talks to a generation service directly; it is handed
//! a [`MediaBackend`] capability object selected once at startup. Pro mode
//! binds the remote OpenAI backend, free mode the local deterministic one,
//! and the choice is fixed for the lifetime of the process.

pub mod error;
pub mod local;
pub mod mode;
pub mod openai;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use adreel_media::slide::SlideFont;
use adreel_models::{BrandColor, Canvas};

pub use error::{BackendError, BackendResult};
pub use local::{estimate_reading_secs, LocalBackend, MIN_NARRATION_SECS, READING_CHARS_PER_SEC};
pub use mode::GenerationMode;
pub use openai::OpenAiBackend;

/// Capability object for media generation.
///
/// `out_stem` is an extension-less path inside the export sink; the backend
/// appends the extension matching the format it actually produced and
/// returns the full location.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Convert a line of text into a spoken-audio clip.
    async fn synthesize_speech(
        &self,
        text: &str,
        voice: &str,
        out_stem: &Path,
    ) -> BackendResult<PathBuf>;

    /// Produce one still image for a scene prompt, sized for the canvas.
    async fn generate_image(
        &self,
        prompt: &str,
        color: BrandColor,
        canvas: &Canvas,
        out_stem: &Path,
    ) -> BackendResult<PathBuf>;

    /// Which mode this backend implements.
    fn mode(&self) -> GenerationMode;
}

/// Select the backend once from credentials and the free-mode override.
pub fn select_backend(
    api_key: Option<&str>,
    force_free: bool,
    font: SlideFont,
) -> BackendResult<Arc<dyn MediaBackend>> {
    let has_credentials = api_key.map(|k| !k.trim().is_empty()).unwrap_or(false);
    let mode = GenerationMode::detect(has_credentials, force_free);
    info!(mode = %mode, "Generation mode selected");

    match mode {
        GenerationMode::Pro => {
            // has_credentials guarantees the key is present and non-empty
            let key = api_key.unwrap_or_default();
            Ok(Arc::new(OpenAiBackend::new(key)?))
        }
        GenerationMode::Free => Ok(Arc::new(LocalBackend::new(font))),
    }
}
