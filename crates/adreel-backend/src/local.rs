//! Local deterministic fallback backend.
//!
//! Free mode keeps the pipeline fully runnable with zero external
//! dependencies: narration becomes a silent clip whose length is estimated
//! from reading speed, and scene images are brand-colored caption slides.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use adreel_media::slide::{render_slide, SlideFont};
use adreel_media::{AudioBuffer, AudioSpec};
use adreel_models::{BrandColor, Canvas};

use crate::error::BackendResult;
use crate::{GenerationMode, MediaBackend};

/// Assumed reading rate for silent narration, in characters per second.
pub const READING_CHARS_PER_SEC: f64 = 14.0;

/// Minimum narration duration so very short lines still produce a usable
/// clip, in seconds.
pub const MIN_NARRATION_SECS: f64 = 1.2;

/// Estimate spoken duration of a line from its character count.
///
/// Monotonic in text length and never below [`MIN_NARRATION_SECS`], even
/// for empty or whitespace-only input.
pub fn estimate_reading_secs(text: &str) -> f64 {
    let chars = text.trim().chars().count() as f64;
    (chars / READING_CHARS_PER_SEC).max(MIN_NARRATION_SECS)
}

/// Backend producing silent narration and locally rendered slides.
pub struct LocalBackend {
    font: SlideFont,
    audio_spec: AudioSpec,
}

impl LocalBackend {
    /// Create a local backend with a resolved caption font.
    pub fn new(font: SlideFont) -> Self {
        Self {
            font,
            audio_spec: AudioSpec::default(),
        }
    }
}

#[async_trait]
impl MediaBackend for LocalBackend {
    async fn synthesize_speech(
        &self,
        text: &str,
        _voice: &str,
        out_stem: &Path,
    ) -> BackendResult<PathBuf> {
        let secs = estimate_reading_secs(text);
        let out = out_stem.with_extension("wav");
        debug!(secs = format!("{:.2}", secs), out = %out.display(), "Synthesizing silent narration");

        AudioBuffer::silence(secs, self.audio_spec).write_wav(&out)?;
        Ok(out)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        color: BrandColor,
        canvas: &Canvas,
        out_stem: &Path,
    ) -> BackendResult<PathBuf> {
        let out = out_stem.with_extension("png");
        debug!(out = %out.display(), "Rendering caption slide");

        let img = render_slide(prompt, canvas, color, &self.font);
        img.save(&out)?;
        Ok(out)
    }

    fn mode(&self) -> GenerationMode {
        GenerationMode::Free
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_estimate_floor() {
        assert!((estimate_reading_secs("") - MIN_NARRATION_SECS).abs() < 1e-9);
        assert!((estimate_reading_secs("   ") - MIN_NARRATION_SECS).abs() < 1e-9);
        // "Hello world" = 11 chars; 11/14 < 1.2 so the floor applies
        assert!((estimate_reading_secs("Hello world") - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_reading_estimate_monotonic() {
        let mut text = String::new();
        let mut last = 0.0;
        for _ in 0..200 {
            text.push('a');
            let secs = estimate_reading_secs(&text);
            assert!(secs >= last);
            last = secs;
        }
        // 200 chars is well past the floor
        assert!((last - 200.0 / READING_CHARS_PER_SEC).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_silent_narration_duration_matches_estimate() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(SlideFont::resolve(None, None));

        let out = backend
            .synthesize_speech("Hello world", "alloy", &dir.path().join("narration_x_0"))
            .await
            .unwrap();
        assert_eq!(out.extension().unwrap(), "wav");

        let clip = AudioBuffer::from_wav(&out).unwrap();
        assert!((clip.duration_secs() - 1.2).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_slide_written_at_canvas_size() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(SlideFont::resolve(None, None));
        let canvas = Canvas {
            width: 108,
            height: 192,
            fps: 30,
        };

        let out = backend
            .generate_image(
                "A great product",
                BrandColor::default(),
                &canvas,
                &dir.path().join("scene_x_0"),
            )
            .await
            .unwrap();

        let img = image::open(&out).unwrap();
        assert_eq!(img.width(), 108);
        assert_eq!(img.height(), 192);
    }
}
