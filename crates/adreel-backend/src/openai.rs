//! OpenAI remote generation backend (pro mode).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use adreel_models::{BrandColor, Canvas};

use crate::error::{BackendError, BackendResult};
use crate::{GenerationMode, MediaBackend};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const TTS_MODEL: &str = "gpt-4o-mini-tts";
const IMAGE_MODEL: &str = "gpt-image-1";
const IMAGE_SIZE: &str = "1024x1536";

/// Framing prepended to every scene prompt for image generation.
const IMAGE_PROMPT_PREFIX: &str = "vertical 9:16 cinematic product ad still, ";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: String,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: Option<String>,
}

/// Remote OpenAI backend for speech and image generation.
///
/// Failures are surfaced with the backend's status and body detail attached
/// and are never retried or degraded to free mode here.
pub struct OpenAiBackend {
    api_key: String,
    client: Client,
    api_base: String,
}

impl OpenAiBackend {
    /// Create a backend from an API key.
    pub fn new(api_key: impl Into<String>) -> BackendResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BackendError::MissingCredentials);
        }
        Ok(Self {
            api_key,
            client: Client::new(),
            api_base: OPENAI_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (used by tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }
}

#[async_trait]
impl MediaBackend for OpenAiBackend {
    async fn synthesize_speech(
        &self,
        text: &str,
        voice: &str,
        out_stem: &Path,
    ) -> BackendResult<PathBuf> {
        let out = out_stem.with_extension("mp3");
        debug!(voice = voice, out = %out.display(), "Requesting speech synthesis");

        let mut response = self
            .client
            .post(format!("{}/audio/speech", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&SpeechRequest {
                model: TTS_MODEL,
                voice,
                input: text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::tts_failed(body, Some(status)));
        }

        // Stream the audio body straight to the export sink
        let mut file = tokio::fs::File::create(&out).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!(out = %out.display(), "Narration synthesized");
        Ok(out)
    }

    async fn generate_image(
        &self,
        prompt: &str,
        _color: BrandColor,
        canvas: &Canvas,
        out_stem: &Path,
    ) -> BackendResult<PathBuf> {
        let out = out_stem.with_extension("png");
        debug!(out = %out.display(), "Requesting image generation");

        let response = self
            .client
            .post(format!("{}/images/generations", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&ImageRequest {
                model: IMAGE_MODEL,
                prompt: format!("{}{}", IMAGE_PROMPT_PREFIX, prompt),
                size: IMAGE_SIZE,
                quality: "high",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::image_failed(body, Some(status)));
        }

        let payload: ImageResponse = response.json().await?;
        let b64 = payload
            .data
            .first()
            .and_then(|d| d.b64_json.as_deref())
            .ok_or_else(|| {
                BackendError::InvalidResponse("image response missing b64_json".to_string())
            })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| BackendError::InvalidResponse(format!("bad base64 image: {}", e)))?;

        let img = image::load_from_memory(&bytes)?;
        let normalized = normalize_to_canvas(&img, canvas);
        normalized.save(&out)?;

        info!(out = %out.display(), "Scene image generated");
        Ok(out)
    }

    fn mode(&self) -> GenerationMode {
        GenerationMode::Pro
    }
}

/// Normalize a generated image to the canvas: cover-resize then center-crop,
/// so the output matches the canvas aspect regardless of generation size.
pub fn normalize_to_canvas(img: &DynamicImage, canvas: &Canvas) -> RgbImage {
    let (cw, ch) = (canvas.width, canvas.height);
    let (iw, ih) = (img.width().max(1), img.height().max(1));

    let scale = f64::max(cw as f64 / iw as f64, ch as f64 / ih as f64);
    let rw = (iw as f64 * scale).ceil() as u32;
    let rh = (ih as f64 * scale).ceil() as u32;

    let resized = img.resize_exact(rw, rh, FilterType::Lanczos3);
    let x = (rw - cw.min(rw)) / 2;
    let y = (rh - ch.min(rh)) / 2;
    resized.crop_imm(x, y, cw, ch).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(matches!(
            OpenAiBackend::new("  "),
            Err(BackendError::MissingCredentials)
        ));
        assert!(OpenAiBackend::new("sk-test").is_ok());
    }

    #[test]
    fn test_normalize_wide_image_to_vertical_canvas() {
        let canvas = Canvas {
            width: 90,
            height: 160,
            fps: 30,
        };
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 100, image::Rgb([5, 5, 5])));
        let out = normalize_to_canvas(&src, &canvas);
        assert_eq!((out.width(), out.height()), (90, 160));
    }

    #[test]
    fn test_normalize_exact_size_is_passthrough_shape() {
        let canvas = Canvas {
            width: 64,
            height: 128,
            fps: 30,
        };
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 128, image::Rgb([9, 9, 9])));
        let out = normalize_to_canvas(&src, &canvas);
        assert_eq!((out.width(), out.height()), (64, 128));
    }
}
