//! The storyboard assembly pipeline.
//!
//! Coordinates per-scene narration, music mixdown, visual resolution and
//! duration reconciliation, then encodes the ordered scene clips into one
//! vertical video. Scenes are processed sequentially in storyboard order;
//! each per-scene step owns its artifacts exclusively, so the loop could be
//! parallelized across scenes as long as the final encode preserves order.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use adreel_backend::MediaBackend;
use adreel_media::{
    duck_and_mix, encode_sequence, probe_media, read_audio, AudioBuffer, AudioSpec,
    FfmpegRunner, MediaError, MusicCatalog, SceneClip,
};
use adreel_models::{Brand, MusicMood, RenderManifest, RunId, Storyboard};
use serde::Deserialize;

use crate::config::AssemblerConfig;
use crate::error::AssembleResult;
use crate::exports::ExportSink;
use crate::logging::RunLogger;
use crate::reconcile::reconciled_duration;
use crate::visuals::resolve_scene_images;

/// Caller-supplied compositing hints for one assembly run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssembleRequest {
    /// Brand information resolved at the boundary
    pub brand: Brand,
    /// Free-text music mood, matched against the bed catalog
    pub music_mood: Option<String>,
    /// TTS voice override
    pub voice: Option<String>,
    /// Pre-existing images to reuse instead of generating
    pub provided_images: Vec<PathBuf>,
    /// Whether to synthesize narration; without it scene durations fall
    /// back to the declared timestamps
    pub with_narration: bool,
    /// Caller-scoped run id; generated when absent
    pub run_id: Option<String>,
}

impl Default for AssembleRequest {
    fn default() -> Self {
        Self {
            brand: Brand::default(),
            music_mood: None,
            voice: None,
            provided_images: Vec::new(),
            with_narration: true,
            run_id: None,
        }
    }
}

/// The storyboard-driven video assembler.
pub struct VideoAssembler {
    backend: Arc<dyn MediaBackend>,
    config: AssemblerConfig,
}

impl VideoAssembler {
    /// Create an assembler bound to a backend selected at startup.
    pub fn new(backend: Arc<dyn MediaBackend>, config: AssemblerConfig) -> Self {
        Self { backend, config }
    }

    /// Assemble a storyboard into one encoded video.
    ///
    /// Validation precedes any generation work. Cancellation is honored
    /// between scene boundaries and before the final encode; interrupting
    /// the encoder mid-write would leave a corrupt file.
    pub async fn assemble(
        &self,
        storyboard: &Storyboard,
        request: &AssembleRequest,
        cancel: watch::Receiver<bool>,
    ) -> AssembleResult<RenderManifest> {
        storyboard.validate()?;

        let run_id = request
            .run_id
            .as_deref()
            .map(RunId::from_string)
            .unwrap_or_default();
        let logger = RunLogger::new(&run_id, "assemble");
        logger.log_start(&format!("{} scenes", storyboard.scenes.len()));

        let sink = ExportSink::create(&self.config.export_dir, run_id).await?;
        let color = request.brand.color();
        let voice = request.voice.as_deref().unwrap_or(&self.config.voice);
        let audio_spec = AudioSpec::default();

        let bed = if request.with_narration {
            self.load_music_bed(request, &logger, audio_spec).await
        } else {
            None
        };

        check_cancelled(&cancel)?;

        let images = resolve_scene_images(
            &storyboard.scenes,
            &request.provided_images,
            self.backend.as_ref(),
            color,
            &storyboard.canvas,
            &sink,
        )
        .await?;

        let fps = storyboard.canvas.fps;
        let mut clips = Vec::with_capacity(storyboard.scenes.len());

        for (index, scene) in storyboard.scenes.iter().enumerate() {
            check_cancelled(&cancel)?;

            let (audio_path, mixed_secs) = if request.with_narration {
                let narration_path = self
                    .backend
                    .synthesize_speech(scene.voice_line(), voice, &sink.narration_stem(index))
                    .await?;
                let narration = read_audio(&narration_path, audio_spec).await?;

                let mixed = duck_and_mix(&narration, bed.as_ref())?;
                let mix_path = sink.mix_path(index);
                mixed.write_wav(&mix_path)?;

                (Some(mix_path), Some(mixed.duration_secs()))
            } else {
                (None, None)
            };

            let duration = reconciled_duration(mixed_secs, scene);
            clips.push((audio_path, duration));

            logger.log_progress(&format!(
                "scene {} ({}) reconciled to {:.2}s",
                index, scene.id, duration
            ));
        }

        let scene_clips: Vec<SceneClip> = clips
            .into_iter()
            .zip(images)
            .map(|((audio, duration), image)| SceneClip::new(image, audio, duration, fps))
            .collect();

        check_cancelled(&cancel)?;

        let runner = FfmpegRunner::new()
            .with_cancel(cancel.clone())
            .with_timeout(self.config.encode_timeout.as_secs());
        let out_path = sink.video_path();
        let expected = encode_sequence(
            &scene_clips,
            storyboard.canvas.width,
            storyboard.canvas.height,
            &out_path,
            &sink.segments_dir(),
            &runner,
        )
        .await?;

        // Frame-rounded ground truth when probeable; the expected sum otherwise
        let duration = match probe_media(&out_path).await {
            Ok(info) if info.duration > 0.0 => info.duration,
            Ok(_) => expected,
            Err(e) => {
                logger.log_warning(&format!("could not probe output, using expected duration: {}", e));
                expected
            }
        };

        let manifest = RenderManifest::new(&out_path, sink.public_url(&out_path), duration);
        logger.log_completion(&format!("{} ({:.2}s)", manifest.filename, duration));
        Ok(manifest)
    }

    /// Load and normalize the music bed, degrading to narration-only on any
    /// asset problem. Missing cosmetic assets degrade the run, never fail it.
    async fn load_music_bed(
        &self,
        request: &AssembleRequest,
        logger: &RunLogger,
        spec: AudioSpec,
    ) -> Option<AudioBuffer> {
        let mood = MusicMood::from_label(request.music_mood.as_deref());
        let catalog = MusicCatalog::new(&self.config.assets_dir);
        let bed_path = catalog.select(mood)?;

        match read_audio(&bed_path, spec).await {
            Ok(bed) => Some(bed),
            Err(e) => {
                logger.log_warning(&format!(
                    "music bed {} unreadable, continuing without music: {}",
                    bed_path.display(),
                    e
                ));
                None
            }
        }
    }
}

/// Fail with [`MediaError::Cancelled`] once the cancel signal is set.
fn check_cancelled(cancel: &watch::Receiver<bool>) -> Result<(), MediaError> {
    if *cancel.borrow() {
        warn!("Assembly cancelled at scene boundary");
        return Err(MediaError::Cancelled);
    }
    Ok(())
}

/// A cancellation handle pair for one run.
pub fn cancellation_pair() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}
