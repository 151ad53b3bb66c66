#![deny(unreachable_patterns)]
//! Media operations for the Adreel assembly pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with cancellation support
//! - FFprobe inspection of audio/video files
//! - Sample-exact PCM mixdown (loop/truncate alignment, ducking)
//! - Local deterministic slide rendering with font fallback tiers
//! - Still-image scene composition and concat-based sequence encoding

pub mod audio;
pub mod command;
pub mod compose;
pub mod encode;
pub mod error;
pub mod mixdown;
pub mod probe;
pub mod slide;

pub use audio::{read_audio, AudioBuffer, AudioSpec, DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compose::{clamp_canvas, total_duration, SceneClip};
pub use encode::encode_sequence;
pub use error::{MediaError, MediaResult};
pub use mixdown::{duck_and_mix, MusicCatalog, MUSIC_DUCK_DB};
pub use probe::{get_duration, probe_media, MediaInfo};
pub use slide::{render_slide, FontResolution, SlideFont};
