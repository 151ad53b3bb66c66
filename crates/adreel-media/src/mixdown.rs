//! Background-music mixdown.
//!
//! Overlays a mood-selected music bed under the narration track. The bed is
//! looped or truncated to exactly the narration's frame count and attenuated
//! by a fixed offset so speech stays intelligible. Music is optional:
//! a missing bed degrades to narration-only, never to a failed run.

use std::path::{Path, PathBuf};
use tracing::debug;

use adreel_models::MusicMood;

use crate::audio::AudioBuffer;
use crate::error::MediaResult;

/// Fixed attenuation applied to the music bed, in decibels.
pub const MUSIC_DUCK_DB: f64 = -15.0;

/// Music bed catalog keyed by mood.
///
/// Beds live in an asset directory as `music_<mood>.mp3`. Selection never
/// fails: an unknown mood was already folded to the default upstream, and a
/// mood whose file is absent falls back to the default bed, then to none.
#[derive(Debug, Clone)]
pub struct MusicCatalog {
    assets_dir: PathBuf,
}

impl MusicCatalog {
    /// Create a catalog rooted at `assets_dir`.
    pub fn new(assets_dir: impl AsRef<Path>) -> Self {
        Self {
            assets_dir: assets_dir.as_ref().to_path_buf(),
        }
    }

    /// Path a mood's bed would live at, whether or not it exists.
    pub fn bed_path(&self, mood: MusicMood) -> PathBuf {
        self.assets_dir
            .join(format!("music_{}.mp3", mood.as_filename_part()))
    }

    /// Select the bed file for a mood.
    ///
    /// Returns `None` when neither the requested mood's bed nor the default
    /// bed exists on disk.
    pub fn select(&self, mood: MusicMood) -> Option<PathBuf> {
        let requested = self.bed_path(mood);
        if requested.exists() {
            return Some(requested);
        }

        let fallback = self.bed_path(MusicMood::default());
        if fallback.exists() {
            debug!(
                mood = %mood,
                "No bed for requested mood, using default bed"
            );
            return Some(fallback);
        }

        debug!(mood = %mood, "No music bed available, narration only");
        None
    }
}

/// Mix a music bed under a narration clip.
///
/// The bed is ducked by [`MUSIC_DUCK_DB`], aligned to exactly the
/// narration's frame count (looped when shorter, truncated when longer),
/// and the narration is overlaid on top at full level. With no bed the
/// narration is returned unmodified.
///
/// Invariant: the output duration always equals the narration duration.
pub fn duck_and_mix(
    narration: &AudioBuffer,
    bed: Option<&AudioBuffer>,
) -> MediaResult<AudioBuffer> {
    let bed = match bed {
        Some(bed) => bed,
        None => return Ok(narration.clone()),
    };

    let aligned = bed.fit_to_frames(narration.frames()).gain_db(MUSIC_DUCK_DB);
    aligned.overlay(narration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioSpec;

    fn spec() -> AudioSpec {
        AudioSpec {
            channels: 2,
            sample_rate: 1000,
        }
    }

    fn tone(frames: usize, value: i16) -> AudioBuffer {
        AudioBuffer::from_samples(spec(), vec![value; frames * 2]).unwrap()
    }

    #[test]
    fn test_mix_without_bed_returns_narration() {
        let narration = tone(1200, 500);
        let mixed = duck_and_mix(&narration, None).unwrap();
        assert_eq!(mixed.frames(), narration.frames());
        assert_eq!(mixed.samples(), narration.samples());
    }

    #[test]
    fn test_mix_shorter_bed_loops_to_narration_length() {
        // bed 2.0s, narration 5.0s
        let narration = tone(5000, 100);
        let bed = tone(2000, 8000);
        let mixed = duck_and_mix(&narration, Some(&bed)).unwrap();
        assert_eq!(mixed.frames(), 5000);
        assert!((mixed.duration_secs() - narration.duration_secs()).abs() < 1e-9);
    }

    #[test]
    fn test_mix_longer_bed_truncates_to_narration_length() {
        let narration = tone(1000, 100);
        let bed = tone(9000, 8000);
        let mixed = duck_and_mix(&narration, Some(&bed)).unwrap();
        assert_eq!(mixed.frames(), 1000);
    }

    #[test]
    fn test_bed_is_ducked_under_narration() {
        let narration = tone(100, 0);
        let bed = tone(100, 10000);
        let mixed = duck_and_mix(&narration, Some(&bed)).unwrap();
        // Narration is silent, so samples are the ducked bed (~ -15 dB)
        assert!((mixed.samples()[0] as f64 - 1778.0).abs() < 2.0);
    }

    #[test]
    fn test_catalog_selects_existing_bed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("music_chill.mp3"), b"bed").unwrap();
        let catalog = MusicCatalog::new(dir.path());

        let selected = catalog.select(MusicMood::Chill).unwrap();
        assert!(selected.ends_with("music_chill.mp3"));
    }

    #[test]
    fn test_catalog_falls_back_to_default_bed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("music_upbeat.mp3"), b"bed").unwrap();
        let catalog = MusicCatalog::new(dir.path());

        let selected = catalog.select(MusicMood::Corporate).unwrap();
        assert!(selected.ends_with("music_upbeat.mp3"));
    }

    #[test]
    fn test_catalog_empty_dir_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = MusicCatalog::new(dir.path());
        assert!(catalog.select(MusicMood::Upbeat).is_none());
    }
}
