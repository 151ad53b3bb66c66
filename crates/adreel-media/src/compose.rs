//! Renderable scene clips.

use std::path::PathBuf;

/// Safety ceiling on encoded output width.
pub const MAX_OUTPUT_WIDTH: u32 = 1080;

/// Safety ceiling on encoded output height.
pub const MAX_OUTPUT_HEIGHT: u32 = 1920;

/// One renderable scene: a still image held for a reconciled duration with
/// an optional mixed audio track. No motion or interpolation between scenes.
#[derive(Debug, Clone)]
pub struct SceneClip {
    /// Base image for the scene
    pub image: PathBuf,
    /// Mixed narration+music WAV, when narration exists
    pub audio: Option<PathBuf>,
    /// Reconciled duration in seconds
    pub duration: f64,
    /// Target frame rate
    pub fps: u32,
}

impl SceneClip {
    /// Create a clip from resolved artifacts.
    pub fn new(image: PathBuf, audio: Option<PathBuf>, duration: f64, fps: u32) -> Self {
        Self {
            image,
            audio,
            duration,
            fps,
        }
    }
}

/// Sum of scene durations, the expected timeline length.
pub fn total_duration(clips: &[SceneClip]) -> f64 {
    clips.iter().map(|c| c.duration).sum()
}

/// Clamp canvas dimensions to the output ceiling, preserving aspect.
///
/// Dimensions are forced even, which H.264 yuv420p encoding requires.
pub fn clamp_canvas(width: u32, height: u32) -> (u32, u32) {
    let even = |v: u32| v & !1;

    if width <= MAX_OUTPUT_WIDTH && height <= MAX_OUTPUT_HEIGHT {
        return (even(width).max(2), even(height).max(2));
    }

    let scale = f64::min(
        MAX_OUTPUT_WIDTH as f64 / width as f64,
        MAX_OUTPUT_HEIGHT as f64 / height as f64,
    );
    let w = (width as f64 * scale).floor() as u32;
    let h = (height as f64 * scale).floor() as u32;
    (even(w).max(2), even(h).max(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration_is_sum() {
        let clips = vec![
            SceneClip::new("a.png".into(), None, 3.0, 30),
            SceneClip::new("b.png".into(), None, 4.0, 30),
        ];
        assert!((total_duration(&clips) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_within_ceiling_is_identity() {
        assert_eq!(clamp_canvas(1080, 1920), (1080, 1920));
        assert_eq!(clamp_canvas(720, 1280), (720, 1280));
    }

    #[test]
    fn test_clamp_oversized_preserves_aspect() {
        let (w, h) = clamp_canvas(2160, 3840);
        assert_eq!((w, h), (1080, 1920));

        let (w, h) = clamp_canvas(4000, 1000);
        assert!(w <= MAX_OUTPUT_WIDTH && h <= MAX_OUTPUT_HEIGHT);
        let aspect_in = 4000.0 / 1000.0;
        let aspect_out = w as f64 / h as f64;
        assert!((aspect_in - aspect_out).abs() / aspect_in < 0.02);
    }

    #[test]
    fn test_clamp_forces_even_dimensions() {
        let (w, h) = clamp_canvas(1079, 1919);
        assert_eq!(w % 2, 0);
        assert_eq!(h % 2, 0);
    }
}
