//! Scene duration reconciliation.
//!
//! Storyboard timestamps are a planning estimate; synthesized speech length
//! is ground truth once it exists. Mixing the two naively would
//! desynchronize voice and visuals, so each scene's authoritative duration
//! comes from exactly one source.

use adreel_models::Scene;

/// Decide the authoritative duration for one scene.
///
/// 1. When a mixed audio clip was produced, its duration wins.
/// 2. Otherwise the declared timestamps apply, floored so degenerate
///    near-zero scenes still produce a visible clip.
pub fn reconciled_duration(mixed_audio_secs: Option<f64>, scene: &Scene) -> f64 {
    match mixed_audio_secs {
        Some(secs) => secs,
        None => scene.declared_duration(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adreel_models::storyboard::MIN_DECLARED_SCENE_SECS;

    fn scene(start: f64, end: f64) -> Scene {
        Scene {
            start,
            end,
            ..Default::default()
        }
    }

    #[test]
    fn test_audio_duration_is_authoritative() {
        // Declared 3s but speech ran 4.7s: speech wins
        let s = scene(0.0, 3.0);
        assert!((reconciled_duration(Some(4.7), &s) - 4.7).abs() < 1e-9);
    }

    #[test]
    fn test_declared_fallback_without_audio() {
        let first = scene(0.0, 3.0);
        let second = scene(3.0, 7.0);
        let total =
            reconciled_duration(None, &first) + reconciled_duration(None, &second);
        assert!((total - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_timestamps_are_floored() {
        let s = scene(5.0, 5.0);
        assert!(
            (reconciled_duration(None, &s) - MIN_DECLARED_SCENE_SECS).abs() < 1e-9
        );

        let reversed = scene(9.0, 2.0);
        assert!(
            (reconciled_duration(None, &reversed) - MIN_DECLARED_SCENE_SECS).abs() < 1e-9
        );
    }

    #[test]
    fn test_audio_duration_is_not_floored() {
        // The floor protects against bad planning estimates, not real audio
        let s = scene(0.0, 10.0);
        assert!((reconciled_duration(Some(1.2), &s) - 1.2).abs() < 1e-9);
    }
}
