//! Visual resolution: one image per scene.
//!
//! Caller-provided images (e.g. scraped product photos) are reused
//! cyclically across scenes; fewer images than scenes is a deliberate
//! policy, not an error. Without provided images, each scene's prompt
//! drives one backend generation call.

use std::path::PathBuf;

use tracing::debug;

use adreel_backend::MediaBackend;
use adreel_models::{BrandColor, Canvas, Scene};

use crate::error::AssembleResult;
use crate::exports::ExportSink;

/// Prompt driving a scene's image when no provided image covers it.
///
/// Falls back from the spoken line to the visual query to a generic
/// product prompt, so generation never receives an empty string.
pub fn scene_prompt(scene: &Scene) -> &str {
    let text = scene.text.trim();
    if !text.is_empty() {
        return text;
    }
    let query = scene.visual.query.trim();
    if !query.is_empty() {
        return query;
    }
    "product hero"
}

/// Cycle provided images across scenes: scene `i` gets `provided[i % N]`.
pub fn cycle_provided(provided: &[PathBuf], scene_count: usize) -> Vec<PathBuf> {
    (0..scene_count)
        .map(|i| provided[i % provided.len()].clone())
        .collect()
}

/// Resolve one image per scene, same order and length as `scenes`.
pub async fn resolve_scene_images(
    scenes: &[Scene],
    provided: &[PathBuf],
    backend: &dyn MediaBackend,
    color: BrandColor,
    canvas: &Canvas,
    sink: &ExportSink,
) -> AssembleResult<Vec<PathBuf>> {
    let existing: Vec<PathBuf> = provided.iter().filter(|p| p.exists()).cloned().collect();

    if !existing.is_empty() {
        debug!(
            provided = existing.len(),
            scenes = scenes.len(),
            "Reusing provided images cyclically"
        );
        return Ok(cycle_provided(&existing, scenes.len()));
    }

    let mut images = Vec::with_capacity(scenes.len());
    for (index, scene) in scenes.iter().enumerate() {
        let out = backend
            .generate_image(
                scene_prompt(scene),
                color,
                canvas,
                &sink.scene_image_stem(index),
            )
            .await?;
        images.push(out);
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_reuses_images_in_order() {
        let provided = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
        let resolved = cycle_provided(&provided, 5);
        assert_eq!(
            resolved,
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("a.png"),
            ]
        );
    }

    #[test]
    fn test_scene_prompt_fallback_order() {
        let mut scene = Scene {
            text: "Buy now".to_string(),
            ..Default::default()
        };
        scene.visual.query = "hands-on demo".to_string();
        assert_eq!(scene_prompt(&scene), "Buy now");

        scene.text = "  ".to_string();
        assert_eq!(scene_prompt(&scene), "hands-on demo");

        scene.visual.query.clear();
        assert_eq!(scene_prompt(&scene), "product hero");
    }
}
