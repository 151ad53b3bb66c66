//! Storyboard and scene documents.
//!
//! The storyboard is the canonical document driving media generation: a
//! canvas definition plus an ordered, non-empty list of timed scenes. It is
//! produced by an upstream composition step and consumed read-only by the
//! pipeline; resolved artifacts (audio clips, image paths) are carried in
//! pipeline-internal structures, never written back into this document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum scene duration derived from declared timestamps, in seconds.
///
/// Declared timestamps are a planning estimate and may be degenerate
/// (`end <= start`); the floor prevents near-zero clips.
pub const MIN_DECLARED_SCENE_SECS: f64 = 0.3;

/// Errors raised by storyboard validation, before any generation work.
#[derive(Debug, Error)]
pub enum StoryboardError {
    #[error("Storyboard must contain at least one scene")]
    NoScenes,

    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),
}

/// Output canvas shared by every scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Canvas {
    /// Width in pixels
    #[serde(alias = "w")]
    pub width: u32,
    /// Height in pixels
    #[serde(alias = "h")]
    pub height: u32,
    /// Frame rate shared by all output clips
    pub fps: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        // Vertical 9:16 at 30 fps
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
        }
    }
}

impl Canvas {
    /// Validate canvas dimensions and frame rate.
    pub fn validate(&self) -> Result<(), StoryboardError> {
        if self.width == 0 || self.height == 0 {
            return Err(StoryboardError::InvalidCanvas(format!(
                "dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(StoryboardError::InvalidCanvas(
                "fps must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Visual intent for a scene: reuse a caller-provided image when one is
/// preferred, otherwise drive generation from the query prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VisualIntent {
    /// Intent kind emitted by the storyboard composer
    /// (e.g. "image_or_stock", "stock", "endcard"). Passed through.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Preferred existing image (product photo URL/path), if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer: Option<String>,
    /// Generation/search prompt
    #[serde(default)]
    pub query: String,
}

/// Overlay directive rendered on top of the base image. The pipeline accepts
/// pre-resolved overlay content and passes it through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Overlay {
    /// Caption text overlay
    Text {
        text: String,
        #[serde(default)]
        style: String,
    },
    /// End-card background panel
    Panel {
        color: String,
        #[serde(default)]
        alpha: f64,
    },
    /// Brand logo
    Logo { url: Option<String> },
    /// Decorative shape fallback when no logo is available
    Shape { shape: String },
}

/// One timed segment of the output video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Symbolic identity ("hook", "value", "proof", "cta"). Used only for
    /// visual/overlay/transition heuristics, never for uniqueness.
    #[serde(default)]
    pub id: String,
    /// Declared start timestamp in seconds (planning estimate)
    #[serde(default)]
    pub start: f64,
    /// Declared end timestamp in seconds (planning estimate)
    #[serde(default)]
    pub end: f64,
    /// Caption/voice-over line
    #[serde(default)]
    pub text: String,
    /// Visual intent descriptor
    #[serde(default)]
    pub visual: VisualIntent,
    /// Ordered overlay directives, passed through
    #[serde(default)]
    pub overlay: Vec<Overlay>,
    /// Cosmetic sound-effect tag, passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,
    /// Cosmetic transition tag, passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_in: Option<String>,
}

impl Scene {
    /// The line handed to audio and image generation.
    ///
    /// Empty or whitespace-only text is substituted with a single-space
    /// placeholder so downstream generation never receives an empty string.
    pub fn voice_line(&self) -> &str {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            " "
        } else {
            trimmed
        }
    }

    /// Duration from the declared timestamps, floored.
    ///
    /// This is the fallback duration source; once a mixed audio clip exists
    /// for the scene, that clip's duration is authoritative instead.
    pub fn declared_duration(&self) -> f64 {
        (self.end - self.start).max(MIN_DECLARED_SCENE_SECS)
    }
}

/// Storyboard-level audio plan emitted by the composer. Carried through for
/// collaborators; the pipeline takes its mood from the assemble request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AudioPlan {
    /// Suggested music bed label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<String>,
    /// Whether the bed should be ducked under narration
    #[serde(default)]
    pub duck: bool,
    /// Concatenated voice-over text
    #[serde(default)]
    pub vo_text: String,
}

/// The scene-timed document driving media generation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Storyboard {
    /// Document schema version
    #[serde(default)]
    pub version: String,
    /// Output canvas
    #[serde(default)]
    pub canvas: Canvas,
    /// Storyboard-level audio plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioPlan>,
    /// Ordered scenes, non-empty
    pub scenes: Vec<Scene>,
}

impl Storyboard {
    /// Validate the document before any generation work begins.
    pub fn validate(&self) -> Result<(), StoryboardError> {
        if self.scenes.is_empty() {
            return Err(StoryboardError::NoScenes);
        }
        self.canvas.validate()
    }
}
