//! Shared data models for the Adreel assembly pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Storyboards, scenes and their visual/overlay intent
//! - Brand information and music moods
//! - Run identifiers for export filename keying
//! - The render manifest returned by a successful pipeline run

pub mod brand;
pub mod manifest;
pub mod mood;
pub mod run;
pub mod storyboard;

// Re-export common types
pub use brand::{Brand, BrandColor};
pub use manifest::RenderManifest;
pub use mood::MusicMood;
pub use run::RunId;
pub use storyboard::{
    AudioPlan, Canvas, Overlay, Scene, Storyboard, StoryboardError, VisualIntent,
};
