//! Render manifest returned by a successful pipeline run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The structured result of a completed assembly run.
///
/// This is the only artifact handed back to the caller; intermediate
/// per-scene files persist in the export sink as a side effect but are not
/// part of the contract. A manifest is never produced for a failed run, so
/// `ok` is always true on the success path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderManifest {
    /// Always true; failures surface as a structured error instead
    pub ok: bool,
    /// Absolute path of the encoded video
    pub path: String,
    /// Public relative URL (`/exports/<filename>`)
    pub url: String,
    /// Bare filename in the export sink
    pub filename: String,
    /// Total output duration in seconds
    pub duration: f64,
}

impl RenderManifest {
    /// Build a manifest for an encoded output file.
    pub fn new(path: &Path, url: impl Into<String>, duration: f64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            ok: true,
            path: path.to_string_lossy().to_string(),
            url: url.into(),
            filename,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_manifest_fields() {
        let path = PathBuf::from("/exports/ad_abc123.mp4");
        let manifest = RenderManifest::new(&path, "/exports/ad_abc123.mp4", 7.2);
        assert!(manifest.ok);
        assert_eq!(manifest.filename, "ad_abc123.mp4");
        assert_eq!(manifest.path, "/exports/ad_abc123.mp4");
        assert!((manifest.duration - 7.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_manifest_serializes_flat() {
        let manifest =
            RenderManifest::new(&PathBuf::from("/tmp/ad_x.mp4"), "/exports/ad_x.mp4", 1.2);
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["filename"], "ad_x.mp4");
    }
}
