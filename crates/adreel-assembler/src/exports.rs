//! Export sink filename layout.
//!
//! Every intermediate and final artifact lands in a shared export
//! directory. Filenames are keyed by the run id plus a scene index, so
//! concurrent runs never collide and collaborators (caching, zip export)
//! can address each file independently.

use std::path::{Path, PathBuf};

use adreel_models::RunId;

/// Run-scoped view of the export directory.
#[derive(Debug, Clone)]
pub struct ExportSink {
    root: PathBuf,
    run_id: RunId,
}

impl ExportSink {
    /// Create the sink, making sure the export root exists.
    pub async fn create(root: impl AsRef<Path>, run_id: RunId) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, run_id })
    }

    /// The run this sink is keyed by.
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Extension-less stem for a scene's narration clip; the backend
    /// appends the extension of the format it produced.
    pub fn narration_stem(&self, scene_index: usize) -> PathBuf {
        self.root
            .join(format!("narration_{}_{}", self.run_id, scene_index))
    }

    /// Path for a scene's mixed narration+music WAV.
    pub fn mix_path(&self, scene_index: usize) -> PathBuf {
        self.root
            .join(format!("mix_{}_{}.wav", self.run_id, scene_index))
    }

    /// Extension-less stem for a scene's resolved image.
    pub fn scene_image_stem(&self, scene_index: usize) -> PathBuf {
        self.root
            .join(format!("scene_{}_{}", self.run_id, scene_index))
    }

    /// Working directory for per-scene encoded segments.
    pub fn segments_dir(&self) -> PathBuf {
        self.root.join(format!("segments_{}", self.run_id))
    }

    /// Path of the final encoded video.
    pub fn video_path(&self) -> PathBuf {
        self.root.join(format!("ad_{}.mp4", self.run_id))
    }

    /// Public relative URL for a sink file.
    pub fn public_url(&self, path: &Path) -> String {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        format!("/exports/{}", filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sink_creates_root_and_keys_by_run() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("exports");
        let run_id = RunId::from_string("testrun");
        let sink = ExportSink::create(&root, run_id).await.unwrap();

        assert!(root.exists());
        assert!(sink
            .narration_stem(0)
            .ends_with("narration_testrun_0"));
        assert!(sink.mix_path(2).ends_with("mix_testrun_2.wav"));
        assert!(sink.video_path().ends_with("ad_testrun.mp4"));
    }

    #[tokio::test]
    async fn test_public_url_uses_bare_filename() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ExportSink::create(dir.path(), RunId::from_string("r1"))
            .await
            .unwrap();
        assert_eq!(sink.public_url(&sink.video_path()), "/exports/ad_r1.mp4");
    }

    #[tokio::test]
    async fn test_distinct_runs_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let a = ExportSink::create(dir.path(), RunId::new()).await.unwrap();
        let b = ExportSink::create(dir.path(), RunId::new()).await.unwrap();
        assert_ne!(a.video_path(), b.video_path());
        assert_ne!(a.mix_path(0), b.mix_path(0));
    }
}
