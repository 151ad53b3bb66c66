//! Assembler configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Assembler configuration, fixed at startup.
///
/// The generation mode derived from `openai_api_key`/`force_free_mode` is
/// decided once when the backend is selected and never re-evaluated per
/// request.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Export sink root for every intermediate and final artifact
    pub export_dir: PathBuf,
    /// Asset directory holding music beds and the bundled caption font
    pub assets_dir: PathBuf,
    /// OpenAI credential enabling pro-mode remote generation
    pub openai_api_key: Option<String>,
    /// Force local fallbacks even when credentials are present
    pub force_free_mode: bool,
    /// Explicit caption font path, tried before bundled/system fonts
    pub font_path: Option<PathBuf>,
    /// Default TTS voice
    pub voice: String,
    /// Timeout for the final encode
    pub encode_timeout: Duration,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("./exports"),
            assets_dir: PathBuf::from("./assets"),
            openai_api_key: None,
            force_free_mode: false,
            font_path: None,
            voice: "alloy".to_string(),
            encode_timeout: Duration::from_secs(600),
        }
    }
}

impl AssemblerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            export_dir: std::env::var("ADREEL_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./exports")),
            assets_dir: std::env::var("ADREEL_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./assets")),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            force_free_mode: std::env::var("ADREEL_FREE_MODE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            font_path: std::env::var("ADREEL_FONT_PATH").map(PathBuf::from).ok(),
            voice: std::env::var("ADREEL_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            encode_timeout: Duration::from_secs(
                std::env::var("ADREEL_ENCODE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
        }
    }
}
