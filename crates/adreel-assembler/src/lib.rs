//! Storyboard-to-video assembly.
//!
//! Takes a validated storyboard plus an assemble request and produces one
//! vertical H.264/AAC video: narration per scene, an optional ducked music
//! bed, one resolved image per scene, and a concat-encoded sequence. The
//! generation backend (remote pro mode or local free mode) is selected once
//! at startup and handed in as a capability object.

pub mod config;
pub mod error;
pub mod exports;
pub mod logging;
pub mod pipeline;
pub mod reconcile;
pub mod visuals;

pub use config::AssemblerConfig;
pub use error::{AssembleError, AssembleResult, ErrorPayload};
pub use exports::ExportSink;
pub use logging::RunLogger;
pub use pipeline::{cancellation_pair, AssembleRequest, VideoAssembler};
pub use reconcile::reconciled_duration;
