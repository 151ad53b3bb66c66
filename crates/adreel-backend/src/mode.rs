//! Generation mode selection.
//!
//! The mode is decided once at startup from credential presence plus an
//! explicit low-cost override, and is fixed for the lifetime of the
//! selected backend. Re-evaluating per request would let a mid-run
//! credential change desynchronize components of the same invocation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether remote paid generation backends or local deterministic
/// fallbacks are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Remote text-to-speech and image generation
    Pro,
    /// Local silence-and-slide fallbacks; runnable with zero external
    /// dependencies
    Free,
}

impl GenerationMode {
    /// Decide the mode from credential presence and the override flag.
    pub fn detect(has_credentials: bool, force_free: bool) -> Self {
        if force_free || !has_credentials {
            GenerationMode::Free
        } else {
            GenerationMode::Pro
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::Pro => f.write_str("pro"),
            GenerationMode::Free => f.write_str("free"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pro_requires_credentials() {
        assert_eq!(GenerationMode::detect(true, false), GenerationMode::Pro);
        assert_eq!(GenerationMode::detect(false, false), GenerationMode::Free);
    }

    #[test]
    fn test_override_forces_free_despite_credentials() {
        assert_eq!(GenerationMode::detect(true, true), GenerationMode::Free);
        assert_eq!(GenerationMode::detect(false, true), GenerationMode::Free);
    }
}
