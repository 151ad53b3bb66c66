//! Music mood labels.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Music bed moods available in the asset catalog.
///
/// Mood labels arrive as free text from the caller; unknown labels fall
/// back to [`MusicMood::Upbeat`] rather than erroring, since the bed is a
/// cosmetic asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MusicMood {
    Upbeat,
    Chill,
    Corporate,
    Energetic,
}

impl MusicMood {
    /// All catalog moods.
    pub const ALL: &'static [MusicMood] = &[
        MusicMood::Upbeat,
        MusicMood::Chill,
        MusicMood::Corporate,
        MusicMood::Energetic,
    ];

    /// The mood name as used in asset filenames (`music_<name>.mp3`).
    pub fn as_filename_part(&self) -> &'static str {
        match self {
            MusicMood::Upbeat => "upbeat",
            MusicMood::Chill => "chill",
            MusicMood::Corporate => "corporate",
            MusicMood::Energetic => "energetic",
        }
    }

    /// Parse a free-text label, falling back to the default mood.
    pub fn from_label(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.trim().to_lowercase().parse().ok())
            .unwrap_or_default()
    }
}

impl Default for MusicMood {
    fn default() -> Self {
        MusicMood::Upbeat
    }
}

impl fmt::Display for MusicMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filename_part())
    }
}

impl FromStr for MusicMood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upbeat" => Ok(MusicMood::Upbeat),
            "chill" => Ok(MusicMood::Chill),
            "corporate" => Ok(MusicMood::Corporate),
            "energetic" => Ok(MusicMood::Energetic),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_known() {
        assert_eq!(MusicMood::from_label(Some("chill")), MusicMood::Chill);
        assert_eq!(MusicMood::from_label(Some(" Energetic ")), MusicMood::Energetic);
    }

    #[test]
    fn test_from_label_unknown_falls_back() {
        assert_eq!(MusicMood::from_label(Some("dubstep")), MusicMood::Upbeat);
        assert_eq!(MusicMood::from_label(None), MusicMood::Upbeat);
    }
}
