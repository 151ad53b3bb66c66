//! Local deterministic scene images.
//!
//! The free-mode visual path renders a solid brand-color background with the
//! scene caption word-wrapped and centered. Wrapping is greedy against
//! measured glyph advances; text beyond the line cap is dropped by policy so
//! it can never overflow the frame.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

use adreel_models::{BrandColor, Canvas};

/// Fraction of the canvas width available to caption lines.
pub const WRAP_WIDTH_FRACTION: f32 = 0.8;

/// Maximum caption lines; remaining text is dropped.
pub const MAX_CAPTION_LINES: usize = 6;

/// Caption font size as a fraction of canvas height.
pub const FONT_HEIGHT_FRACTION: f32 = 0.06;

/// Caption block top edge as a fraction of canvas height.
const CAPTION_TOP_FRACTION: f32 = 0.25;

/// Line advance as a multiple of the font size.
const LINE_SPACING: f32 = 1.25;

/// System font locations tried after the configured and bundled tiers.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/SFNS.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// Filename of the bundled caption font inside the assets directory.
const BUNDLED_FONT_FILENAME: &str = "Inter-SemiBold.ttf";

/// Which tier of the font fallback chain was selected.
///
/// An explicit tagged result instead of a catch-and-ignore loop, so tests
/// and logs can state exactly which tier won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResolution {
    /// Caller-configured font path
    Configured(PathBuf),
    /// Font shipped in the assets directory
    Bundled(PathBuf),
    /// Known system font
    System(PathBuf),
    /// No loadable font; slides render without text
    Missing,
}

impl FontResolution {
    /// Tier name for logging.
    pub fn tier(&self) -> &'static str {
        match self {
            FontResolution::Configured(_) => "configured",
            FontResolution::Bundled(_) => "bundled",
            FontResolution::System(_) => "system",
            FontResolution::Missing => "missing",
        }
    }
}

/// A resolved caption font.
pub struct SlideFont {
    resolution: FontResolution,
    font: Option<Font>,
}

impl SlideFont {
    /// Resolve a font by trying each tier in priority order.
    ///
    /// A tier is only selected if its file exists and parses as a font;
    /// otherwise the next tier is tried. When every tier fails the slide
    /// renderer degrades to background-only output rather than erroring.
    pub fn resolve(configured: Option<&Path>, assets_dir: Option<&Path>) -> Self {
        let mut candidates: Vec<(FontResolution, PathBuf)> = Vec::new();

        if let Some(path) = configured {
            candidates.push((FontResolution::Configured(path.to_path_buf()), path.to_path_buf()));
        }
        if let Some(dir) = assets_dir {
            let path = dir.join(BUNDLED_FONT_FILENAME);
            candidates.push((FontResolution::Bundled(path.clone()), path));
        }
        for path in SYSTEM_FONT_CANDIDATES {
            let path = PathBuf::from(path);
            candidates.push((FontResolution::System(path.clone()), path));
        }

        for (resolution, path) in candidates {
            if let Some(font) = try_load_font(&path) {
                debug!(tier = resolution.tier(), path = %path.display(), "Caption font selected");
                return Self {
                    resolution,
                    font: Some(font),
                };
            }
        }

        warn!("No caption font available, slides will render without text");
        Self {
            resolution: FontResolution::Missing,
            font: None,
        }
    }

    /// Which tier was selected.
    pub fn resolution(&self) -> &FontResolution {
        &self.resolution
    }

    /// The loaded font, absent on the `Missing` tier.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }
}

fn try_load_font(path: &Path) -> Option<Font> {
    let bytes = std::fs::read(path).ok()?;
    Font::from_bytes(bytes, FontSettings::default()).ok()
}

/// Greedily pack words into lines no wider than `max_width`.
///
/// Width measurement is injected so the policy is testable without a font.
/// Lines beyond `max_lines` are dropped, an explicit truncation policy.
pub fn wrap_words<F>(text: &str, max_width: f32, max_lines: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if lines.len() >= max_lines {
            break;
        }
        let trial = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure(&trial) <= max_width || current.is_empty() {
            current = trial;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    }

    lines
}

/// Sum of glyph advances for a line at the given pixel size.
pub fn measure_width(font: &Font, px: f32, text: &str) -> f32 {
    text.chars()
        .map(|c| font.metrics(c, px).advance_width)
        .sum()
}

/// Render a caption slide for one scene.
///
/// Solid background in the brand color; when a font is available, the text
/// is wrapped, centered and drawn in white starting a quarter of the way
/// down the canvas.
pub fn render_slide(
    text: &str,
    canvas: &Canvas,
    background: BrandColor,
    font: &SlideFont,
) -> RgbImage {
    let (w, h) = (canvas.width, canvas.height);
    let (r, g, b) = background.rgb();
    let mut img = RgbImage::from_pixel(w, h, Rgb([r, g, b]));

    let font = match font.font() {
        Some(font) => font,
        None => return img,
    };

    let px = h as f32 * FONT_HEIGHT_FRACTION;
    let max_width = w as f32 * WRAP_WIDTH_FRACTION;
    let lines = wrap_words(text.trim(), max_width, MAX_CAPTION_LINES, |s| {
        measure_width(font, px, s)
    });

    let ascent = font
        .horizontal_line_metrics(px)
        .map(|m| m.ascent)
        .unwrap_or(px * 0.8);

    let mut y = h as f32 * CAPTION_TOP_FRACTION;
    for line in &lines {
        let line_width = measure_width(font, px, line);
        let x = (w as f32 - line_width) / 2.0;
        draw_line(&mut img, font, px, line, x.max(0.0), y + ascent);
        y += px * LINE_SPACING;
    }

    img
}

/// Rasterize one line of white text with its baseline at `baseline_y`.
fn draw_line(img: &mut RgbImage, font: &Font, px: f32, line: &str, start_x: f32, baseline_y: f32) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let mut pen_x = start_x;

    for c in line.chars() {
        let (metrics, bitmap) = font.rasterize(c, px);
        let glyph_left = pen_x as i64 + metrics.xmin as i64;
        let glyph_top = baseline_y as i64 - metrics.ymin as i64 - metrics.height as i64;

        for gy in 0..metrics.height {
            for gx in 0..metrics.width {
                let coverage = bitmap[gy * metrics.width + gx];
                if coverage == 0 {
                    continue;
                }
                let x = glyph_left + gx as i64;
                let y = glyph_top + gy as i64;
                if x < 0 || y < 0 || x >= w || y >= h {
                    continue;
                }
                let pixel = img.get_pixel_mut(x as u32, y as u32);
                let alpha = coverage as f32 / 255.0;
                for channel in pixel.0.iter_mut() {
                    *channel =
                        (*channel as f32 * (1.0 - alpha) + 255.0 * alpha).round() as u8;
                }
            }
        }

        pen_x += metrics.advance_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Width model: every character is 10 units wide.
    fn char_width(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_wrap_packs_greedily() {
        // 25 units per line => two 2-char words plus separator fit ("ab cd" = 50)? no:
        // "ab" = 20, "ab cd" = 50 > 45, so one word per line at 45.
        let lines = wrap_words("ab cd ef", 45.0, 6, char_width);
        assert_eq!(lines, vec!["ab", "cd", "ef"]);

        let lines = wrap_words("ab cd ef", 50.0, 6, char_width);
        assert_eq!(lines, vec!["ab cd", "ef"]);
    }

    #[test]
    fn test_wrap_caps_lines_and_drops_overflow() {
        let lines = wrap_words("a b c d e f g h", 10.0, 4, char_width);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_wrap_oversized_word_gets_own_line() {
        // A word wider than the limit still lands on its own line instead
        // of being dropped silently.
        let lines = wrap_words("extraordinary ad", 50.0, 6, char_width);
        assert_eq!(lines[0], "extraordinary");
        assert_eq!(lines[1], "ad");
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_words("   ", 100.0, 6, char_width).is_empty());
    }

    #[test]
    fn test_resolve_invalid_configured_font_cascades() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-a-font.ttf");
        std::fs::write(&bogus, b"definitely not a font").unwrap();

        let font = SlideFont::resolve(Some(&bogus), None);
        // The bogus file must not be selected; whatever tier wins is either
        // a real system font or Missing.
        assert_ne!(
            font.resolution(),
            &FontResolution::Configured(bogus.clone())
        );
    }

    #[test]
    fn test_render_without_font_is_background_only() {
        let font = SlideFont {
            resolution: FontResolution::Missing,
            font: None,
        };
        let canvas = Canvas {
            width: 64,
            height: 64,
            fps: 30,
        };
        let img = render_slide("Hello world", &canvas, BrandColor::parse("#336699"), &font);
        assert!(img.pixels().all(|p| p.0 == [0x33, 0x66, 0x99]));
    }
}
