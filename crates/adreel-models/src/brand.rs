//! Brand information resolved once at the system boundary.
//!
//! Upstream briefs may carry brand data as a structured object (color, logo)
//! or as a bare brand name. Both shapes are modeled explicitly here so
//! rendering code never type-sniffs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Near-black default used when no usable brand color is supplied.
pub const DEFAULT_BRAND_RGB: (u8, u8, u8) = (17, 17, 17);

/// Brand information from the product brief.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Brand {
    /// Structured brand with compositing hints
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        logo_url: Option<String>,
    },
    /// Bare brand name only; compositing defaults apply
    Named(String),
}

impl Brand {
    /// Resolve the brand color, defaulting when absent or unparsable.
    pub fn color(&self) -> BrandColor {
        match self {
            Brand::Structured { color, .. } => {
                color.as_deref().map(BrandColor::parse).unwrap_or_default()
            }
            Brand::Named(_) => BrandColor::default(),
        }
    }

    /// Logo URL, if the brief carried one.
    pub fn logo_url(&self) -> Option<&str> {
        match self {
            Brand::Structured { logo_url, .. } => logo_url.as_deref(),
            Brand::Named(_) => None,
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Brand::Structured {
            color: None,
            logo_url: None,
        }
    }
}

/// An RGB brand color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BrandColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for BrandColor {
    fn default() -> Self {
        let (r, g, b) = DEFAULT_BRAND_RGB;
        Self { r, g, b }
    }
}

impl BrandColor {
    /// Parse a `#rrggbb` or `#rgb` hex string (leading `#` optional).
    ///
    /// Invalid input yields the near-black default rather than an error:
    /// a bad brand color should degrade the render, not fail the run.
    pub fn parse(hex: &str) -> Self {
        let c = hex.trim().trim_start_matches('#');
        // Byte-indexed slicing below requires single-byte characters
        if !c.is_ascii() {
            return Self::default();
        }
        match c.len() {
            6 => {
                let parsed = (
                    u8::from_str_radix(&c[0..2], 16),
                    u8::from_str_radix(&c[2..4], 16),
                    u8::from_str_radix(&c[4..6], 16),
                );
                match parsed {
                    (Ok(r), Ok(g), Ok(b)) => Self { r, g, b },
                    _ => Self::default(),
                }
            }
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&c[i..i + 1], 16)
                        .map(|v| v * 16 + v)
                };
                match (digit(0), digit(1), digit(2)) {
                    (Ok(r), Ok(g), Ok(b)) => Self { r, g, b },
                    _ => Self::default(),
                }
            }
            _ => Self::default(),
        }
    }

    /// Components as a tuple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!(BrandColor::parse("#1a2b3c").rgb(), (0x1a, 0x2b, 0x3c));
        assert_eq!(BrandColor::parse("ffffff").rgb(), (255, 255, 255));
    }

    #[test]
    fn test_parse_three_digit_hex() {
        assert_eq!(BrandColor::parse("#f0a").rgb(), (0xff, 0x00, 0xaa));
    }

    #[test]
    fn test_parse_invalid_defaults_to_near_black() {
        assert_eq!(BrandColor::parse("").rgb(), DEFAULT_BRAND_RGB);
        assert_eq!(BrandColor::parse("#12345").rgb(), DEFAULT_BRAND_RGB);
        assert_eq!(BrandColor::parse("zzzzzz").rgb(), DEFAULT_BRAND_RGB);
    }

    #[test]
    fn test_parse_multibyte_input_defaults_without_panic() {
        // "€€" is 6 bytes, "é" is 2; both must degrade, never panic
        assert_eq!(BrandColor::parse("€€").rgb(), DEFAULT_BRAND_RGB);
        assert_eq!(BrandColor::parse("#é0").rgb(), DEFAULT_BRAND_RGB);
        assert_eq!(BrandColor::parse("ＦＦ").rgb(), DEFAULT_BRAND_RGB);
    }

    #[test]
    fn test_brand_shapes_deserialize() {
        let structured: Brand =
            serde_json::from_str(r##"{"color": "#222222", "logo_url": "https://x/logo.png"}"##)
                .unwrap();
        assert_eq!(structured.color().rgb(), (0x22, 0x22, 0x22));
        assert_eq!(structured.logo_url(), Some("https://x/logo.png"));

        let named: Brand = serde_json::from_str(r#""Acme""#).unwrap();
        assert_eq!(named.color().rgb(), DEFAULT_BRAND_RGB);
        assert_eq!(named.logo_url(), None);
    }
}
