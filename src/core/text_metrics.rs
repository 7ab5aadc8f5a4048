use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AxisLayoutError, AxisLayoutResult};

/// Font description used for label measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size_px: 9.0,
            bold: false,
            italic: false,
        }
    }
}

impl Font {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            bold: false,
            italic: false,
        }
    }

    /// Parses a CSS-like shorthand such as `"bold 12px sans-serif"`.
    pub fn parse(input: &str) -> AxisLayoutResult<Self> {
        let mut font = Self {
            family: String::new(),
            size_px: 0.0,
            bold: false,
            italic: false,
        };
        let mut family_parts = Vec::new();
        let mut size_seen = false;
        for token in input.split_whitespace() {
            if size_seen {
                family_parts.push(token);
                continue;
            }
            match token {
                "bold" | "bolder" => font.bold = true,
                "italic" | "oblique" => font.italic = true,
                "normal" => {}
                _ => {
                    // `12px/1.5` carries a line height we do not use.
                    let size_token = token.split('/').next().unwrap_or(token);
                    let size = size_token.strip_suffix("px").ok_or_else(|| {
                        AxisLayoutError::InvalidConfig(format!(
                            "font `{input}` has no pixel size before the family"
                        ))
                    })?;
                    font.size_px = size.parse::<f64>().map_err(|e| {
                        AxisLayoutError::InvalidConfig(format!("font size `{token}`: {e}"))
                    })?;
                    size_seen = true;
                }
            }
        }
        if !size_seen || !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(AxisLayoutError::InvalidConfig(format!(
                "font `{input}` must declare a positive pixel size"
            )));
        }
        font.family = if family_parts.is_empty() {
            "sans-serif".to_owned()
        } else {
            family_parts.join(" ")
        };
        Ok(font)
    }
}

impl FromStr for Font {
    type Err = AxisLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Text measurement backend consumed by axis layout.
///
/// Implementations must be pure: the same text and font always measure the
/// same, which is what makes layout passes repeatable.
/// Share of the font height that label boxes reserve for glyphs.
pub const TEXT_HEIGHT_RATIO: f64 = 2.0 / 3.0;

pub trait TextMeasurer {
    fn measure_width(&self, text: &str, font: &Font) -> f64;

    fn font_height(&self, font: &Font) -> f64;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_width(&self, text: &str, font: &Font) -> f64 {
        (**self).measure_width(text, font)
    }

    fn font_height(&self, font: &Font) -> f64 {
        (**self).font_height(font)
    }
}

/// Deterministic, backend-independent width estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_width(&self, text: &str, font: &Font) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'i' | 'l' | 'j' | 'I' | '|' => 0.28,
                'm' | 'w' | 'M' | 'W' => 0.86,
                _ => 0.58,
            }
        });
        let bold_factor = if font.bold { 1.08 } else { 1.0 };
        units * font.size_px * bold_factor
    }

    fn font_height(&self, font: &Font) -> f64 {
        font.size_px
    }
}
