//! Draw primitives and colors produced by a render pass

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::HeatmapError;

/// 24-bit RGB color, serialized as `"#rrggbb"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HeatmapError::Config(format!("invalid color: {}", s)));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| HeatmapError::Config(format!("invalid color: {}", s)))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = HeatmapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Pixel bounding box of a measured string, relative to its baseline origin.
/// `top` is negative for glyphs rising above the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(self) -> i32 {
        self.right - self.left
    }

    pub fn height(self) -> i32 {
        self.bottom - self.top
    }
}

/// One drawing instruction, in pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Filled rectangle from `(x0, y0)` to `(x1, y1)`
    Rect {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Rgb,
    },
    /// Text whose baseline starts at `(x, y)`
    Text {
        text: String,
        x: f64,
        y: f64,
        color: Rgb,
        size: f64,
    },
}

impl Primitive {
    pub fn is_rect(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rect {
                x0,
                y0,
                x1,
                y1,
                color,
            } => write!(f, "rect {:.3} {:.3} {:.3} {:.3} {}", x0, y0, x1, y1, color),
            Self::Text {
                text,
                x,
                y,
                color,
                size,
            } => write!(f, "text {:.3} {:.3} {} {:.1} {}", x, y, color, size, text),
        }
    }
}
