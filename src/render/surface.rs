//! Collaborator interfaces of the drawing surface

use crate::types::{Primitive, Rgb, TextBounds};

/// Measurement and density conversion supplied by the host surface
pub trait SurfaceMetrics {
    /// Pixel bounding box of `text` drawn at `size` pixels
    fn text_bounds(&self, text: &str, size: f64) -> TextBounds;

    /// Density-independent pixels to device pixels
    fn dp(&self, value: f64) -> f64;

    /// Scale-independent pixels (font sizes) to device pixels
    fn sp(&self, value: f64) -> f64;
}

/// Target that consumes draw primitives
pub trait Canvas {
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb);

    fn draw_text(&mut self, text: &str, x: f64, y: f64, color: Rgb, size: f64);
}

/// Feed a render pass to a canvas, in order
pub fn replay(primitives: &[Primitive], canvas: &mut impl Canvas) {
    for primitive in primitives {
        match primitive {
            Primitive::Rect {
                x0,
                y0,
                x1,
                y1,
                color,
            } => canvas.fill_rect(*x0, *y0, *x1, *y1, *color),
            Primitive::Text {
                text,
                x,
                y,
                color,
                size,
            } => canvas.draw_text(text, *x, *y, *color, *size),
        }
    }
}

/// Glyphs that reach below the baseline
const DESCENDERS: &[char] = &['g', 'j', 'p', 'q', 'y'];

/// Density-scaled metrics with a fixed glyph box.
///
/// Ascent is 76% and descent 24% of the text size; every glyph advances
/// 55% of the text size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub density: f64,
    pub scaled_density: f64,
}

impl FixedMetrics {
    pub fn new(density: f64, scaled_density: f64) -> Self {
        Self {
            density,
            scaled_density,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl SurfaceMetrics for FixedMetrics {
    fn text_bounds(&self, text: &str, size: f64) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        let descends = text.chars().any(|c| DESCENDERS.contains(&c));
        TextBounds {
            left: 0,
            top: -(size * 0.76).round() as i32,
            right: (size * 0.55 * text.chars().count() as f64).round() as i32,
            bottom: if descends {
                (size * 0.24).round() as i32
            } else {
                0
            },
        }
    }

    fn dp(&self, value: f64) -> f64 {
        value * self.density
    }

    fn sp(&self, value: f64) -> f64 {
        value * self.scaled_density
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCanvas {
        calls: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, x0: f64, y0: f64, _x1: f64, _y1: f64, _color: Rgb) {
            self.calls.push(format!("rect@{},{}", x0, y0));
        }

        fn draw_text(&mut self, text: &str, x: f64, y: f64, _color: Rgb, _size: f64) {
            self.calls.push(format!("{}@{},{}", text, x, y));
        }
    }

    #[test]
    fn test_fixed_metrics_header_sample_height() {
        let metrics = FixedMetrics::default();
        let bounds = metrics.text_bounds("Ttpqyjg", 14.0);
        assert_eq!(bounds.top, -11);
        assert_eq!(bounds.bottom, 3);
        assert_eq!(bounds.height(), 14);
    }

    #[test]
    fn test_fixed_metrics_no_descenders() {
        let bounds = FixedMetrics::default().text_bounds("Mar", 20.0);
        assert_eq!(bounds.bottom, 0);
        assert_eq!(bounds.width(), 33);
    }

    #[test]
    fn test_fixed_metrics_empty_text() {
        assert_eq!(
            FixedMetrics::default().text_bounds("", 14.0),
            TextBounds::default()
        );
    }

    #[test]
    fn test_fixed_metrics_density() {
        let metrics = FixedMetrics::new(2.0, 3.0);
        assert_eq!(metrics.dp(6.0), 12.0);
        assert_eq!(metrics.sp(14.0), 42.0);
    }

    #[test]
    fn test_replay_preserves_order() {
        let primitives = vec![
            Primitive::Text {
                text: "Jan".into(),
                x: 0.0,
                y: 5.0,
                color: Rgb::new(0, 0, 0),
                size: 14.0,
            },
            Primitive::Rect {
                x0: 1.0,
                y0: 2.0,
                x1: 3.0,
                y1: 4.0,
                color: Rgb::new(0, 0, 0),
            },
        ];
        let mut canvas = RecordingCanvas::default();
        replay(&primitives, &mut canvas);
        assert_eq!(canvas.calls, vec!["Jan@0,5", "rect@1,2"]);
    }
}
