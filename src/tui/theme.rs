//! Terminal theme detection and color definitions

use activity_heatmap::{HeatmapStyle, Rgb};
use ratatui::style::Color;

/// Convert a heatmap color to a terminal color
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selection, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, hints)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Date text color
    pub fn date(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Heatmap defaults matching this background; config keys override them
    pub fn heatmap_style(self) -> HeatmapStyle {
        match self {
            Self::Dark => HeatmapStyle {
                enabled: Rgb::new(57, 211, 83),
                disabled: Rgb::new(22, 27, 34),
                text: Rgb::new(139, 148, 158),
                ..HeatmapStyle::default()
            },
            Self::Light => HeatmapStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.date(), Color::Yellow);
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.date(), Color::Indexed(130));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_heatmap_style_per_theme() {
        assert_eq!(Theme::Light.heatmap_style(), HeatmapStyle::default());
        let dark = Theme::Dark.heatmap_style();
        assert_eq!(dark.disabled, Rgb::new(22, 27, 34));
        assert_eq!(dark.text_size_sp, 14.0);
    }

    #[test]
    fn test_to_color() {
        assert_eq!(to_color(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}
