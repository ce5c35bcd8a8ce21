//! Legend widget for the two day states

use activity_heatmap::HeatmapStyle;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::tui::theme::{to_color, Theme};

/// Legend widget: "Inactive ██  Active ██", right-aligned
pub struct Legend<'a> {
    style: &'a HeatmapStyle,
    theme: Theme,
}

impl<'a> Legend<'a> {
    pub fn new(style: &'a HeatmapStyle, theme: Theme) -> Self {
        Self { style, theme }
    }

    /// Returns the minimum width needed to render the legend
    pub fn min_width() -> u16 {
        // "Inactive ██  Active ██" = 22 chars
        22
    }
}

impl Widget for Legend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < Self::min_width() || area.height == 0 {
            return;
        }

        let label_style = Style::default().fg(self.theme.muted());
        let mut x = area.x + area.width - Self::min_width();
        let y = area.y;

        buf.set_string(x, y, "Inactive ", label_style);
        x += 9;
        buf.set_string(x, y, "██", Style::default().fg(to_color(self.style.disabled)));
        x += 2;
        buf.set_string(x, y, "  Active ", label_style);
        x += 9;
        buf.set_string(x, y, "██", Style::default().fg(to_color(self.style.enabled)));
    }
}
