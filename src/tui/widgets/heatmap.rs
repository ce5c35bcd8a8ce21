//! 52-week heatmap widget
//!
//! Terminal adapter for the render engine: one terminal column is one
//! device pixel horizontally, the month labels take the first row and each
//! weekday gets its own row below.

use std::ops::Range;

use activity_heatmap::render::{replay, Canvas, CellGeometry, SurfaceMetrics};
use activity_heatmap::{ActivityHeatmap, Primitive, Rgb, TextBounds};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::{to_color, Theme};

/// Symbol painted into every terminal cell covered by a day
const CELL_SYMBOL: &str = "█";
/// Symbol for the selected day
const SELECTED_SYMBOL: &str = "▓";
const LABEL_WIDTH: u16 = 4; // "Mon " prefix

/// Weekday labels, one per grid row (Monday first)
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Character-grid metrics: every glyph is one cell, padding collapses to nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalMetrics;

impl SurfaceMetrics for TerminalMetrics {
    fn text_bounds(&self, text: &str, _size: f64) -> TextBounds {
        TextBounds {
            left: 0,
            top: -1,
            right: text.chars().count() as i32,
            bottom: 0,
        }
    }

    fn dp(&self, _value: f64) -> f64 {
        0.0
    }

    fn sp(&self, _value: f64) -> f64 {
        1.0
    }
}

/// Paints pixel primitives into a ratatui buffer
pub struct TerminalCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    geometry: CellGeometry,
}

impl<'a> TerminalCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, geometry: CellGeometry) -> Self {
        Self {
            buf,
            area,
            geometry,
        }
    }

    /// Terminal row (relative to the area) of a cell starting at `y0`
    fn row_of(&self, y0: f64) -> u16 {
        let rows = (y0 - self.geometry.header_height) / self.geometry.pitch();
        1 + rows.round().max(0.0) as u16
    }

    /// Columns whose centers fall inside `[x0, x1)`; at least the column holding `x0`
    fn columns(&self, x0: f64, x1: f64) -> Range<u16> {
        let first = (x0 - 0.5).ceil().max(0.0) as u16;
        let end = (x1 - 0.5).ceil().max(0.0) as u16;
        let range = if first < end {
            first..end
        } else {
            let col = x0.floor().max(0.0) as u16;
            col..col + 1
        };
        range.start.min(self.area.width)..range.end.min(self.area.width)
    }

    fn paint(&mut self, x0: f64, y0: f64, x1: f64, symbol: &str, style: Style) {
        let row = self.row_of(y0);
        if row >= self.area.height {
            return;
        }
        for col in self.columns(x0, x1) {
            if let Some(cell) = self.buf.cell_mut((self.area.x + col, self.area.y + row)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }

    /// Repaint a day rectangle with the selection marker
    pub fn highlight(&mut self, primitive: &Primitive, style: Style) {
        if let Primitive::Rect { x0, y0, x1, .. } = primitive {
            self.paint(*x0, *y0, *x1, SELECTED_SYMBOL, style);
        }
    }
}

impl Canvas for TerminalCanvas<'_> {
    fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, _y1: f64, color: Rgb) {
        self.paint(x0, y0, x1, CELL_SYMBOL, Style::default().fg(to_color(color)));
    }

    fn draw_text(&mut self, text: &str, x: f64, _y: f64, color: Rgb, _size: f64) {
        let col = x.floor().max(0.0) as u16;
        if col >= self.area.width || self.area.height == 0 {
            return;
        }
        self.buf.set_stringn(
            self.area.x + col,
            self.area.y,
            text,
            (self.area.width - col) as usize,
            Style::default().fg(to_color(color)),
        );
    }
}

/// Heatmap widget for ratatui
pub struct HeatmapView<'a> {
    heatmap: &'a ActivityHeatmap,
    selected: Option<usize>,
    theme: Theme,
}

impl<'a> HeatmapView<'a> {
    /// Header row plus seven weekday rows
    pub const HEIGHT: u16 = 8;

    pub fn new(heatmap: &'a ActivityHeatmap, theme: Theme) -> Self {
        Self {
            heatmap,
            selected: None,
            theme,
        }
    }

    /// Mark day index `index` as selected
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    /// Narrowest width that keeps every week-column at least two cells apart
    pub fn min_width() -> u16 {
        LABEL_WIDTH + 104
    }

    /// Area left for the grid once the weekday labels are placed
    pub fn grid_area(area: Rect) -> Rect {
        let offset = LABEL_WIDTH.min(area.width);
        Rect {
            x: area.x + offset,
            y: area.y,
            width: area.width - offset,
            height: area.height.min(Self::HEIGHT),
        }
    }
}

impl Widget for HeatmapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = Self::grid_area(area);
        let label_style = Style::default().fg(self.theme.muted());
        for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
            let y = area.y + 1 + row as u16;
            if y >= area.y + grid.height || area.width < LABEL_WIDTH {
                break;
            }
            buf.set_string(area.x, y, label, label_style);
        }

        let width = u32::from(grid.width);
        let metrics = TerminalMetrics;
        let primitives = self.heatmap.render(width, &metrics);
        let geometry = self.heatmap.geometry(width, &metrics);

        let mut canvas = TerminalCanvas::new(buf, grid, geometry);
        replay(&primitives, &mut canvas);

        if let Some(index) = self.selected {
            if let Some(day) = primitives.iter().filter(|p| p.is_rect()).nth(index) {
                let style = Style::default()
                    .fg(self.theme.accent())
                    .add_modifier(Modifier::BOLD);
                canvas.highlight(day, style);
            }
        }
    }
}
