//! Width-driven geometry of the 52 x 7 grid

use super::surface::SurfaceMetrics;
use crate::calendar::{DAYS_PER_WEEK, WEEKS};

/// Tenths of the width given to cells; the rest goes to the gaps between them
pub const ITEMS_SHARE_TENTHS: u64 = 7;
/// Sample covering the label font's ascender and descender extremes
pub const HEADER_PROBE: &str = "Ttpqyjg";
/// Gap between the month labels' baseline and the first row
pub const HEADER_PADDING_DP: f64 = 6.0;

/// Cell edge and gap size for a given pixel width.
///
/// The integer part of 70% of the width is shared by the 52 cells, the
/// remainder by the 51 gaps. A zero width yields zero sizes.
pub fn split_width(width: u32) -> (f64, f64) {
    // Floor in integers; 700.0 * 0.7 is 489.99999999999994 in f64
    let items_width = u64::from(width) * ITEMS_SHARE_TENTHS / 10;
    let spaces_width = u64::from(width) - items_width;
    let item_size = items_width as f64 / WEEKS as f64;
    let space_size = spaces_width as f64 / (WEEKS - 1) as f64;
    (item_size, space_size)
}

/// Geometry of one render pass, derived from the current width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub width: u32,
    /// Edge length of a (square) day cell
    pub item_size: f64,
    /// Gap between adjacent cells, both directions
    pub space_size: f64,
    /// Label padding in device pixels (whole pixels)
    pub padding: f64,
    /// Space reserved above row 0 for month labels
    pub header_height: f64,
}

impl CellGeometry {
    pub fn new(width: u32, metrics: &dyn SurfaceMetrics, text_size: f64) -> Self {
        let (item_size, space_size) = split_width(width);
        let padding = metrics.dp(HEADER_PADDING_DP).trunc();
        let probe = metrics.text_bounds(HEADER_PROBE, text_size);
        Self {
            width,
            item_size,
            space_size,
            padding,
            header_height: f64::from(probe.height()) + padding,
        }
    }

    /// Distance between the origins of neighbouring cells
    pub fn pitch(&self) -> f64 {
        self.item_size + self.space_size
    }

    /// Height of the seven rows and six gaps, header excluded
    pub fn grid_height(&self) -> f64 {
        DAYS_PER_WEEK as f64 * self.item_size + (DAYS_PER_WEEK - 1) as f64 * self.space_size
    }

    /// `(width, height)` the grid wants; height follows from width
    pub fn preferred_size(&self) -> (u32, u32) {
        let height = self.grid_height().floor() + self.header_height;
        (self.width, height.max(0.0) as u32)
    }

    /// Top-left pixel of the cell in `week`-column, `day`-row
    pub fn cell_origin(&self, week: usize, day: usize) -> (f64, f64) {
        (
            week as f64 * self.pitch(),
            self.header_height + day as f64 * self.pitch(),
        )
    }

    /// Baseline for month label text
    pub fn label_baseline(&self) -> f64 {
        self.header_height - self.padding
    }
}
