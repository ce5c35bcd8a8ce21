//! Grid layout and render engine

mod engine;
mod labels;
mod layout;
mod surface;

pub use engine::{render, HeatmapStyle, MonthLabelStrategy, MONTH_ABBREVIATIONS};
pub use labels::{month_week_index, remove_overlapping_labels, MonthStart};
pub use layout::{
    split_width, CellGeometry, HEADER_PADDING_DP, HEADER_PROBE, ITEMS_SHARE_TENTHS,
};
pub use surface::{replay, Canvas, FixedMetrics, SurfaceMetrics};
