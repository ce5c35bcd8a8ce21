//! GitHub-style activity heatmap: a 52-week calendar window of day cells,
//! laid out on a fixed-width grid and turned into draw primitives.

pub mod calendar;
pub mod config;
pub mod heatmap;
pub mod render;
pub mod types;

pub use calendar::{ActivityCalendar, CalendarDay, DateWindow};
pub use config::Config;
pub use heatmap::ActivityHeatmap;
pub use render::{Canvas, FixedMetrics, HeatmapStyle, MonthLabelStrategy, SurfaceMetrics};
pub use types::{HeatmapError, Primitive, Result, Rgb, TextBounds};
