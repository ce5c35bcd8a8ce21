//! Host-facing heatmap: calendar state plus style, rendered on demand

use chrono::NaiveDate;

use crate::calendar::{ActivityCalendar, CalendarDay};
use crate::render::{render, CellGeometry, HeatmapStyle, SurfaceMetrics};
use crate::types::Primitive;

/// A 52-week activity heatmap ending on the day it was created for
#[derive(Debug, Clone)]
pub struct ActivityHeatmap {
    calendar: ActivityCalendar,
    style: HeatmapStyle,
}

impl ActivityHeatmap {
    pub fn new(today: NaiveDate, style: HeatmapStyle) -> Self {
        Self {
            calendar: ActivityCalendar::new(today),
            style,
        }
    }

    pub fn calendar(&self) -> &ActivityCalendar {
        &self.calendar
    }

    pub fn style(&self) -> &HeatmapStyle {
        &self.style
    }

    pub fn day_count(&self) -> usize {
        self.calendar.day_count()
    }

    pub fn range_start(&self) -> NaiveDate {
        self.calendar.start()
    }

    pub fn range_end(&self) -> NaiveDate {
        self.calendar.end()
    }

    pub fn set_active(&mut self, date: impl CalendarDay, active: bool) -> bool {
        self.calendar.set_active(date, active)
    }

    pub fn toggle(&mut self, date: impl CalendarDay) -> bool {
        self.calendar.toggle(date)
    }

    /// Geometry the grid takes at `width`
    pub fn geometry(&self, width: u32, metrics: &dyn SurfaceMetrics) -> CellGeometry {
        CellGeometry::new(width, metrics, metrics.sp(self.style.text_size_sp))
    }

    pub fn preferred_size(&self, width: u32, metrics: &dyn SurfaceMetrics) -> (u32, u32) {
        self.geometry(width, metrics).preferred_size()
    }

    pub fn render(&self, width: u32, metrics: &dyn SurfaceMetrics) -> Vec<Primitive> {
        render(width, &self.calendar, &self.style, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FixedMetrics;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_initialize_scenario() {
        let heatmap = ActivityHeatmap::new(date(2024, 1, 1), HeatmapStyle::default());
        assert_eq!(heatmap.range_start(), date(2023, 1, 9));
        assert_eq!(heatmap.range_end(), date(2024, 1, 1));
        assert_eq!(heatmap.day_count(), 358);
    }

    #[test]
    fn test_range_accessors_are_copies() {
        let heatmap = ActivityHeatmap::new(date(2024, 1, 1), HeatmapStyle::default());
        let mut start = heatmap.range_start();
        start = start.succ_opt().unwrap();
        assert_ne!(start, heatmap.range_start());
    }

    #[test]
    fn test_preferred_size_height_from_width() {
        let heatmap = ActivityHeatmap::new(date(2024, 1, 1), HeatmapStyle::default());
        assert_eq!(heatmap.preferred_size(700, &FixedMetrics::default()), (700, 110));
        // Doubled density: 28px probe box + 12px padding
        assert_eq!(
            heatmap.preferred_size(700, &FixedMetrics::new(2.0, 2.0)),
            (700, 130)
        );
    }

    #[test]
    fn test_set_active_shows_in_render() {
        let mut heatmap = ActivityHeatmap::new(date(2024, 1, 1), HeatmapStyle::default());
        let end = heatmap.range_end();
        assert!(heatmap.set_active(end, true));

        let primitives = heatmap.render(700, &FixedMetrics::default());
        match primitives.iter().rev().find(|p| p.is_rect()).unwrap() {
            Primitive::Rect { color, .. } => assert_eq!(*color, heatmap.style().enabled),
            other => panic!("expected rect, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_through_facade() {
        let mut heatmap = ActivityHeatmap::new(date(2024, 1, 1), HeatmapStyle::default());
        assert!(heatmap.toggle(date(2023, 7, 4)));
        assert!(heatmap.calendar().is_active(date(2023, 7, 4)));
        assert!(!heatmap.toggle(date(2022, 7, 4)));
    }
}
