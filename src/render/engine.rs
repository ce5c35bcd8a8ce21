//! One render pass: calendar state + width -> ordered draw primitives

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::labels::{label_x, month_week_index, remove_overlapping_labels};
use super::layout::CellGeometry;
use super::surface::SurfaceMetrics;
use crate::calendar::{ActivityCalendar, DAYS_PER_WEEK, WEEKS};
use crate::types::{Primitive, Rgb};

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How month labels are chosen above the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MonthLabelStrategy {
    /// Label every other first-of-month, at the column where it falls
    #[default]
    Alternating,
    /// Label every first-of-month, at the column where it falls
    EveryMonth,
    /// Label months centered in their columns, thinned until none overlap
    Spaced,
}

/// Colors, text size and month names, fixed at construction
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapStyle {
    pub enabled: Rgb,
    pub disabled: Rgb,
    pub text: Rgb,
    /// Label size in scale-independent pixels
    pub text_size_sp: f64,
    pub month_names: [String; 12],
    pub labels: MonthLabelStrategy,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            enabled: Rgb::new(65, 216, 60),
            disabled: Rgb::new(236, 236, 236),
            text: Rgb::new(88, 96, 105),
            text_size_sp: 14.0,
            month_names: MONTH_ABBREVIATIONS.map(String::from),
            labels: MonthLabelStrategy::default(),
        }
    }
}

impl HeatmapStyle {
    /// Name for `month0` (0 = January); out-of-range values fall back to January
    pub fn month_name(&self, month0: usize) -> &str {
        self.month_names
            .get(month0)
            .unwrap_or(&self.month_names[0])
    }

    fn fill(&self, active: bool) -> Rgb {
        if active {
            self.enabled
        } else {
            self.disabled
        }
    }
}

/// Pending suppression of month labels within a single pass.
/// 0: the next first-of-month gets a label; 1: it is skipped.
#[derive(Debug, Default)]
struct MonthLabelState {
    next_month_in: u8,
}

impl MonthLabelState {
    /// Called on each first-of-month; whether to emit its label
    fn admit(&mut self, strategy: MonthLabelStrategy) -> bool {
        match strategy {
            MonthLabelStrategy::EveryMonth => true,
            MonthLabelStrategy::Spaced => false,
            MonthLabelStrategy::Alternating => {
                if self.next_month_in == 0 {
                    self.next_month_in = 1;
                    true
                } else {
                    self.next_month_in -= 1;
                    false
                }
            }
        }
    }
}

/// Produces the draw primitives for one frame at `width` pixels.
///
/// Rectangles come out in day-index order (the k-th rectangle is day k),
/// so the output holds exactly `calendar.day_count()` rectangles. Nothing
/// carries over between calls.
pub fn render(
    width: u32,
    calendar: &ActivityCalendar,
    style: &HeatmapStyle,
    metrics: &dyn SurfaceMetrics,
) -> Vec<Primitive> {
    let text_size = metrics.sp(style.text_size_sp);
    let geometry = CellGeometry::new(width, metrics, text_size);
    let mut primitives = Vec::with_capacity(calendar.day_count() + 13);

    if style.labels == MonthLabelStrategy::Spaced {
        spaced_labels(calendar, style, metrics, &geometry, text_size, &mut primitives);
    }

    let mut labels = MonthLabelState::default();
    let window = calendar.window();
    let final_week = window.days_in_final_week();

    'weeks: for week in 0..WEEKS {
        let rows = if week == WEEKS - 1 {
            final_week
        } else {
            DAYS_PER_WEEK
        };

        for day in 0..rows {
            let index = week * DAYS_PER_WEEK + day;
            let Some(date) = window.date_at(index) else {
                break 'weeks;
            };
            let (pos_x, pos_y) = geometry.cell_origin(week, day);

            if date.day() == 1 && labels.admit(style.labels) {
                primitives.push(Primitive::Text {
                    text: style.month_name(date.month0() as usize).to_string(),
                    x: pos_x,
                    y: geometry.label_baseline(),
                    color: style.text,
                    size: text_size,
                });
            }

            primitives.push(Primitive::Rect {
                x0: pos_x,
                y0: pos_y,
                x1: pos_x + geometry.item_size,
                y1: pos_y + geometry.item_size,
                color: style.fill(calendar.is_active_at(index)),
            });
        }
    }

    debug!(
        width,
        primitives = primitives.len(),
        labels = primitives.iter().filter(|p| p.is_text()).count(),
        "render pass"
    );
    primitives
}

fn spaced_labels(
    calendar: &ActivityCalendar,
    style: &HeatmapStyle,
    metrics: &dyn SurfaceMetrics,
    geometry: &CellGeometry,
    text_size: f64,
    primitives: &mut Vec<Primitive>,
) {
    let index = match month_week_index(calendar.start(), calendar.end()) {
        Ok(index) => index,
        Err(err) => {
            warn!(%err, "skipping month labels");
            return;
        }
    };
    let label_width = |month0: usize| {
        f64::from(metrics.text_bounds(style.month_name(month0), text_size).width())
    };

    for start in remove_overlapping_labels(&index, geometry.pitch(), &label_width) {
        let name = style.month_name(start.month0);
        primitives.push(Primitive::Text {
            text: name.to_string(),
            x: label_x(start, geometry.pitch(), label_width(start.month0)),
            y: geometry.label_baseline(),
            color: style.text,
            size: text_size,
        });
    }
}
