//! Calendar window: the rolling 52-week date range and its per-day activity flags

mod state;
mod window;

pub use state::ActivityCalendar;
pub use window::{days_between, iso_weekday, CalendarDay, DateWindow, DAYS_PER_WEEK, WEEKS};
