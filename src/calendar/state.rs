//! Per-day activity flags over a [`DateWindow`]

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::window::{CalendarDay, DateWindow};

/// A date window plus one boolean per day in it (index 0 = `start`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCalendar {
    window: DateWindow,
    days: Vec<bool>,
}

impl ActivityCalendar {
    /// Window ending on `today`, every day inactive
    pub fn new(today: NaiveDate) -> Self {
        let window = DateWindow::new(today);
        Self {
            days: vec![false; window.day_count()],
            window,
        }
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn start(&self) -> NaiveDate {
        self.window.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.window.end()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Read-only view of the day flags
    pub fn days(&self) -> &[bool] {
        &self.days
    }

    pub fn is_active_at(&self, index: usize) -> bool {
        self.days.get(index).copied().unwrap_or(false)
    }

    /// `false` for dates outside the window
    pub fn is_active(&self, date: impl CalendarDay) -> bool {
        self.index_for(&date)
            .map(|index| self.days[index])
            .unwrap_or(false)
    }

    pub fn active_count(&self) -> usize {
        self.days.iter().filter(|&&active| active).count()
    }

    /// Marks the day containing `date` as active or inactive.
    ///
    /// Returns `false` without touching anything when the date is absent
    /// or falls outside `[start, end]`.
    pub fn set_active(&mut self, date: impl CalendarDay, active: bool) -> bool {
        match self.index_for(&date) {
            Some(index) => {
                self.days[index] = active;
                trace!(index, active, "day updated");
                true
            }
            None => false,
        }
    }

    /// Flips the day containing `date`; same validation as [`Self::set_active`]
    pub fn toggle(&mut self, date: impl CalendarDay) -> bool {
        match self.index_for(&date) {
            Some(index) => {
                self.days[index] = !self.days[index];
                true
            }
            None => false,
        }
    }

    fn index_for(&self, date: &impl CalendarDay) -> Option<usize> {
        let Some(day) = date.calendar_day() else {
            debug!("rejected absent date");
            return None;
        };
        let index = self.window.index_of(day);
        if index.is_none() {
            debug!(%day, start = %self.start(), end = %self.end(), "rejected date outside window");
        }
        index
    }
}
