//! Date range anchored to "today" and date <-> index arithmetic

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Weekday};
use tracing::{debug, warn};

/// Week-columns shown in the grid (51 full weeks plus the current one)
pub const WEEKS: usize = 52;
/// Rows per week-column, Monday first
pub const DAYS_PER_WEEK: usize = 7;

/// Anything that can be reduced to a calendar day (time of day dropped).
/// `None` models an absent date.
pub trait CalendarDay {
    fn calendar_day(&self) -> Option<NaiveDate>;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> Option<NaiveDate> {
        Some(self.date())
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> Option<NaiveDate> {
        Some(self.date_naive())
    }
}

impl<T: CalendarDay> CalendarDay for Option<T> {
    fn calendar_day(&self) -> Option<NaiveDate> {
        self.as_ref().and_then(CalendarDay::calendar_day)
    }
}

impl<T: CalendarDay + ?Sized> CalendarDay for &T {
    fn calendar_day(&self) -> Option<NaiveDate> {
        (**self).calendar_day()
    }
}

/// ISO weekday number: Monday = 1 ... Sunday = 7
pub fn iso_weekday(date: NaiveDate) -> usize {
    date.weekday().number_from_monday() as usize
}

/// Whole days from `a` to `b`, counted by stepping one day at a time.
/// Returns 0 unless `a < b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> usize {
    if b <= a {
        return 0;
    }
    a.iter_days().take_while(|day| *day < b).count()
}

/// The displayed date range `[start, end]`.
///
/// `end` is the day the window was built for; `start` is the Monday of the
/// week lying 51 weeks before it. The window is a snapshot and never moves
/// on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Window ending on `today`.
    ///
    /// Days too close to `NaiveDate::MIN` for 51 earlier weeks get the
    /// earliest representable window instead, which ends after `today`.
    pub fn new(today: NaiveDate) -> Self {
        let (start, end) = match Self::start_for(today) {
            Some(start) => (start, today),
            None => {
                let start = Self::earliest_start();
                let end = start
                    .checked_add_days(Days::new(((WEEKS - 1) * DAYS_PER_WEEK) as u64))
                    .unwrap_or(today);
                warn!(%today, %end, "date too early for a full window, end moved forward");
                (start, end)
            }
        };
        debug!(%start, %end, "date window computed");
        Self { start, end }
    }

    /// Monday of the week 51 weeks before `end`, if representable
    fn start_for(end: NaiveDate) -> Option<NaiveDate> {
        let shifted = end.checked_sub_days(Days::new(((WEEKS - 1) * DAYS_PER_WEEK) as u64))?;
        let offset = u64::from(shifted.weekday().num_days_from_monday());
        shifted.checked_sub_days(Days::new(offset))
    }

    /// First Monday on or after `NaiveDate::MIN`
    fn earliest_start() -> NaiveDate {
        NaiveDate::MIN
            .iter_days()
            .find(|day| day.weekday() == Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Days shown in the last (partial) week-column
    pub fn days_in_final_week(&self) -> usize {
        iso_weekday(self.end)
    }

    /// Number of days in `[start, end]`
    pub fn day_count(&self) -> usize {
        (WEEKS - 1) * DAYS_PER_WEEK + self.days_in_final_week()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Linear index of `date`, or `None` outside the window
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date).then(|| days_between(self.start, date))
    }

    /// Date at linear index `index`, or `None` past the end
    pub fn date_at(&self, index: usize) -> Option<NaiveDate> {
        if index >= self.day_count() {
            return None;
        }
        self.start.checked_add_days(Days::new(index as u64))
    }
}
