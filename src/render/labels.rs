//! Month/week index and overlap thinning for spaced month labels

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::{HeatmapError, Result};

/// First week-column in which a month appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthStart {
    /// 0 = January ... 11 = December
    pub month0: usize,
    pub week: usize,
}

/// Maps each month in `[first, last]` to the week-column where it first shows up.
///
/// `first` must be a Monday and not after `last`. The first entry is always
/// `first`'s own month at week 0.
pub fn month_week_index(first: NaiveDate, last: NaiveDate) -> Result<Vec<MonthStart>> {
    if first.weekday() != Weekday::Mon {
        return Err(HeatmapError::NotMonday(first));
    }
    if first > last {
        return Err(HeatmapError::RangeReversed {
            start: first,
            end: last,
        });
    }

    let mut index = vec![MonthStart {
        month0: first.month0() as usize,
        week: 0,
    }];
    let mut week = 0;
    for day in first.iter_days().take_while(|day| *day <= last) {
        if day.weekday() == Weekday::Mon && day != first {
            week += 1;
        }
        let month0 = day.month0() as usize;
        if index.last().is_some_and(|m| m.month0 != month0) {
            index.push(MonthStart { month0, week });
        }
    }
    Ok(index)
}

/// Drops month labels that would collide.
///
/// The first and last entries are removed (they may be cut off), then every
/// x-th remaining label is kept, with x the smallest step for which no
/// label starts at or before the end of the previous one. Each label is
/// centered on `(week + 2) * pitch`. If no step avoids every overlap, the
/// sparsest tried thinning is returned.
pub fn remove_overlapping_labels(
    index: &[MonthStart],
    pitch: f64,
    label_width: impl Fn(usize) -> f64,
) -> Vec<MonthStart> {
    if index.len() <= 2 {
        return Vec::new();
    }
    let inner = &index[1..index.len() - 1];
    let mut kept = inner.to_vec();

    let mut step = 1;
    while step < index.len() - 2 {
        if !overlaps(&kept, pitch, &label_width) {
            break;
        }
        step += 1;
        kept = inner.iter().step_by(step).copied().collect();
    }
    kept
}

/// Left edge of a label centered two columns into its month
pub(crate) fn label_x(start: MonthStart, pitch: f64, width: f64) -> f64 {
    (start.week + 2) as f64 * pitch - width / 2.0
}

fn overlaps(labels: &[MonthStart], pitch: f64, label_width: &impl Fn(usize) -> f64) -> bool {
    let mut previous_end = 0.0;
    for &label in labels {
        let width = label_width(label.month0);
        let x = label_x(label, pitch, width);
        if x <= previous_end {
            return true;
        }
        previous_end = x + width;
    }
    false
}
