//! Ramadan calendar status against the tabulated date ranges.
//!
//! Only 2025 and 2026 are tabulated. The selection rule mirrors the table:
//! years up to and including 2025 use the 2025 range, everything later uses
//! the 2026 range. Extending the table is a data-maintenance task.

use crate::domain::RamadanInfo;
use chrono::{Datelike, NaiveDate};

struct RamadanRange {
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
}

fn tabulated(calendar_year: i32) -> RamadanRange {
    let (year, start, end) = if calendar_year <= 2025 {
        (2025, (3, 1), (3, 30))
    } else {
        (2026, (2, 19), (3, 20))
    };
    RamadanRange {
        year,
        start: NaiveDate::from_ymd_opt(year, start.0, start.1).expect("tabulated date"),
        end: NaiveDate::from_ymd_opt(year, end.0, end.1).expect("tabulated date"),
    }
}

/// Ramadan status for `today`. During Ramadan `current_day` counts from 1;
/// before it `days_left` counts down; after it neither is present.
pub fn info(today: NaiveDate) -> RamadanInfo {
    let range = tabulated(today.year());
    let is_ramadan = today >= range.start && today <= range.end;

    let mut days_left = None;
    let mut current_day = None;
    if is_ramadan {
        current_day = Some((today - range.start).num_days() + 1);
    } else if today < range.start {
        days_left = Some((range.start - today).num_days());
    }

    RamadanInfo {
        year: range.year,
        start_date: range.start,
        end_date: range.end,
        days_left,
        current_day,
        is_ramadan,
    }
}
