use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// One slot of a Monday-first month grid: either a leading padding cell
/// (`day` absent) or a day of the reference month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub in_month: bool,
    pub today: bool,
}

impl CalendarCell {
    fn blank() -> Self {
        Self {
            day: None,
            in_month: false,
            today: false,
        }
    }
}

/// Builds the ordered cell list for the month containing `reference`:
/// leading blanks up to the first weekday, then one cell per day. No
/// trailing padding is emitted.
pub fn month_grid(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    let first = first_day_of_month(reference);
    let leading_blanks = first.weekday().num_days_from_monday() as usize;
    let days = days_in_month(first.year(), first.month());

    let mut cells = Vec::with_capacity(leading_blanks + days as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::blank(), leading_blanks));

    for day in 1..=days {
        cells.push(CalendarCell {
            day: Some(day),
            in_month: true,
            today: today.year() == first.year()
                && today.month() == first.month()
                && today.day() == day,
        });
    }

    cells
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).expect("next year date should be valid")
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("next month date should be valid")
    };
    (first_of_next - Duration::days(1)).day()
}

pub fn first_day_of_month(day: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(day.year(), day.month(), 1).expect("first day of month must be valid")
}

pub fn shift_month(day: NaiveDate, delta: i32) -> NaiveDate {
    let mut year = day.year();
    let mut month = day.month() as i32 + delta;
    while month > 12 {
        year += 1;
        month -= 12;
    }
    while month < 1 {
        year -= 1;
        month += 12;
    }
    let month_u32 = month as u32;
    let max_day = days_in_month(year, month_u32);
    let target_day = day.day().min(max_day);
    NaiveDate::from_ymd_opt(year, month_u32, target_day).expect("shifted month date must be valid")
}
