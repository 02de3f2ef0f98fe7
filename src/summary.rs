use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;

const WEEKDAY_LABELS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHours {
    pub day: String,
    pub hours: f64,
}

/// Chart input: labels and values in matching order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoursSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Pure projection of a daily-hours list into a chart series. Input order is
/// preserved; nothing is aggregated here.
pub fn build_series(daily_hours: &[DailyHours]) -> HoursSeries {
    HoursSeries {
        labels: daily_hours.iter().map(|entry| entry.day.clone()).collect(),
        values: daily_hours.iter().map(|entry| entry.hours).collect(),
    }
}

/// Fixed reference week shown while the ledger has no history of its own.
pub fn reference_week() -> Vec<DailyHours> {
    let hours = [8.0, 7.5, 8.2, 6.0, 8.0, 0.0, 0.0];
    WEEKDAY_LABELS
        .iter()
        .zip(hours)
        .map(|(day, hours)| DailyHours {
            day: (*day).to_string(),
            hours,
        })
        .collect()
}

/// Groups reconstructed sessions by local calendar day for the seven days
/// starting at `week_start` (a Monday). Sessions crossing midnight contribute
/// to every day they touch.
pub fn week_hours(ledger: &Ledger, week_start: NaiveDate, now: DateTime<Local>) -> Vec<DailyHours> {
    let mut totals = [Duration::zero(); 7];

    for session in ledger.sessions(now) {
        let start = session.start.naive_local();
        let end = session.end.naive_local();
        if end <= start {
            continue;
        }

        for (offset, total) in totals.iter_mut().enumerate() {
            let day = week_start + Duration::days(offset as i64);
            let day_start = day.and_hms_opt(0, 0, 0).expect("midnight must be valid");
            let day_end = day_start + Duration::days(1);

            let slice_start = if start > day_start { start } else { day_start };
            let slice_end = if end < day_end { end } else { day_end };
            if slice_end > slice_start {
                *total += slice_end - slice_start;
            }
        }
    }

    totals
        .iter()
        .enumerate()
        .map(|(offset, total)| DailyHours {
            day: WEEKDAY_LABELS[offset].to_string(),
            hours: total.num_seconds() as f64 / 3600.0,
        })
        .collect()
}

pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let days_from_monday = day.weekday().num_days_from_monday() as i64;
    day - Duration::days(days_from_monday)
}
