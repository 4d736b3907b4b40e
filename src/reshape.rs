//! Wide station-month rows to narrow station-day observations.

use chrono::NaiveDate;

use crate::{
    config::CalendarPolicy,
    reading::{DaySlot, ObservationRecord, StationMonthRecord},
};

/// Expands each row into one observation per present numeric day slot.
///
/// Missing and non-numeric slots are dropped, never kept as zero. Under
/// [`CalendarPolicy::Lenient`] a value on an impossible date such as 31 February is
/// kept as a real observation; only the sentinel marks a slot as empty.
pub fn melt(records: &[StationMonthRecord], calendar: CalendarPolicy) -> Vec<ObservationRecord> {
    records
        .iter()
        .flat_map(|r| {
            r.days().filter_map(move |(day, slot)| match slot {
                DaySlot::Value(v) if is_allowed_day(r.year, r.month, day, calendar) => {
                    Some(ObservationRecord {
                        station_id: r.station_id,
                        year: r.year,
                        month: r.month,
                        day,
                        precipitation: *v,
                    })
                }
                _ => None,
            })
        })
        .collect()
}

fn is_allowed_day(year: i32, month: u32, day: u32, calendar: CalendarPolicy) -> bool {
    match calendar {
        CalendarPolicy::Lenient => true,
        CalendarPolicy::Strict => NaiveDate::from_ymd_opt(year, month, day).is_some(),
    }
}
