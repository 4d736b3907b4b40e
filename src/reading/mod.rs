//! Station-month rows as read from disk, and the per-day observations they expand to.

pub mod observation;
pub mod station_month;

pub use observation::ObservationRecord;
pub use station_month::{DaySlot, StationMonthRecord};

/// Value used in the source files for "no observation".
pub const SENTINEL: f64 = -999.0;

/// Day slots per row, whatever the length of the month.
pub const DAYS_PER_RECORD: usize = 31;

/// `id year month day_1 .. day_31`
pub const COLUMN_COUNT: usize = 3 + DAYS_PER_RECORD;

/// Column names in file order.
pub fn column_names() -> Vec<String> {
    let mut names = vec!["id".to_string(), "year".to_string(), "month".to_string()];
    names.extend((1..=DAYS_PER_RECORD).map(|day| format!("day_{}", day)));

    names
}
