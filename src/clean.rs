//! Sentinel handling: the missing-data report on raw rows, and sentinel replacement.

use crate::reading::{column_names, DaySlot, StationMonthRecord, DAYS_PER_RECORD, SENTINEL};

/// Returns new records with every sentinel day value marked as missing.
///
/// Must run before reshaping, otherwise `-999` would be summed as rainfall.
pub fn replace_sentinel(records: &[StationMonthRecord]) -> Vec<StationMonthRecord> {
    records
        .iter()
        .map(|r| StationMonthRecord {
            station_id: r.station_id,
            year: r.year,
            month: r.month,
            days: r
                .days
                .iter()
                .map(|slot| {
                    if slot.is_sentinel() {
                        DaySlot::Missing
                    } else {
                        slot.clone()
                    }
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMissing {
    pub column: String,
    pub sentinel_count: usize,
    pub present_count: usize,
}

impl ColumnMissing {
    /// Sentinel cells as a share of present cells. `None` when nothing is present.
    pub fn percentage(&self) -> Option<f64> {
        (self.present_count > 0)
            .then(|| self.sentinel_count as f64 / self.present_count as f64 * 100.0)
    }
}

/// Missing-data rates of raw, uncleaned records.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingReport {
    pub columns: Vec<ColumnMissing>,
    pub sentinel_slots: usize,
    pub total_slots: usize,
}

impl MissingReport {
    pub fn from_records(records: &[StationMonthRecord]) -> Self {
        let mut columns: Vec<ColumnMissing> = column_names()
            .into_iter()
            .map(|column| ColumnMissing {
                column,
                sentinel_count: 0,
                present_count: records.len(),
            })
            .collect();

        let mut sentinel_slots = 0;

        for r in records {
            for (column, value) in columns.iter_mut().zip([
                r.station_id as f64,
                r.year as f64,
                r.month as f64,
            ]) {
                if value == SENTINEL {
                    column.sentinel_count += 1;
                }
            }

            for (idx, slot) in r.days.iter().take(DAYS_PER_RECORD).enumerate() {
                let column = &mut columns[3 + idx];
                if !slot.is_present() {
                    column.present_count -= 1;
                }
                if slot.is_sentinel() {
                    column.sentinel_count += 1;
                    sentinel_slots += 1;
                }
            }
        }

        MissingReport {
            columns,
            sentinel_slots,
            total_slots: records.len() * DAYS_PER_RECORD,
        }
    }

    /// Sentinel day slots over all day slots. `None` for an empty file.
    pub fn total_percentage(&self) -> Option<f64> {
        (self.total_slots > 0)
            .then(|| self.sentinel_slots as f64 / self.total_slots as f64 * 100.0)
    }

    /// Adds the counts of another report, e.g. from the next file of a folder.
    pub fn merge(mut self, other: &MissingReport) -> Self {
        for (mine, theirs) in self.columns.iter_mut().zip(&other.columns) {
            mine.sentinel_count += theirs.sentinel_count;
            mine.present_count += theirs.present_count;
        }
        self.sentinel_slots += other.sentinel_slots;
        self.total_slots += other.total_slots;

        self
    }
}

impl Default for MissingReport {
    fn default() -> Self {
        MissingReport::from_records(&[])
    }
}
