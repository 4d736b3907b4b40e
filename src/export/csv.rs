//! CSV export.

use std::path::Path;

use anyhow::Result;

use crate::aggregate::{AnnualSummary, DatasetStatistics};

use super::annual_columns;

/// Writes one row per year. An undefined variation rate is an empty cell.
pub fn save_annual_csv(
    summaries: &[AnnualSummary],
    include_mean: bool,
    file_path: &Path,
) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(file_path)?;
    writer.write_record(annual_columns(include_mean))?;

    for s in summaries {
        let mut record = vec![s.year.to_string(), s.total_precipitation.to_string()];
        if include_mean {
            record.push(s.mean_precipitation.to_string());
        }
        record.push(s.median_precipitation.to_string());
        record.push(s.variation_rate.map(|v| v.to_string()).unwrap_or_default());

        writer.write_record(&record)?;
    }

    writer.flush()?;

    Ok(())
}

pub fn save_statistics_csv(statistics: &DatasetStatistics, file_path: &Path) -> Result<()> {
    let mut writer = ::csv::Writer::from_path(file_path)?;
    writer.serialize(statistics)?;
    writer.flush()?;

    Ok(())
}
