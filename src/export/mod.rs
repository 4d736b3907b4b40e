//! Writes annual tables and dataset statistics to disk.

pub mod csv;
pub mod parquet;

use std::path::Path;

use anyhow::Result;

use crate::{aggregate::AnnualSummary, config::OutputFormat};

pub use self::csv::{save_annual_csv, save_statistics_csv};
pub use self::parquet::save_annual_parquet;

/// Column names of an annual table, in output order.
pub fn annual_columns(include_mean: bool) -> Vec<&'static str> {
    let mut columns = vec!["year", "total_precipitation"];
    if include_mean {
        columns.push("mean_precipitation");
    }
    columns.extend(["median_precipitation", "variation_rate"]);

    columns
}

pub fn save_annual(
    summaries: &[AnnualSummary],
    include_mean: bool,
    format: OutputFormat,
    file_path: &Path,
) -> Result<()> {
    match format {
        OutputFormat::Csv => save_annual_csv(summaries, include_mean, file_path),
        OutputFormat::Parquet => save_annual_parquet(summaries, include_mean, file_path),
    }
}
