//! Missing-data report for one file.

use std::path::Path;

use anyhow::Result;

use crate::{
    clean::MissingReport, cli::create_spinner, config::PipelineConfig,
    deserialise::read_dat_file, report::format_missing,
};

/// Prints the share of sentinel values per column. Nothing is written to disk.
pub fn missing(file: &Path, config: &PipelineConfig) -> Result<String> {
    let bar = create_spinner(format!("Reading {}...", file.display()));
    let records = read_dat_file(file, config.skip_header, config.batch_size);
    bar.finish_and_clear();

    let report = MissingReport::from_records(&records?);
    println!("Missing data per column in {}:", file.display());
    print!("{}", format_missing(&report));

    Ok(report
        .total_percentage()
        .map_or("no day values".to_string(), |p| format!("{:.2}% missing", p)))
}
