//! Whole-dataset statistics of a folder.

use std::path::Path;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::{
    aggregate::DatasetStatistics,
    config::{CombineMode, OutputFormat, PipelineConfig},
    export::save_statistics_csv,
    report::{format_skipped, format_statistics},
};

use super::{folder::process_folder, make_output_file_name};

pub async fn stats(dir: &Path, config: PipelineConfig) -> Result<String> {
    if config.output.format != OutputFormat::Csv {
        return Err(anyhow!("Statistics are only written as CSV"));
    }

    // Statistics are taken over the observations of every file together.
    let config = PipelineConfig {
        combine: CombineMode::Pooled,
        ..config
    };
    let (config, run) = process_folder(dir, config).await?;
    print!("{}", format_skipped(&run.skipped));

    let statistics = DatasetStatistics::compute(&run.missing(), &run.observations())?;
    print!("{}", format_statistics(&statistics));

    let file_name = config
        .output
        .path
        .clone()
        .unwrap_or_else(|| make_output_file_name("statistics", "csv"));
    save_statistics_csv(&statistics, &file_name)?;
    info!("Statistics written to {}", file_name.display());

    Ok(file_name.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------
