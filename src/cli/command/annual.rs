//! Annual summary of a single file.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::{
    cli::create_spinner,
    config::PipelineConfig,
    export::save_annual,
    pipeline::run_file,
    report::{format_annual, format_extremes},
};

use super::output_path;

pub fn annual(file: &Path, config: &PipelineConfig) -> Result<String> {
    let bar = create_spinner(format!("Processing {}...", file.display()));
    let result = run_file(file, config);
    bar.finish_and_clear();
    let (summary, report) = result?;

    if let Some(p) = summary.missing.total_percentage() {
        println!("Missing data: {:.2}%", p);
    }
    print!("{}", format_annual(&report.summaries, config.include_mean));
    print!("{}", format_extremes(&report.extremes));

    let file_name = output_path(&config.output, "annual");
    save_annual(
        &report.summaries,
        config.include_mean,
        config.output.format,
        &file_name,
    )?;
    info!("Annual summary written to {}", file_name.display());

    Ok(file_name.to_string_lossy().to_string())
}
