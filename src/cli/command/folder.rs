//! Combined annual table of a folder of `.dat` files.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::{debug, info};

use crate::{
    aggregate::Describe,
    cli::create_progress_bar,
    config::PipelineConfig,
    deserialise::discover_dat_files,
    export::save_annual,
    pipeline::{combine_run, run_files, FolderRun},
    report::{format_annual, format_describe, format_extremes, format_skipped},
};

use super::output_path;

pub async fn folder(dir: &Path, config: PipelineConfig) -> Result<String> {
    let (config, run) = process_folder(dir, config).await?;
    print!("{}", format_skipped(&run.skipped));

    let report = combine_run(&run, &config)?;

    print!("{}", format_annual(&report.summaries, config.include_mean));
    print!("{}", format_extremes(&report.extremes));
    let totals: Vec<f64> = report
        .summaries
        .iter()
        .map(|s| s.total_precipitation)
        .collect();
    if let Some(describe) = Describe::from_values(&totals) {
        print!("{}", format_describe(&describe));
    }

    let file_name = output_path(&config.output, "folder");
    save_annual(
        &report.summaries,
        config.include_mean,
        config.output.format,
        &file_name,
    )?;
    info!(
        "Combined {} files into {}",
        run.processed.len(),
        file_name.display()
    );

    Ok(file_name.to_string_lossy().to_string())
}

/// Discovers the folder's `.dat` files and runs each of them.
pub async fn process_folder(
    dir: &Path,
    config: PipelineConfig,
) -> Result<(PipelineConfig, FolderRun)> {
    let inputs: Vec<PathBuf> = discover_dat_files(dir)?;
    if inputs.is_empty() {
        return Err(anyhow!("No .dat files found in {}", dir.display()));
    }
    info!("Found {} .dat files in {}", inputs.len(), dir.display());

    let config = PipelineConfig { inputs, ..config };

    let pb = create_progress_bar(
        config.inputs.len() as u64,
        "Processing files".to_string(),
    );
    let run = run_files(&config, &pb).await;
    pb.finish_with_message("Processing complete");

    for f in &run.processed {
        debug!(
            "{}: {} records, {} years",
            f.path.display(),
            f.records,
            f.annual.len()
        );
    }

    Ok((config, run))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::{OutputConfig, YearRange};

    fn year_row(year: i32, value: &str) -> String {
        format!("1 {} 1 {}\n", year, vec![value; 31].join(" "))
    }

    #[tokio::test]
    async fn should_combine_folder_and_write_csv() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("Parte_1")).unwrap();
        fs::write(
            data.join("a.dat"),
            format!("header\n{}{}", year_row(1999, "1"), year_row(2021, "1")),
        )
        .unwrap();
        fs::write(
            data.join("Parte_1").join("b.dat"),
            format!("header\n{}", year_row(2021, "2")),
        )
        .unwrap();
        fs::write(data.join("c.dat"), "header\nbroken row\n").unwrap();

        let out = dir.path().join("annual.csv");
        let config = PipelineConfig {
            skip_header: true,
            year_range: YearRange::new(Some(2000), Some(2100)),
            output: OutputConfig {
                path: Some(out.clone()),
                ..Default::default()
            },
            ..Default::default()
        };

        let file_name = folder(&data, config).await.unwrap();

        assert_eq!(file_name, out.to_string_lossy());
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2021,93,1.5,1.5,");
    }

    #[tokio::test]
    async fn should_fail_for_folder_without_dat_files() {
        let dir = TempDir::new().unwrap();
        let result = process_folder(dir.path(), PipelineConfig::default()).await;

        assert!(result.is_err());
    }
}
