//! Parse, clean, reshape and aggregate one file, or every file of a folder.

use std::{
    collections::BTreeSet,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use futures::future::join_all;
use indicatif::ProgressBar;
use tokio::task::JoinError;
use tracing::{debug, error, info, warn};

use crate::{
    aggregate::{
        annual_summaries, combine_summaries, filter_years, find_extreme_years,
        with_variation_rates, AnnualSummary, ExtremeYears,
    },
    clean::{replace_sentinel, MissingReport},
    config::{CalendarPolicy, CombineMode, PipelineConfig, YearRange},
    deserialise::read_dat_file,
    error::PipelineError,
    reading::ObservationRecord,
    reshape::melt,
};

/// The per-file subset of [`PipelineConfig`].
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub skip_header: bool,
    pub batch_size: NonZeroUsize,
    pub calendar: CalendarPolicy,
    /// Keep per-day observations after the annual summaries are built. Only pooled
    /// runs read them back.
    pub keep_observations: bool,
}

impl From<&PipelineConfig> for ReadOptions {
    fn from(config: &PipelineConfig) -> Self {
        ReadOptions {
            skip_header: config.skip_header,
            batch_size: config.batch_size,
            calendar: config.calendar,
            keep_observations: config.combine == CombineMode::Pooled,
        }
    }
}

/// Everything one file contributes to a run.
///
/// A file that parses but holds no observations still counts: its `missing`
/// report is kept and `annual` is empty.
#[derive(Debug, Clone)]
pub struct FileSummary {
    pub path: PathBuf,
    pub records: usize,
    pub missing: MissingReport,
    /// Empty unless [`ReadOptions::keep_observations`] was set.
    pub observations: Vec<ObservationRecord>,
    pub annual: Vec<AnnualSummary>,
}

#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: PipelineError,
}

/// Final annual table with its extremes.
#[derive(Debug, Clone)]
pub struct AnnualReport {
    pub summaries: Vec<AnnualSummary>,
    pub extremes: ExtremeYears,
}

/// Per-file outcomes of a folder run, in input order.
#[derive(Debug, Default)]
pub struct FolderRun {
    pub processed: Vec<FileSummary>,
    pub skipped: Vec<SkippedFile>,
}

impl FolderRun {
    /// Missing-data counts over every processed file.
    pub fn missing(&self) -> MissingReport {
        self.processed
            .iter()
            .fold(MissingReport::default(), |acc, f| acc.merge(&f.missing))
    }

    pub fn observations(&self) -> Vec<ObservationRecord> {
        self.processed
            .iter()
            .flat_map(|f| f.observations.iter().copied())
            .collect()
    }
}

pub fn process_file(path: &Path, options: ReadOptions) -> Result<FileSummary, PipelineError> {
    let records = read_dat_file(path, options.skip_header, options.batch_size)?;
    info!("Read {} records from {}", records.len(), path.display());

    let missing = MissingReport::from_records(&records);
    let cleaned = replace_sentinel(&records);
    let observations = melt(&cleaned, options.calendar);
    let stations: BTreeSet<i64> = observations.iter().map(|o| o.station_id).collect();
    debug!(
        "{}: {} of {} day slots are observations from {} stations",
        path.display(),
        observations.len(),
        missing.total_slots,
        stations.len()
    );

    let annual = if observations.is_empty() {
        warn!("{} has no observations", path.display());
        Vec::new()
    } else {
        annual_summaries(&observations)?
    };

    Ok(FileSummary {
        path: path.to_path_buf(),
        records: records.len(),
        missing,
        observations: if options.keep_observations {
            observations
        } else {
            Vec::new()
        },
        annual,
    })
}

/// Filters to the year range, then sets variation rates and finds the extremes.
pub fn finish_annual(
    summaries: Vec<AnnualSummary>,
    year_range: Option<YearRange>,
) -> Result<AnnualReport, PipelineError> {
    let summaries = with_variation_rates(filter_years(summaries, year_range));

    if summaries.is_empty() {
        return Err(PipelineError::EmptyInput(match year_range {
            Some(range) => format!("no years inside {}", range),
            None => "no annual summaries".to_string(),
        }));
    }

    let extremes = find_extreme_years(&summaries)?;

    Ok(AnnualReport {
        summaries,
        extremes,
    })
}

/// Single-file pipeline.
pub fn run_file(
    path: &Path,
    config: &PipelineConfig,
) -> Result<(FileSummary, AnnualReport), PipelineError> {
    let file = process_file(path, config.into())?;
    if file.annual.is_empty() {
        return Err(PipelineError::EmptyInput(format!(
            "no observations in {}",
            path.display()
        )));
    }
    let report = finish_annual(file.annual.clone(), config.year_range)?;

    Ok((file, report))
}

/// Processes every input on a blocking task and waits for all of them.
///
/// A file that cannot be read or parsed is recorded as skipped and does not stop
/// the others.
pub async fn run_files(config: &PipelineConfig, progress: &ProgressBar) -> FolderRun {
    let options = ReadOptions::from(config);

    let tasks: Vec<_> = config
        .inputs
        .iter()
        .map(|path| {
            let path = path.clone();
            let pb = progress.clone();
            tokio::task::spawn_blocking(move || {
                let result = process_file(&path, options);
                pb.inc(1);
                result
            })
        })
        .collect();

    collect_run(&config.inputs, join_all(tasks).await)
}

fn collect_run(
    inputs: &[PathBuf],
    results: Vec<Result<Result<FileSummary, PipelineError>, JoinError>>,
) -> FolderRun {
    let mut run = FolderRun::default();
    for (path, result) in inputs.iter().zip(results) {
        match result {
            Ok(Ok(file)) => run.processed.push(file),
            Ok(Err(e)) => {
                warn!("Skipping {}: {}", path.display(), e);
                run.skipped.push(SkippedFile {
                    path: path.clone(),
                    error: e,
                });
            }
            Err(e) => {
                error!("Task join error for {}: {:?}", path.display(), e);
                run.skipped.push(SkippedFile {
                    path: path.clone(),
                    error: PipelineError::Task(e.to_string()),
                });
            }
        }
    }

    run
}

/// Cross-file annual table, built only once every file has been processed.
pub fn combine_run(
    run: &FolderRun,
    config: &PipelineConfig,
) -> Result<AnnualReport, PipelineError> {
    if run.processed.is_empty() {
        return Err(PipelineError::EmptyInput(format!(
            "none of {} files could be processed",
            config.inputs.len()
        )));
    }

    let combined = match config.combine {
        CombineMode::Summaries => {
            let per_file: Vec<Vec<AnnualSummary>> =
                run.processed.iter().map(|f| f.annual.clone()).collect();
            combine_summaries(&per_file)?
        }
        CombineMode::Pooled => annual_summaries(&run.observations())?,
    };

    finish_annual(combined, config.year_range)
}

#[cfg(test)]
mod tests {

    use std::{fs::File, io::Write};

    use tempfile::TempDir;

    use super::*;

    fn write_dat(dir: &Path, name: &str, header: bool, rows: &[String]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        if header {
            writeln!(file, "precip MIROC5 RCP60 REGRESION decimas 1").unwrap();
        }
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    fn row(year: i32, month: u32, days: &[f64]) -> String {
        let values: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        format!("1 {} {} {}", year, month, values.join(" "))
    }

    fn constant_year(year: i32, value: f64) -> String {
        row(year, 1, &[value; 31])
    }

    fn config(inputs: Vec<PathBuf>) -> PipelineConfig {
        PipelineConfig {
            inputs,
            skip_header: true,
            ..Default::default()
        }
    }

    #[test]
    fn should_total_non_sentinel_values_and_report_missing_rate() {
        let dir = TempDir::new().unwrap();

        let mut january = vec![-999.0; 31];
        january[1] = 5.0;
        january[4] = 1.5;
        let mut february: Vec<f64> = (1..=29).map(|d| d as f64).collect();
        february.extend([-999.0, -999.0]);

        let path = write_dat(
            dir.path(),
            "p.dat",
            true,
            &[row(2020, 1, &january), row(2020, 2, &february)],
        );

        let (file, report) = run_file(&path, &config(vec![path.clone()])).unwrap();

        let expected_total = 5.0 + 1.5 + (1..=29).sum::<i32>() as f64;
        assert_eq!(file.records, 2);
        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.summaries[0].total_precipitation, expected_total);
        assert_eq!(file.missing.sentinel_slots, 31);
        assert_eq!(file.missing.total_percentage(), Some(31.0 / 62.0 * 100.0));
        assert_eq!(report.extremes.wettest.year, 2020);
    }

    #[test]
    fn should_fail_single_file_without_observations() {
        let dir = TempDir::new().unwrap();
        let path = write_dat(dir.path(), "p.dat", true, &[constant_year(2020, -999.0)]);

        let err = run_file(&path, &config(vec![path.clone()])).unwrap_err();

        assert!(matches!(err, PipelineError::EmptyInput(_)));
    }

    #[test]
    fn should_apply_year_range_before_variation_rates() {
        let summaries = vec![
            AnnualSummary {
                year: 1999,
                total_precipitation: 1.0,
                mean_precipitation: 1.0,
                median_precipitation: 1.0,
                variation_rate: None,
            },
            AnnualSummary {
                year: 2000,
                total_precipitation: 2.0,
                mean_precipitation: 2.0,
                median_precipitation: 2.0,
                variation_rate: None,
            },
        ];

        let report = finish_annual(summaries, YearRange::new(Some(2000), None)).unwrap();

        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.summaries[0].variation_rate, None);
    }

    #[test]
    fn should_fail_when_year_range_excludes_everything() {
        let summaries = vec![AnnualSummary {
            year: 1950,
            total_precipitation: 1.0,
            mean_precipitation: 1.0,
            median_precipitation: 1.0,
            variation_rate: None,
        }];

        let err = finish_annual(summaries, YearRange::new(Some(2000), Some(2100))).unwrap_err();

        assert!(err.to_string().contains("2000-2100"));
    }

    #[tokio::test]
    async fn should_skip_bad_files_and_combine_the_rest() {
        let dir = TempDir::new().unwrap();
        let a = write_dat(dir.path(), "a.dat", true, &[constant_year(2021, 1.0)]);
        let b = write_dat(dir.path(), "b.dat", true, &[constant_year(2021, 2.0)]);
        let bad = write_dat(dir.path(), "bad.dat", true, &["1 2021 1 0.0".to_string()]);
        let gone = dir.path().join("gone.dat");

        let config = config(vec![a, bad, b, gone]);
        let run = run_files(&config, &ProgressBar::hidden()).await;

        assert_eq!(run.processed.len(), 2);
        assert_eq!(run.skipped.len(), 2);
        assert!(matches!(run.skipped[0].error, PipelineError::Parse { .. }));
        assert!(matches!(run.skipped[1].error, PipelineError::MissingFile { .. }));

        let report = combine_run(&run, &config).unwrap();

        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.summaries[0].total_precipitation, 93.0);
        assert_eq!(report.summaries[0].median_precipitation, 1.5);
    }

    #[tokio::test]
    async fn should_pool_observations_when_asked() {
        let dir = TempDir::new().unwrap();
        let mut days = [0.0; 31];
        days[0] = 10.0;
        let a = write_dat(dir.path(), "a.dat", true, &[row(2021, 1, &days)]);
        let b = write_dat(dir.path(), "b.dat", true, &[constant_year(2021, 0.0)]);

        let mut config = config(vec![a, b]);
        config.combine = CombineMode::Pooled;
        let run = run_files(&config, &ProgressBar::hidden()).await;
        let report = combine_run(&run, &config).unwrap();

        assert_eq!(report.summaries[0].total_precipitation, 10.0);
        assert_eq!(report.summaries[0].median_precipitation, 0.0);
        assert_eq!(report.summaries[0].mean_precipitation, 10.0 / 62.0);
    }

    #[tokio::test]
    async fn should_keep_missing_counts_of_file_without_observations() {
        let dir = TempDir::new().unwrap();
        let empty = write_dat(dir.path(), "a.dat", true, &[constant_year(2021, -999.0)]);
        let full = write_dat(dir.path(), "b.dat", true, &[constant_year(2021, 1.0)]);

        let config = config(vec![empty, full]);
        let run = run_files(&config, &ProgressBar::hidden()).await;

        assert_eq!(run.processed.len(), 2);
        assert!(run.skipped.is_empty());
        assert!(run.processed[0].annual.is_empty());
        assert_eq!(run.missing().total_percentage(), Some(50.0));

        let report = combine_run(&run, &config).unwrap();
        assert_eq!(report.summaries[0].total_precipitation, 31.0);
    }

    #[tokio::test]
    async fn should_drop_observations_unless_pooled() {
        let dir = TempDir::new().unwrap();
        let a = write_dat(dir.path(), "a.dat", true, &[constant_year(2021, 1.0)]);

        let summaries = run_files(&config(vec![a.clone()]), &ProgressBar::hidden()).await;
        let mut pooled = config(vec![a]);
        pooled.combine = CombineMode::Pooled;
        let pooled = run_files(&pooled, &ProgressBar::hidden()).await;

        assert!(summaries.observations().is_empty());
        assert_eq!(summaries.processed[0].annual.len(), 1);
        assert_eq!(pooled.observations().len(), 31);
    }

    #[tokio::test]
    async fn should_record_failed_task_as_skipped() {
        let failed = tokio::task::spawn_blocking(|| -> Result<FileSummary, PipelineError> {
            panic!("worker stopped")
        })
        .await;

        let run = collect_run(&[PathBuf::from("a.dat")], vec![failed]);

        assert!(run.processed.is_empty());
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].path, PathBuf::from("a.dat"));
        assert!(matches!(run.skipped[0].error, PipelineError::Task(_)));
    }

    #[tokio::test]
    async fn should_fail_combine_when_every_file_skipped() {
        let dir = TempDir::new().unwrap();
        let config = config(vec![dir.path().join("missing.dat")]);

        let run = run_files(&config, &ProgressBar::hidden()).await;
        let err = combine_run(&run, &config).unwrap_err();

        assert!(matches!(err, PipelineError::EmptyInput(_)));
        assert_eq!(run.skipped.len(), 1);
    }
}
