//! Run configuration, passed explicitly into every pipeline entry point.

use std::{fmt, num::NonZeroUsize, path::PathBuf};

use clap::ValueEnum;

pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Whether day slots past the end of the month are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarPolicy {
    /// Every present slot is an observation, including e.g. 31 February.
    #[default]
    Lenient,
    /// Slots that are not real calendar dates are dropped.
    Strict,
}

/// How a multi-file run is combined into one annual table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMode {
    /// Per-file annual summaries regrouped by year: summed totals, mean of means,
    /// median of medians.
    #[default]
    Summaries,
    /// Observations of all files aggregated together.
    Pooled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

/// Inclusive year bounds; either end may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    /// `None` when neither bound is set.
    pub fn new(start: Option<i32>, end: Option<i32>) -> Option<Self> {
        (start.is_some() || end.is_some()).then_some(YearRange { start, end })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start.map_or(true, |s| year >= s) && self.end.map_or(true, |e| year <= e)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = |b: Option<i32>| b.map_or("..".to_string(), |y| y.to_string());
        write!(f, "{}-{}", bound(self.start), bound(self.end))
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Where to write the summary table. `None` means a dated file in the home directory.
    pub path: Option<PathBuf>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub inputs: Vec<PathBuf>,
    pub skip_header: bool,
    pub batch_size: NonZeroUsize,
    pub include_mean: bool,
    pub year_range: Option<YearRange>,
    pub calendar: CalendarPolicy,
    pub combine: CombineMode,
    pub output: OutputConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            inputs: Vec::new(),
            skip_header: false,
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            include_mean: true,
            year_range: None,
            calendar: CalendarPolicy::default(),
            combine: CombineMode::default(),
            output: OutputConfig::default(),
        }
    }
}
