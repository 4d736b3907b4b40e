//! Command line interface.

pub mod command;

use std::{num::NonZeroUsize, path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{
    CalendarPolicy, CombineMode, OutputConfig, OutputFormat, PipelineConfig, YearRange,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Percentage of -999 values per column of one file
    Missing {
        file: PathBuf,
        #[command(flatten)]
        args: SharedArgs,
    },
    /// Annual totals, means and medians of one file
    Annual {
        file: PathBuf,
        #[command(flatten)]
        args: SharedArgs,
    },
    /// Combined annual table of every .dat file below a folder
    Folder {
        dir: PathBuf,
        #[command(flatten)]
        args: SharedArgs,
    },
    /// Whole-dataset statistics of every .dat file below a folder (CSV only)
    Stats {
        dir: PathBuf,
        #[command(flatten)]
        args: SharedArgs,
    },
    /// One pooled annual table per sub-folder, written into that sub-folder
    Subfolders {
        dir: PathBuf,
        #[command(flatten)]
        args: SharedArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SharedArgs {
    /// Skip the first line of every file
    #[arg(long)]
    pub skip_header: bool,

    /// Lines parsed per batch
    #[arg(long, default_value = "10000")]
    pub batch_size: NonZeroUsize,

    /// Leave mean_precipitation out of the output
    #[arg(long)]
    pub no_mean: bool,

    /// First year to keep
    #[arg(long)]
    pub from: Option<i32>,

    /// Last year to keep
    #[arg(long)]
    pub to: Option<i32>,

    /// Drop day values that fall on non-existent dates, e.g. 30 February
    #[arg(long)]
    pub strict_calendar: bool,

    /// Aggregate the observations of all files together instead of combining
    /// per-file summaries
    #[arg(long)]
    pub pooled: bool,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

impl SharedArgs {
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> PipelineConfig {
        PipelineConfig {
            inputs,
            skip_header: self.skip_header,
            batch_size: self.batch_size,
            include_mean: !self.no_mean,
            year_range: YearRange::new(self.from, self.to),
            calendar: if self.strict_calendar {
                CalendarPolicy::Strict
            } else {
                CalendarPolicy::Lenient
            },
            combine: if self.pooled {
                CombineMode::Pooled
            } else {
                CombineMode::Summaries
            },
            output: OutputConfig {
                path: self.output.clone(),
                format: self.format,
            },
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}
