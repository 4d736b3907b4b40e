pub mod annual;
pub mod folder;
pub mod missing;
pub mod stats;
pub mod subfolders;

use std::path::PathBuf;

use chrono::{Datelike, Local};

pub use annual::annual;
pub use folder::folder;
pub use missing::missing;
pub use stats::stats;
pub use subfolders::subfolders;

use crate::config::OutputConfig;

/// A dated file name in the home directory, e.g. `precip-annual-2026-10-17.csv`.
pub fn make_output_file_name(stem: &str, extension: &str) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "precip-{}-{}-{:02}-{:02}.{}",
        stem,
        today.year(),
        today.month(),
        today.day(),
        extension
    );

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

/// The explicit `--output` path, or a dated default.
pub fn output_path(output: &OutputConfig, stem: &str) -> PathBuf {
    output
        .path
        .clone()
        .unwrap_or_else(|| make_output_file_name(stem, output.format.extension()))
}
