//! One pooled annual table per sub-folder.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use crate::{
    config::{CombineMode, PipelineConfig},
    deserialise::list_subfolders,
    export::save_annual,
    pipeline::combine_run,
};

use super::folder::process_folder;

const SUMMARY_STEM: &str = "annual_precipitation_summary";

/// Writes `annual_precipitation_summary.<ext>` into every sub-folder that has data.
/// Returns the number of tables written.
pub async fn subfolders(dir: &Path, config: PipelineConfig) -> Result<usize> {
    let mut written = 0;

    for subfolder in list_subfolders(dir)? {
        info!("Processing sub-folder {}", subfolder.display());

        let config = PipelineConfig {
            combine: CombineMode::Pooled,
            ..config.clone()
        };

        let report = match process_folder(&subfolder, config).await {
            Ok((config, run)) => combine_run(&run, &config).map(|report| (config, report)),
            Err(e) => {
                warn!("No data processed in {}: {}", subfolder.display(), e);
                continue;
            }
        };

        match report {
            Ok((config, report)) => {
                let file_name = subfolder.join(format!(
                    "{}.{}",
                    SUMMARY_STEM,
                    config.output.format.extension()
                ));
                save_annual(
                    &report.summaries,
                    config.include_mean,
                    config.output.format,
                    &file_name,
                )?;
                info!("Summary written to {}", file_name.display());
                written += 1;
            }
            Err(e) => warn!("No data processed in {}: {}", subfolder.display(), e),
        }
    }

    Ok(written)
}

// -- Tests -------------------------------------------------------------------
