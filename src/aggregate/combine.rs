//! Folder-level regroup of per-file annual summaries.

use std::collections::BTreeMap;

use crate::error::PipelineError;

use super::{mean, median, AnnualSummary};

/// Regroups the annual summaries of several files by year.
///
/// Totals are summed, means averaged and the median is the median of the per-file
/// medians. Daily values are not revisited, so the combined median is generally not
/// the median of all observations. Variation rates are cleared; recompute them once
/// the year range is final.
pub fn combine_summaries(
    per_file: &[Vec<AnnualSummary>],
) -> Result<Vec<AnnualSummary>, PipelineError> {
    let mut by_year: BTreeMap<i32, Vec<&AnnualSummary>> = BTreeMap::new();
    for s in per_file.iter().flatten() {
        by_year.entry(s.year).or_default().push(s);
    }

    if by_year.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no per-file summaries to combine".to_string(),
        ));
    }

    let combined = by_year
        .into_iter()
        .filter_map(|(year, group)| {
            let means: Vec<f64> = group.iter().map(|s| s.mean_precipitation).collect();
            let medians: Vec<f64> = group.iter().map(|s| s.median_precipitation).collect();

            Some(AnnualSummary {
                year,
                total_precipitation: group.iter().map(|s| s.total_precipitation).sum(),
                mean_precipitation: mean(&means)?,
                median_precipitation: median(&medians)?,
                variation_rate: None,
            })
        })
        .collect();

    Ok(combined)
}
