//! Annual totals, means, medians and the year-over-year variation rate.

use std::collections::BTreeMap;

use crate::{config::YearRange, error::PipelineError, reading::ObservationRecord};

use super::{mean, median};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualSummary {
    pub year: i32,
    pub total_precipitation: f64,
    pub mean_precipitation: f64,
    pub median_precipitation: f64,
    /// Percentage change of the total against the previous year present.
    pub variation_rate: Option<f64>,
}

/// Groups observations by year, in ascending year order.
///
/// Variation rates are left unset; see [`with_variation_rates`].
pub fn annual_summaries(
    observations: &[ObservationRecord],
) -> Result<Vec<AnnualSummary>, PipelineError> {
    if observations.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no observations left after cleaning".to_string(),
        ));
    }

    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for o in observations {
        by_year.entry(o.year).or_default().push(o.precipitation);
    }

    let summaries = by_year
        .into_iter()
        .filter_map(|(year, values)| {
            Some(AnnualSummary {
                year,
                total_precipitation: values.iter().sum(),
                mean_precipitation: mean(&values)?,
                median_precipitation: median(&values)?,
                variation_rate: None,
            })
        })
        .collect();

    Ok(summaries)
}

/// Sets each year's variation rate against the nearest earlier year present.
///
/// A gap year is compared with whatever year precedes it, not with the calendar
/// year before. The rate is undefined for the first year and after a zero total.
pub fn with_variation_rates(mut summaries: Vec<AnnualSummary>) -> Vec<AnnualSummary> {
    summaries.sort_by_key(|s| s.year);

    let mut previous: Option<f64> = None;
    for s in summaries.iter_mut() {
        s.variation_rate = previous
            .filter(|p| *p != 0.0)
            .map(|p| (s.total_precipitation - p) / p * 100.0);
        previous = Some(s.total_precipitation);
    }

    summaries
}

/// Keeps only the years inside `range`.
pub fn filter_years(summaries: Vec<AnnualSummary>, range: Option<YearRange>) -> Vec<AnnualSummary> {
    match range {
        Some(range) => summaries
            .into_iter()
            .filter(|s| range.contains(s.year))
            .collect(),
        None => summaries,
    }
}
