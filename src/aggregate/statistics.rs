//! Whole-dataset statistics over the pooled observations of a folder.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{clean::MissingReport, error::PipelineError, reading::ObservationRecord};

use super::{annual_summaries, find_extreme_years, mean};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatistics {
    pub missing_data_percentage: Option<f64>,
    /// Mean of the annual totals.
    pub annual_average: f64,
    /// Sum of the annual totals.
    pub annual_totals: f64,
    /// Mean change between consecutive annual totals.
    pub annual_difference: Option<f64>,
    pub wettest_year: i32,
    pub driest_year: i32,
    pub highest_monthly_average: f64,
    pub lowest_monthly_average: f64,
}

impl DatasetStatistics {
    pub fn compute(
        missing: &MissingReport,
        observations: &[ObservationRecord],
    ) -> Result<Self, PipelineError> {
        let summaries = annual_summaries(observations)?;
        let totals: Vec<f64> = summaries.iter().map(|s| s.total_precipitation).collect();
        let extremes = find_extreme_years(&summaries)?;

        let differences: Vec<f64> = totals.windows(2).map(|w| w[1] - w[0]).collect();

        let monthly = monthly_averages(observations);
        let highest_monthly_average = monthly.values().copied().fold(f64::MIN, f64::max);
        let lowest_monthly_average = monthly.values().copied().fold(f64::MAX, f64::min);

        Ok(DatasetStatistics {
            missing_data_percentage: missing.total_percentage(),
            annual_average: mean(&totals).unwrap_or_default(),
            annual_totals: totals.iter().sum(),
            annual_difference: mean(&differences),
            wettest_year: extremes.wettest.year,
            driest_year: extremes.driest.year,
            highest_monthly_average,
            lowest_monthly_average,
        })
    }
}

/// Mean daily precipitation per calendar month, all years together.
pub fn monthly_averages(observations: &[ObservationRecord]) -> BTreeMap<u32, f64> {
    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for o in observations {
        by_month.entry(o.month).or_default().push(o.precipitation);
    }

    by_month
        .into_iter()
        .filter_map(|(month, values)| mean(&values).map(|m| (month, m)))
        .collect()
}
