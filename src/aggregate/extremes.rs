//! Wettest and driest years.

use crate::error::PipelineError;

use super::AnnualSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeYears {
    pub driest: AnnualSummary,
    pub wettest: AnnualSummary,
}

/// Driest is the minimum total, wettest the maximum. Ties go to the earliest year.
pub fn find_extreme_years(summaries: &[AnnualSummary]) -> Result<ExtremeYears, PipelineError> {
    let mut ordered: Vec<&AnnualSummary> = summaries.iter().collect();
    ordered.sort_by_key(|s| s.year);

    let mut iter = ordered.into_iter();
    let first = iter.next().ok_or_else(|| {
        PipelineError::EmptyInput("no annual summaries to rank".to_string())
    })?;

    let (mut driest, mut wettest) = (first, first);
    for s in iter {
        if s.total_precipitation < driest.total_precipitation {
            driest = s;
        }
        if s.total_precipitation > wettest.total_precipitation {
            wettest = s;
        }
    }

    Ok(ExtremeYears {
        driest: driest.clone(),
        wettest: wettest.clone(),
    })
}
