//! Group-by-year statistics over observations and over per-file summaries.

pub mod annual;
pub mod combine;
pub mod describe;
pub mod extremes;
pub mod statistics;

pub use annual::{annual_summaries, filter_years, with_variation_rates, AnnualSummary};
pub use combine::combine_summaries;
pub use describe::Describe;
pub use extremes::{find_extreme_years, ExtremeYears};
pub use statistics::DatasetStatistics;

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value, or the mean of the two middle values for an even count.
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
