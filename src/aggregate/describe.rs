//! Descriptive summary of one numeric column.

use std::fmt;

use super::mean;

#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Describe {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mean = mean(values)?;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let std = (sorted.len() > 1).then(|| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (sorted.len() - 1) as f64).sqrt()
        });

        Some(Describe {
            count: sorted.len(),
            mean,
            std,
            min: sorted[0],
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

// Linear interpolation between closest ranks. `sorted` is non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "count {:>12}", self.count)?;
        writeln!(f, "mean  {:>12.2}", self.mean)?;
        match self.std {
            Some(std) => writeln!(f, "std   {:>12.2}", std)?,
            None => writeln!(f, "std   {:>12}", "NaN")?,
        }
        writeln!(f, "min   {:>12.2}", self.min)?;
        writeln!(f, "25%   {:>12.2}", self.p25)?;
        writeln!(f, "50%   {:>12.2}", self.p50)?;
        writeln!(f, "75%   {:>12.2}", self.p75)?;
        write!(f, "max   {:>12.2}", self.max)
    }
}
