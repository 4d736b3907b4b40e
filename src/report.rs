//! Console tables.

use crate::{
    aggregate::{AnnualSummary, DatasetStatistics, Describe, ExtremeYears},
    clean::MissingReport,
    pipeline::SkippedFile,
};

pub fn format_missing(report: &MissingReport) -> String {
    let mut out = String::new();

    for c in &report.columns {
        let percentage = c
            .percentage()
            .map_or("NaN".to_string(), |p| format!("{:.2}%", p));
        out.push_str(&format!("{:<8} {:>8}\n", c.column, percentage));
    }

    if let Some(total) = report.total_percentage() {
        out.push_str(&format!(
            "{} of {} day values missing ({:.2}%)\n",
            report.sentinel_slots, report.total_slots, total
        ));
    }

    out
}

pub fn format_annual(summaries: &[AnnualSummary], include_mean: bool) -> String {
    let mut out = format!("{:>6} {:>12}", "year", "total");
    if include_mean {
        out.push_str(&format!(" {:>8}", "mean"));
    }
    out.push_str(&format!(" {:>8} {:>10}\n", "median", "variation"));

    for s in summaries {
        out.push_str(&format!("{:>6} {:>12.2}", s.year, s.total_precipitation));
        if include_mean {
            out.push_str(&format!(" {:>8.3}", s.mean_precipitation));
        }
        let rate = s
            .variation_rate
            .map_or("NaN".to_string(), |r| format!("{:.2}%", r));
        out.push_str(&format!(" {:>8.3} {:>10}\n", s.median_precipitation, rate));
    }

    out
}

pub fn format_extremes(extremes: &ExtremeYears) -> String {
    format!(
        "Driest year: {} ({:.2} mm)\nWettest year: {} ({:.2} mm)\n",
        extremes.driest.year,
        extremes.driest.total_precipitation,
        extremes.wettest.year,
        extremes.wettest.total_precipitation
    )
}

pub fn format_skipped(skipped: &[SkippedFile]) -> String {
    skipped
        .iter()
        .map(|s| format!("Skipped {}: {}\n", s.path.display(), s.error))
        .collect()
}

pub fn format_describe(describe: &Describe) -> String {
    format!("Statistical summary of annual totals:\n{}\n", describe)
}

pub fn format_statistics(statistics: &DatasetStatistics) -> String {
    let optional = |v: Option<f64>| v.map_or("NaN".to_string(), |v| format!("{:.2}", v));

    format!(
        "missing_data_percentage: {}\n\
         annual_avg: {:.2}\n\
         annual_totals: {:.2}\n\
         annual_data_diff: {}\n\
         wettest_year: {}\n\
         driest_year: {}\n\
         highest_monthly_avg: {:.3}\n\
         lowest_monthly_avg: {:.3}\n",
        optional(statistics.missing_data_percentage),
        statistics.annual_average,
        statistics.annual_totals,
        optional(statistics.annual_difference),
        statistics.wettest_year,
        statistics.driest_year,
        statistics.highest_monthly_average,
        statistics.lowest_monthly_average,
    )
}
