//! Parquet export of the annual table.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, RecordBatch},
    datatypes::{DataType, Field, Schema},
};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::aggregate::AnnualSummary;

pub fn save_annual_parquet(
    summaries: &[AnnualSummary],
    include_mean: bool,
    file_path: &Path,
) -> Result<()> {
    let file = File::create(file_path)?;

    let mut fields = vec![
        Field::new("year", DataType::Int32, false),
        Field::new("total_precipitation", DataType::Float64, false),
    ];
    if include_mean {
        fields.push(Field::new("mean_precipitation", DataType::Float64, false));
    }
    fields.push(Field::new("median_precipitation", DataType::Float64, false));
    fields.push(Field::new("variation_rate", DataType::Float64, true));
    let schema = Arc::new(Schema::new(fields));

    let years: Vec<i32> = summaries.iter().map(|s| s.year).collect();
    let totals: Vec<f64> = summaries.iter().map(|s| s.total_precipitation).collect();
    let means: Vec<f64> = summaries.iter().map(|s| s.mean_precipitation).collect();
    let medians: Vec<f64> = summaries.iter().map(|s| s.median_precipitation).collect();
    let rates: Vec<Option<f64>> = summaries.iter().map(|s| s.variation_rate).collect();

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(years)),
        Arc::new(Float64Array::from(totals)),
    ];
    if include_mean {
        columns.push(Arc::new(Float64Array::from(means)));
    }
    columns.push(Arc::new(Float64Array::from(medians)));
    columns.push(Arc::new(Float64Array::from(rates)));

    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
