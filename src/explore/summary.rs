//! Per-column summary statistics

use crate::Result;
use arrow::array::{Array, AsArray, RecordBatch};
use arrow::compute;
use arrow::datatypes::{DataType, Float64Type};
use std::collections::HashSet;

/// Statistics panel for a single column
///
/// Mean, standard deviation, min and max are populated for numeric columns
/// only. Distinct count is `None` for types with no string rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub data_type: DataType,
    pub rows: usize,
    pub nulls: usize,
    pub unique: Option<usize>,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize one column of a table
pub fn summarize(batch: &RecordBatch, column: &str) -> Result<ColumnSummary> {
    let index = batch.schema().index_of(column)?;
    let array = batch.column(index);
    let data_type = array.data_type().clone();

    let mut summary = ColumnSummary {
        name: column.to_string(),
        data_type: data_type.clone(),
        rows: array.len(),
        nulls: array.null_count(),
        unique: distinct_count(array.as_ref()),
        mean: None,
        std_dev: None,
        min: None,
        max: None,
    };

    if data_type.is_numeric() {
        let floats = compute::cast(array.as_ref(), &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        let count = floats.len() - floats.null_count();

        if count > 0 {
            let mean = compute::sum(floats).unwrap_or(0.0) / count as f64;
            summary.mean = Some(mean);
            summary.min = compute::min(floats);
            summary.max = compute::max(floats);

            if count > 1 {
                let sum_sq: f64 = floats.iter().flatten().map(|v| (v - mean).powi(2)).sum();
                summary.std_dev = Some((sum_sq / (count - 1) as f64).sqrt());
            }
        }
    }

    Ok(summary)
}

/// Count distinct non-null values via their string rendering
fn distinct_count(array: &dyn Array) -> Option<usize> {
    let rendered = compute::cast(array, &DataType::Utf8).ok()?;
    let strings = rendered.as_string::<i32>();

    let mut seen = HashSet::new();
    for i in 0..strings.len() {
        if strings.is_valid(i) {
            seen.insert(strings.value(i).to_string());
        }
    }
    Some(seen.len())
}
