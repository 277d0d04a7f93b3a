//! Missing value analysis and column classification
//!
//! Every non-categorical column is classified against the current batch as
//! either informative or structurally empty (all values null, zero, or NaN).
//! Only informative columns are imputed and standardized.

use polars::prelude::*;

use super::error::{PipelineError, PipelineResult};

/// A numeric column extracted from the batch, nulls preserved
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl NumericColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Disjoint, exhaustive split of the numeric columns of a batch.
///
/// Both lists keep the column order of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPartition {
    pub informative: Vec<String>,
    pub structurally_empty: Vec<String>,
}

impl ColumnPartition {
    pub fn len(&self) -> usize {
        self.informative.len() + self.structurally_empty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_informative(&self, column: &str) -> bool {
        self.informative.iter().any(|c| c == column)
    }
}

/// Extract every column not listed in `excluded` as Float64 values.
///
/// Integer and boolean columns are cast; NaN is treated as missing. A text
/// column holding any value cannot be imputed and fails the batch.
pub fn numeric_columns(df: &DataFrame, excluded: &[&str]) -> PipelineResult<Vec<NumericColumn>> {
    df.get_columns()
        .iter()
        .filter(|col| !excluded.contains(&col.name().as_str()))
        .map(|col| {
            // Untyped all-null columns (e.g. an empty CSV column read as text)
            if col.null_count() == col.len() {
                return Ok(NumericColumn::new(col.name().as_str(), vec![None; col.len()]));
            }

            let dtype = col.dtype();
            if !(dtype.is_primitive_numeric() || dtype == &DataType::Boolean) {
                return Err(PipelineError::NonNumericColumn {
                    column: col.name().to_string(),
                    dtype: dtype.to_string(),
                });
            }

            let float_col = col.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = float_col
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect();
            Ok(NumericColumn::new(col.name().as_str(), values))
        })
        .collect()
}

/// True when no value in the column is truthy within this batch.
pub fn is_structurally_empty(values: &[Option<f64>]) -> bool {
    values
        .iter()
        .all(|v| v.map_or(true, |x| x == 0.0 || x.is_nan()))
}

/// Split columns into informative and structurally-empty sets.
pub fn classify_columns(columns: &[NumericColumn]) -> ColumnPartition {
    let mut partition = ColumnPartition::default();

    for column in columns {
        if is_structurally_empty(&column.values) {
            partition.structurally_empty.push(column.name.clone());
        } else {
            partition.informative.push(column.name.clone());
        }
    }

    partition
}
