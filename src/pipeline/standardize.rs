//! Batch-relative mean imputation and z-score standardization
//!
//! Statistics come from the rows of the current batch, not from training
//! time. The same record can therefore produce different features depending on
//! which other records share its batch, and a single-row batch always
//! standardizes to zero.

use polars::prelude::*;
use rayon::prelude::*;

use super::missing::{ColumnPartition, NumericColumn};

/// Standard deviations below this are treated as zero variance
const ZERO_VARIANCE_TOLERANCE: f64 = 10.0 * f64::EPSILON;

/// Mean and population standard deviation of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    pub mean: f64,
    pub std: f64,
}

impl BatchStats {
    /// Statistics over the present values, or `None` when every value is missing.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        if present.is_empty() {
            return None;
        }
        Some(Self::from_dense(&present))
    }

    /// Statistics over a column without missing values (ddof = 0).
    pub fn from_dense(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self { mean: 0.0, std: 0.0 };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            mean,
            std: variance.sqrt(),
        }
    }

    /// Divisor used for scaling; zero variance scales by one.
    pub fn scale(&self) -> f64 {
        if self.std < ZERO_VARIANCE_TOLERANCE {
            1.0
        } else {
            self.std
        }
    }
}

/// Replace missing values with the batch mean of the present ones.
///
/// A column with no present values is returned as zeros.
pub fn impute_mean(values: &[Option<f64>]) -> Vec<f64> {
    let fill = BatchStats::from_values(values).map_or(0.0, |s| s.mean);
    values.iter().map(|v| v.unwrap_or(fill)).collect()
}

/// Z-score `values` against their own mean and standard deviation.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let stats = BatchStats::from_dense(values);
    let scale = stats.scale();
    values.iter().map(|v| (v - stats.mean) / scale).collect()
}

/// Impute and standardize informative columns; pass structurally-empty ones through.
///
/// Structurally-empty columns keep their values, with nulls materialized as
/// `0.0` so the downstream matrix is all numeric. Output keeps the order of
/// `columns`.
///
/// # Arguments
/// * `columns` - Numeric columns of the batch, categoricals excluded
/// * `partition` - Informative / structurally-empty split of `columns` from `classify_columns`
pub fn impute_and_standardize(columns: &[NumericColumn], partition: &ColumnPartition) -> Vec<Column> {
    columns
        .par_iter()
        .map(|column| {
            let values: Vec<f64> = if partition.is_informative(&column.name) {
                standardize(&impute_mean(&column.values))
            } else {
                column.values.iter().map(|v| v.unwrap_or(0.0)).collect()
            };
            Column::new(column.name.as_str().into(), values)
        })
        .collect()
}
