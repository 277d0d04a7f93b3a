//! Reconciliation of encoded columns against the fixed model schema

use faer::Mat;
use polars::prelude::*;

use super::error::PipelineResult;

/// Feature matrix in exact model-schema order.
///
/// Always holds one Float64 column per schema name, one row per input record,
/// and no nulls.
#[derive(Debug, Clone)]
pub struct ProcessedBatch {
    frame: DataFrame,
}

impl ProcessedBatch {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn feature_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Dense row-major view for scoring: rows are records, columns are features.
    pub fn to_matrix(&self) -> PipelineResult<Mat<f64>> {
        let columns: Vec<Vec<f64>> = self
            .frame
            .get_columns()
            .iter()
            .map(|col| {
                Ok(col
                    .f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect())
            })
            .collect::<PipelineResult<_>>()?;

        Ok(Mat::from_fn(self.height(), columns.len(), |i, j| columns[j][i]))
    }
}

/// Align `encoded` to `schema`.
///
/// Schema names absent from `encoded` become zero columns, columns outside the
/// schema are dropped, and the result is ordered exactly as `schema`.
///
/// # Arguments
/// * `encoded` - Standardized numeric and indicator columns, all Float64
/// * `schema` - Feature names the model expects
pub fn align_to_schema(encoded: &DataFrame, schema: &[&str]) -> PipelineResult<ProcessedBatch> {
    let height = encoded.height();

    let columns: Vec<Column> = schema
        .iter()
        .map(|name| match encoded.column(name) {
            Ok(col) => {
                let floats = col.cast(&DataType::Float64)?;
                let values: Vec<f64> = floats
                    .f64()?
                    .into_iter()
                    .map(|v| v.unwrap_or(0.0))
                    .collect();
                Ok(Column::new((*name).into(), values))
            }
            Err(_) => Ok(Column::new((*name).into(), vec![0.0f64; height])),
        })
        .collect::<PipelineResult<_>>()?;

    Ok(ProcessedBatch {
        frame: DataFrame::new(columns)?,
    })
}
