//! Error types for the feature pipeline.
//!
//! Every variant is fatal for the batch being processed: the pipeline never
//! scores part of a batch.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while turning a raw batch into a processed feature matrix.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column the pipeline depends on is absent from the batch.
    #[error("column '{column}' is required by the feature pipeline but is absent from the batch")]
    MissingColumn { column: String },

    /// A currency-formatted value could not be parsed.
    #[error("column '{column}' row {row}: '{value}' is not a valid currency amount")]
    InvalidCurrency {
        column: String,
        row: usize,
        value: String,
    },

    /// A percentage-formatted value could not be parsed.
    #[error("column '{column}' row {row}: '{value}' is not a valid percentage")]
    InvalidPercentage {
        column: String,
        row: usize,
        value: String,
    },

    /// A column headed for imputation holds text.
    #[error("column '{column}' must be numeric for imputation, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    /// An input column has the same name as a generated indicator column.
    #[error("input column '{name}' collides with a generated feature of the same name")]
    FeatureNameCollision { name: String },

    /// A record in the batch is not a JSON object.
    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
