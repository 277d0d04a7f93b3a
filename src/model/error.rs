//! Error types for model loading and scoring

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::PipelineError;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON or does not have the expected fields.
    #[error("invalid model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact lists {features} features but {coefficients} coefficients")]
    ShapeMismatch { features: usize, coefficients: usize },

    /// The artifact was trained on a different feature set than the pipeline produces.
    #[error(
        "model features do not match the feature schema (missing: [{}], unexpected: [{}])",
        .missing.join(","),
        .unexpected.join(",")
    )]
    FeatureMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("feature '{feature}' appears more than once in the model artifact")]
    DuplicateFeature { feature: String },

    #[error("coefficient for '{feature}' is not finite")]
    NonFiniteCoefficient { feature: String },

    #[error("intercept is not finite")]
    NonFiniteIntercept,

    /// The processed batch columns are not the model's features in order.
    #[error("model expects features {expected:?}, batch has {actual:?}")]
    FeatureOrder {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model returned {actual} probabilities for {expected} rows")]
    PredictionLength { expected: usize, actual: usize },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
