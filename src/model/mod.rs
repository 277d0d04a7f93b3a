//! Model module - the immutable scorer applied to processed batches

pub mod artifact;
pub mod error;
pub mod logit;

pub use artifact::*;
pub use error::*;
pub use logit::*;

use crate::pipeline::ProcessedBatch;

/// A trained, read-only scoring function.
///
/// Loaded once at startup and shared across concurrent requests, so
/// implementations must not mutate state while predicting.
pub trait Model: Send + Sync {
    fn name(&self) -> &str;

    /// Feature names the model consumes, in column order
    fn feature_names(&self) -> &[String];

    /// Probability of the positive class for every row of `batch`
    fn predict(&self, batch: &ProcessedBatch) -> ModelResult<Vec<f64>>;
}

/// Score `batch`, checking that exactly one probability comes back per row.
pub fn predict_phat(model: &dyn Model, batch: &ProcessedBatch) -> ModelResult<Vec<f64>> {
    let phat = model.predict(batch)?;
    if phat.len() != batch.height() {
        return Err(ModelError::PredictionLength {
            expected: batch.height(),
            actual: phat.len(),
        });
    }
    Ok(phat)
}
