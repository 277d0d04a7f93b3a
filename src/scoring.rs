//! Scoring context shared by the HTTP handlers and the offline scorer

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::model::{predict_phat, Model, ModelError};
use crate::pipeline::{preprocess, PipelineError, RawBatch};
use crate::report::{postprocess, ScoredBatch};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("preprocessing failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("prediction failed: {0}")]
    Model(#[from] ModelError),
}

/// Wall-clock time spent in each scoring stage
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringTimings {
    pub preprocess: Duration,
    pub predict: Duration,
    pub postprocess: Duration,
}

impl ScoringTimings {
    pub fn total(&self) -> Duration {
        self.preprocess + self.predict + self.postprocess
    }
}

/// Loaded model plus the event cut-off. Read-only once built.
#[derive(Clone)]
pub struct ScoringContext {
    model: Arc<dyn Model>,
    threshold: f64,
}

impl ScoringContext {
    pub fn new(model: Arc<dyn Model>, threshold: f64) -> Self {
        Self { model, threshold }
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run one batch through preprocessing, prediction and postprocessing.
    pub fn score(&self, batch: &RawBatch) -> Result<ScoredBatch, ScoringError> {
        self.score_timed(batch).map(|(scored, _)| scored)
    }

    pub fn score_timed(&self, batch: &RawBatch) -> Result<(ScoredBatch, ScoringTimings), ScoringError> {
        let mut timings = ScoringTimings::default();

        let start = Instant::now();
        let processed = preprocess(batch)?;
        timings.preprocess = start.elapsed();

        let start = Instant::now();
        let phat = predict_phat(self.model(), &processed)?;
        timings.predict = start.elapsed();

        let start = Instant::now();
        let scored = postprocess(batch, phat, self.threshold)?;
        timings.postprocess = start.elapsed();

        debug!(
            rows = scored.len(),
            events = scored.event_count(),
            elapsed_ms = timings.total().as_millis() as u64,
            "scored batch"
        );

        Ok((scored, timings))
    }
}
