//! Route handlers

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;
use tracing::info;

use super::error::ApiError;
use super::request::parse_predict_body;
use crate::pipeline::RawBatch;
use crate::scoring::{ScoringContext, ScoringError};

pub const STATUS_MESSAGE: &str = "Application is up and serving requests";

/// `POST /predict`: score a batch of records.
///
/// The pipeline is CPU-bound and runs on the blocking pool.
pub async fn predict(
    State(context): State<Arc<ScoringContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Vec<Value>>, ApiError> {
    let started = Instant::now();
    let records = parse_predict_body(&headers, &body)?;
    let rows = records.len();

    let (output, events) = tokio::task::spawn_blocking(move || -> Result<_, ScoringError> {
        let batch = RawBatch::from_records(&records)?;
        let scored = context.score(&batch)?;
        Ok((scored.to_json_records()?, scored.event_count()))
    })
    .await
    .map_err(|e| ApiError::WorkerFailed(e.to_string()))??;

    info!(
        rows,
        events,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "scored batch"
    );
    Ok(Json(output))
}

/// `GET /status`: liveness check.
pub async fn status() -> &'static str {
    STATUS_MESSAGE
}
