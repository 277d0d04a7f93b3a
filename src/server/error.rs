//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::pipeline::schema::invalid_data_message;
use crate::scoring::ScoringError;

pub const NOT_VALID_JSON: &str = "Not Valid JSON";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Wrong content type, unparseable body, or not an array of objects
    #[error("request body is not valid JSON: {reason}")]
    NotValidJson { reason: String },

    #[error("request is missing required columns [{}]", .missing.join(","))]
    MissingRequiredColumns { missing: Vec<&'static str> },

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("scoring task did not complete: {0}")]
    WorkerFailed(String),
}

impl ApiError {
    pub fn not_valid_json(reason: impl Into<String>) -> Self {
        ApiError::NotValidJson {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotValidJson { .. } | ApiError::MissingRequiredColumns { .. } => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::Scoring(_) | ApiError::WorkerFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::NotValidJson { reason } => {
                warn!(%reason, "rejected request body");
                NOT_VALID_JSON.to_string()
            }
            ApiError::MissingRequiredColumns { missing } => {
                warn!(missing = %missing.join(","), "rejected batch without required columns");
                invalid_data_message()
            }
            ApiError::Scoring(_) | ApiError::WorkerFailed(_) => {
                // Detail stays in the log.
                error!(error = %self, "request failed");
                INTERNAL_SERVER_ERROR.to_string()
            }
        };
        (status, body).into_response()
    }
}
