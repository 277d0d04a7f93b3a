//! Decoding and gating of `/predict` request bodies

use std::collections::HashSet;

use axum::http::{header, HeaderMap};
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::pipeline::schema::missing_required_columns;

/// A missing content type is accepted; an explicit one must be JSON.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Decode a `/predict` body into records and apply the required-column gate.
///
/// The body is either a JSON array of objects or a JSON string whose content
/// is such an array.
pub fn parse_predict_body(headers: &HeaderMap, body: &[u8]) -> Result<Vec<Map<String, Value>>, ApiError> {
    if !is_json_content_type(headers) {
        return Err(ApiError::not_valid_json("content type is not JSON"));
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::not_valid_json(e.to_string()))?;
    let value = match value {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| ApiError::not_valid_json(e.to_string()))?
        }
        other => other,
    };

    let Value::Array(items) = value else {
        return Err(ApiError::not_valid_json("expected an array of records"));
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => Err(ApiError::not_valid_json(format!("record {index} is not an object"))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_required_columns(&records)?;
    Ok(records)
}

/// Every required column must appear in at least one record.
pub fn check_required_columns(records: &[Map<String, Value>]) -> Result<(), ApiError> {
    let columns: HashSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();
    let columns: Vec<&str> = columns.into_iter().collect();

    let missing = missing_required_columns(&columns);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::MissingRequiredColumns { missing })
    }
}
