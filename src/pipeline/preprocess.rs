//! End-to-end feature preprocessing: raw batch to schema-aligned matrix

use std::collections::HashSet;

use polars::prelude::*;
use tracing::debug;

use super::align::{align_to_schema, ProcessedBatch};
use super::batch::RawBatch;
use super::cleanup::clean_formatted_columns;
use super::encode::one_hot_encode;
use super::error::{PipelineError, PipelineResult};
use super::missing::{classify_columns, numeric_columns};
use super::schema::{CATEGORICAL_COLUMNS, FEATURE_SCHEMA};
use super::standardize::impute_and_standardize;

/// Apply the training-time feature engineering to `batch`.
///
/// Steps, in order:
/// 1. parse the currency and percentage columns
/// 2. classify the non-categorical columns as informative or structurally empty
/// 3. mean-impute and standardize informative columns using this batch's statistics
/// 4. one-hot encode the categorical columns (drop-first, explicit missing level)
/// 5. align to the model's feature schema
pub fn preprocess(batch: &RawBatch) -> PipelineResult<ProcessedBatch> {
    preprocess_with_schema(batch, &FEATURE_SCHEMA)
}

/// Same as [`preprocess`] against an arbitrary feature schema.
///
/// # Arguments
/// * `batch` - Raw records; statistics for imputation and scaling come from these rows only
/// * `schema` - Feature names of the output, in output order. Names the batch
///   does not produce become zero columns.
///
/// # Errors
/// Fails the whole batch when a column cannot be cleaned or classified, or when
/// an input column is named like one of the generated indicators.
pub fn preprocess_with_schema(batch: &RawBatch, schema: &[&str]) -> PipelineResult<ProcessedBatch> {
    let cleaned = clean_formatted_columns(batch.frame())?;

    let numeric = numeric_columns(&cleaned, &CATEGORICAL_COLUMNS)?;
    let partition = classify_columns(&numeric);
    debug!(
        rows = batch.height(),
        informative = partition.informative.len(),
        structurally_empty = partition.structurally_empty.len(),
        "classified numeric columns"
    );

    let mut encoded_columns = impute_and_standardize(&numeric, &partition);
    let indicators = one_hot_encode(&cleaned, &CATEGORICAL_COLUMNS)?;
    debug!(indicators = indicators.len(), "encoded categorical columns");
    check_name_collisions(&encoded_columns, &indicators)?;
    encoded_columns.extend(indicators);

    let encoded = DataFrame::new(encoded_columns)?;
    let processed = align_to_schema(&encoded, schema)?;
    debug!(
        rows = processed.height(),
        features = processed.width(),
        "aligned to feature schema"
    );

    Ok(processed)
}

fn check_name_collisions(numeric: &[Column], indicators: &[Column]) -> PipelineResult<()> {
    let names: HashSet<&str> = numeric.iter().map(|c| c.name().as_str()).collect();
    match indicators.iter().find(|c| names.contains(c.name().as_str())) {
        Some(clash) => Err(PipelineError::FeatureNameCollision {
            name: clash.name().to_string(),
        }),
        None => Ok(()),
    }
}
