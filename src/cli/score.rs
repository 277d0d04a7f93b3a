//! Offline scoring of CSV and Parquet files

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::*;
use tracing::info;

use super::args::scored_output_path;
use crate::pipeline::schema::{invalid_data_message, missing_required_columns};
use crate::pipeline::RawBatch;
use crate::report::ScoringSummary;
use crate::scoring::ScoringContext;
use crate::utils::{create_spinner, finish_with_success};

/// Score every row of `input` as one batch and write the results.
///
/// Statistics for imputation and standardization come from the whole file,
/// exactly as for a single `/predict` request carrying the same rows.
pub fn run_score(
    context: &ScoringContext,
    input: &Path,
    output: Option<&Path>,
    infer_schema_length: usize,
) -> Result<ScoringSummary> {
    let output_path = scored_output_path(input, output);

    println!("\n {} Scoring {}", style("◆").cyan().bold(), style(context.model().name()).yellow());
    println!("   Input:  {}", style(input.display()).dim());
    println!("   Output: {}", style(output_path.display()).dim());
    println!();

    let start = Instant::now();
    let spinner = create_spinner("Reading input...");
    let frame = load_frame(input, infer_schema_length)?;
    finish_with_success(
        &spinner,
        &format!("Loaded {} rows × {} columns", frame.height(), frame.width()),
    );
    let load_time = start.elapsed();

    let missing = missing_required_columns(&frame.get_column_names());
    if !missing.is_empty() {
        anyhow::bail!(
            "{} (missing: {})",
            invalid_data_message(),
            missing.join(",")
        );
    }

    let spinner = create_spinner("Scoring...");
    let batch = RawBatch::from_frame(frame);
    let (scored, timings) = context
        .score_timed(&batch)
        .with_context(|| format!("Failed to score {}", input.display()))?;
    finish_with_success(&spinner, &format!("Scored {} rows", scored.len()));

    let start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    let mut result = scored.to_frame()?;
    save_frame(&mut result, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    let save_time = start.elapsed();

    let mut summary = ScoringSummary::new(&scored, context.threshold());
    summary.set_load_time(load_time);
    summary.set_scoring_timings(timings);
    summary.set_save_time(save_time);

    info!(
        rows = summary.rows,
        events = summary.events,
        output = %output_path.display(),
        "offline scoring complete"
    );

    Ok(summary)
}

/// Load a CSV or Parquet file fully into memory
pub fn load_frame(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Save a frame to CSV or Parquet based on the file extension
pub fn save_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
