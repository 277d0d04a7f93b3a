//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// phatserve - Score batches of records with the trained logit model
#[derive(Parser, Debug)]
#[command(name = "phatserve")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model artifact (JSON with features, coefficients and intercept)
    #[arg(short, long, default_value = "final_model.json")]
    pub model: PathBuf,

    /// Address the HTTP server listens on
    #[arg(short, long, default_value = "0.0.0.0:1313")]
    pub bind: SocketAddr,

    /// Probability at or above which a record is labelled "Event" (0.0 to 1.0)
    #[arg(long, default_value = "0.75", value_parser = validate_event_threshold)]
    pub event_threshold: f64,

    /// Maximum accepted request body size in megabytes
    #[arg(long, default_value = "64", value_parser = validate_max_body_mb)]
    pub max_body_mb: usize,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a CSV or Parquet file offline and write the results
    Score {
        /// Input file path (CSV or Parquet)
        input: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to the input directory with a '_scored' suffix (e.g., data.csv -> data_scored.csv).
        output: Option<PathBuf>,

        /// Number of rows to use for schema inference (CSV only).
        /// Use 0 for full table scan.
        #[arg(long, default_value = "10000")]
        infer_schema_length: usize,
    },
}

impl Cli {
    /// Request body limit in bytes
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb.saturating_mul(1024 * 1024)
    }
}

/// Output path for offline scoring, deriving it from the input when not given.
pub fn scored_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    output.map(Path::to_path_buf).unwrap_or_else(|| {
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv");
        parent.join(format!("{}_scored.{}", stem, extension))
    })
}

/// Validator for event_threshold parameter
fn validate_event_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "event_threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for max_body_mb parameter
fn validate_max_body_mb(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid size", s))?;

    if value == 0 {
        Err("max_body_mb must be greater than 0".to_string())
    } else {
        Ok(value)
    }
}
