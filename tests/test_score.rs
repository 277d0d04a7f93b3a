//! Integration tests for offline file scoring

use std::sync::Arc;

use polars::prelude::*;

use phatserve::cli::score::{load_frame, run_score};
use phatserve::scoring::ScoringContext;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_score_csv_writes_sorted_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("applicants.csv");
    write_records(&generate_records(120, 77), &input);

    let context = ScoringContext::new(Arc::new(schema_model()), 0.75);
    let summary = run_score(&context, &input, None, 10000).unwrap();
    assert_eq!(summary.rows, 120);
    assert_eq!(summary.events + summary.non_events(), 120);

    let output = load_frame(&dir.path().join("applicants_scored.csv"), 0).unwrap();
    assert_eq!(output.height(), 120);

    let names = column_names(&output);
    let (inputs, results) = names.split_at(names.len() - 2);
    assert_eq!(results, ["phat", "business_outcome"]);
    let mut sorted = inputs.to_vec();
    sorted.sort();
    assert_eq!(inputs, sorted.as_slice());

    let phat = output.column("phat").unwrap().f64().unwrap();
    let labels = output.column("business_outcome").unwrap().str().unwrap();
    for (p, label) in phat.into_iter().zip(labels.into_iter()) {
        let expected = if p.unwrap() >= 0.75 { "Event" } else { "Non-Event" };
        assert_eq!(label, Some(expected));
    }
}

#[test]
fn test_file_scoring_matches_single_request() {
    let records = generate_records(60, 5);
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("batch.parquet");
    let output = dir.path().join("scored.parquet");
    write_records(&records, &input);

    let context = ScoringContext::new(Arc::new(schema_model()), 0.75);
    run_score(&context, &input, Some(&output), 10000).unwrap();
    let from_file = load_frame(&output, 0).unwrap();

    let batch = phatserve::pipeline::RawBatch::from_values(&records).unwrap();
    let direct = context.score(&batch).unwrap();

    let file_phat: Vec<f64> = from_file
        .column("phat")
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(file_phat.len(), direct.len());
    for (a, b) in file_phat.iter().zip(direct.phat()) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn test_score_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("batch.json");
    std::fs::write(&input, "[]").unwrap();

    let context = ScoringContext::new(Arc::new(schema_model()), 0.75);
    assert!(run_score(&context, &input, None, 100).is_err());
}

#[test]
fn test_score_rejects_file_missing_required_column() {
    let mut records = generate_records(20, 9);
    for record in records.iter_mut() {
        record.as_object_mut().unwrap().remove("x62");
    }
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("partial.csv");
    write_records(&records, &input);

    let context = ScoringContext::new(Arc::new(schema_model()), 0.75);
    let err = run_score(&context, &input, None, 10000).unwrap_err();
    assert!(err.to_string().contains("missing: x62"), "{err}");
    assert!(!dir.path().join("partial_scored.csv").exists());
}
