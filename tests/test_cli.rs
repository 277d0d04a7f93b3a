//! Tests for CLI argument parsing and the binary's entry points

use std::path::PathBuf;

use assert_cmd::Command;
use clap::Parser;
use predicates::prelude::*;

use phatserve::cli::{Cli, Commands};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["phatserve"]);

    assert!(cli.command.is_none(), "No subcommand means serve");
    assert_eq!(cli.model, PathBuf::from("final_model.json"));
    assert_eq!(cli.bind, "0.0.0.0:1313".parse::<std::net::SocketAddr>().unwrap());
    assert_eq!(cli.event_threshold, 0.75, "Default event threshold should be 0.75");
    assert_eq!(cli.max_body_mb, 64);
    assert_eq!(cli.max_body_bytes(), 64 * 1024 * 1024);
    assert_eq!(cli.log_level, tracing::Level::INFO);
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "phatserve",
        "--model",
        "models/v2.json",
        "--bind",
        "127.0.0.1:8080",
        "--event-threshold",
        "0.5",
        "--max-body-mb",
        "8",
        "--log-level",
        "debug",
    ]);

    assert_eq!(cli.model, PathBuf::from("models/v2.json"));
    assert_eq!(cli.bind.port(), 8080);
    assert_eq!(cli.event_threshold, 0.5);
    assert_eq!(cli.max_body_mb, 8);
    assert_eq!(cli.log_level, tracing::Level::DEBUG);
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(Cli::try_parse_from(["phatserve", "--event-threshold", "1.2"]).is_err());
    assert!(Cli::try_parse_from(["phatserve", "--event-threshold", "-0.1"]).is_err());
    assert!(Cli::try_parse_from(["phatserve", "--max-body-mb", "0"]).is_err());
    assert!(Cli::try_parse_from(["phatserve", "--bind", "not-an-address"]).is_err());
}

#[test]
fn test_cli_score_subcommand() {
    let cli = Cli::parse_from(["phatserve", "-m", "m.json", "score", "batch.csv"]);
    match cli.command {
        Some(Commands::Score {
            input,
            output,
            infer_schema_length,
        }) => {
            assert_eq!(input, PathBuf::from("batch.csv"));
            assert!(output.is_none());
            assert_eq!(infer_schema_length, 10000);
        }
        None => panic!("expected score subcommand"),
    }

    let cli = Cli::parse_from([
        "phatserve",
        "score",
        "batch.csv",
        "out.parquet",
        "--infer-schema-length",
        "0",
    ]);
    match cli.command {
        Some(Commands::Score {
            output,
            infer_schema_length,
            ..
        }) => {
            assert_eq!(output, Some(PathBuf::from("out.parquet")));
            assert_eq!(infer_schema_length, 0);
        }
        None => panic!("expected score subcommand"),
    }
}

#[test]
fn test_binary_help() {
    Command::cargo_bin("phatserve")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--event-threshold"))
        .stdout(predicate::str::contains("score"));
}

#[test]
fn test_binary_fails_without_model() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");

    Command::cargo_bin("phatserve")
        .unwrap()
        .args(["--model", missing.to_str().unwrap(), "score", "batch.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load model artifact"));
}

#[test]
fn test_binary_scores_csv() {
    let (dir, model_path) = write_model_artifact();
    let input = dir.path().join("batch.csv");
    write_records(&generate_records(40, 31), &input);

    Command::cargo_bin("phatserve")
        .unwrap()
        .args(["--model", model_path.to_str().unwrap(), "score", input.to_str().unwrap()])
        .assert()
        .success();

    let output = dir.path().join("batch_scored.csv");
    assert!(output.exists(), "scored output should be written next to the input");
}
