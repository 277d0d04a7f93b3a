//! CLI module - argument parsing and offline scoring

mod args;
pub mod score;

pub use args::{scored_output_path, Cli, Commands};
