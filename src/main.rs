//! phatserve: scoring service
//!
//! Serves `POST /predict` and `GET /status` over a trained logit model, or
//! scores a file offline with the `score` subcommand.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use phatserve::cli::{score::run_score, Cli, Commands};
use phatserve::model::{LogitModel, Model};
use phatserve::report::ModelCard;
use phatserve::scoring::ScoringContext;
use phatserve::server;
use phatserve::utils::{
    create_spinner, finish_with_error, finish_with_success, print_banner, print_config,
    print_info, print_listening, print_success,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    if let Some(Commands::Score {
        input,
        output,
        infer_schema_length,
    }) = &cli.command
    {
        let model = load_model(&cli.model)?;
        ModelCard::new(&model, &cli.model).display();
        let context = ScoringContext::new(Arc::new(model), cli.event_threshold);

        let input = input.clone();
        let output = output.clone();
        let infer_schema_length = *infer_schema_length;
        let summary = tokio::task::spawn_blocking(move || {
            run_score(&context, &input, output.as_deref(), infer_schema_length)
        })
        .await
        .context("Scoring task panicked")??;

        summary.display();
        println!();
        return Ok(());
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.model, &cli.bind, cli.event_threshold, cli.max_body_mb);

    let model = load_model(&cli.model)?;
    print_success("Model matches the feature schema");
    ModelCard::new(&model, &cli.model).display();

    info!(
        model = model.name(),
        features = model.feature_names().len(),
        threshold = cli.event_threshold,
        "model loaded"
    );
    let context = Arc::new(ScoringContext::new(Arc::new(model), cli.event_threshold));

    let listener = TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    print_listening(&addr);
    print_info("Press Ctrl-C to stop");
    info!(%addr, "listening");

    server::serve(listener, server::router(context, cli.max_body_bytes()))
        .await
        .context("HTTP server failed")?;

    info!("server stopped");
    Ok(())
}

/// Load and validate the model artifact behind a spinner
fn load_model(path: &Path) -> Result<LogitModel> {
    let spinner = create_spinner("Loading model artifact...");
    match LogitModel::load(path) {
        Ok(model) => {
            finish_with_success(
                &spinner,
                &format!(
                    "Loaded model '{}' ({} features)",
                    model.name(),
                    model.feature_names().len()
                ),
            );
            Ok(model)
        }
        Err(e) => {
            finish_with_error(&spinner, "Model artifact could not be loaded");
            Err(e).with_context(|| format!("Failed to load model artifact: {}", path.display()))
        }
    }
}
