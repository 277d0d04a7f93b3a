//! Server module - the HTTP surface over the scoring context

pub mod error;
pub mod handlers;
pub mod request;

pub use error::*;
pub use handlers::STATUS_MESSAGE;
pub use request::*;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::scoring::ScoringContext;

/// Build the service: `POST /predict` and `GET /status`.
pub fn router(context: Arc<ScoringContext>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/status", get(handlers::status))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(context)
}

/// Serve `app` until Ctrl-C, letting in-flight requests finish.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining connections");
}
