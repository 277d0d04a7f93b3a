//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use phatserve::cli::score::save_frame;
use phatserve::model::{LogitModel, Model, ModelArtifact, ModelResult};
use phatserve::pipeline::schema::FEATURE_SCHEMA;
use phatserve::pipeline::{ProcessedBatch, RawBatch};
use phatserve::scoring::ScoringContext;
use phatserve::server::router;

pub const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];
pub const REGIONS: [&str; 5] = ["asia", "germany", "japan", "america", "euorpe"];
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
pub const GENDERS: [&str; 2] = ["Male", "Female"];

/// Format a value the way the upstream system writes x12: `$1,234.56`, negatives in parentheses.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let formatted = format!("${}.{:02}", grouped, cents % 100);
    if value < 0.0 {
        format!("({})", formatted)
    } else {
        formatted
    }
}

fn maybe<T: Into<Value>>(rng: &mut StdRng, null_rate: f64, value: T) -> Value {
    if rng.gen_bool(null_rate) {
        Value::Null
    } else {
        value.into()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate `n` varied raw records with every required column plus extras.
///
/// Numeric columns carry about 5% nulls; categoricals about 2%.
pub fn generate_records(n: usize, seed: u64) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n)
        .map(|_| {
            let mut record = Map::new();

            let weekday = *WEEKDAYS.choose(&mut rng).unwrap();
            let region = *REGIONS.choose(&mut rng).unwrap();
            let month = *MONTHS.choose(&mut rng).unwrap();
            let gender = *GENDERS.choose(&mut rng).unwrap();
            record.insert("x5".into(), maybe(&mut rng, 0.02, weekday));
            record.insert("x31".into(), maybe(&mut rng, 0.02, region));
            record.insert("x81".into(), maybe(&mut rng, 0.02, month));
            record.insert("x82".into(), maybe(&mut rng, 0.02, gender));

            let amount = rng.gen_range(-2_000.0..25_000.0);
            record.insert("x12".into(), maybe(&mut rng, 0.05, format_currency(amount)));
            let pct = round2(rng.gen_range(0.0..100.0));
            record.insert("x63".into(), maybe(&mut rng, 0.05, format!("{}%", pct)));

            for column in ["x91", "x53", "x44", "x62", "x58", "x56", "x0", "x1", "x2"] {
                let value = round2(rng.gen_range(-50.0..50.0));
                record.insert(column.into(), maybe(&mut rng, 0.05, value));
            }

            Value::Object(record)
        })
        .collect()
}

/// Artifact over the full feature schema with fixed, non-trivial coefficients
pub fn schema_artifact(intercept: f64) -> ModelArtifact {
    ModelArtifact {
        name: Some("fixture".to_string()),
        features: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
        coefficients: (0..FEATURE_SCHEMA.len())
            .map(|i| (if i % 2 == 0 { 0.35 } else { -0.2 }) * (1.0 + i as f64 / 10.0))
            .collect(),
        intercept,
    }
}

pub fn schema_model() -> LogitModel {
    LogitModel::from_artifact(schema_artifact(0.0), &FEATURE_SCHEMA).unwrap()
}

/// Write an artifact into a fresh temp directory
pub fn write_model_artifact() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("final_model.json");
    schema_artifact(0.0).write(&path).unwrap();
    (dir, path)
}

/// Write raw records to CSV or Parquet, chosen by extension
pub fn write_records(records: &[Value], path: &Path) {
    let mut frame = RawBatch::from_values(records).unwrap().frame().clone();
    save_frame(&mut frame, path).unwrap();
}

/// Model that returns the same probability for every row
pub struct ConstantModel {
    pub phat: f64,
    pub features: Vec<String>,
}

impl ConstantModel {
    pub fn new(phat: f64) -> Self {
        Self {
            phat,
            features: FEATURE_SCHEMA.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Model for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, batch: &ProcessedBatch) -> ModelResult<Vec<f64>> {
        Ok(vec![self.phat; batch.height()])
    }
}

pub fn test_router(model: Arc<dyn Model>) -> Router {
    let context = Arc::new(ScoringContext::new(model, 0.75));
    router(context, 64 * 1024 * 1024)
}

pub fn predict_request(body: impl Into<Body>, content_type: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/predict");
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn json_body(records: &[Value]) -> String {
    serde_json::to_string(&json!(records)).unwrap()
}

/// Send one request through the router and collect status and body text
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// POST `records` as JSON and parse the scored response
pub async fn predict(app: Router, records: &[Value]) -> (StatusCode, Vec<Value>) {
    let (status, body) = send(app, predict_request(json_body(records), Some("application/json"))).await;
    let parsed = if status == StatusCode::OK {
        serde_json::from_str(&body).unwrap()
    } else {
        Vec::new()
    };
    (status, parsed)
}
