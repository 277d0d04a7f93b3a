//! Logistic regression scorer

use std::collections::{HashMap, HashSet};
use std::path::Path;

use faer::Mat;

use super::artifact::ModelArtifact;
use super::error::{ModelError, ModelResult};
use super::Model;
use crate::pipeline::schema::FEATURE_SCHEMA;
use crate::pipeline::ProcessedBatch;

/// Fitted logit: `phat = 1 / (1 + exp(-(intercept + x . coefficients)))`
///
/// Coefficients are stored in feature-schema order, so a processed batch can
/// be multiplied directly.
#[derive(Debug, Clone, PartialEq)]
pub struct LogitModel {
    name: String,
    features: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogitModel {
    /// Load and validate an artifact against the model feature schema.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let artifact = ModelArtifact::read(path)?;
        Self::from_artifact(artifact, &FEATURE_SCHEMA)
    }

    /// Validate `artifact` and reorder its coefficients into `schema` order.
    pub fn from_artifact(artifact: ModelArtifact, schema: &[&str]) -> ModelResult<Self> {
        if artifact.features.len() != artifact.coefficients.len() {
            return Err(ModelError::ShapeMismatch {
                features: artifact.features.len(),
                coefficients: artifact.coefficients.len(),
            });
        }
        if !artifact.intercept.is_finite() {
            return Err(ModelError::NonFiniteIntercept);
        }

        let mut by_name: HashMap<&str, f64> = HashMap::with_capacity(artifact.features.len());
        for (feature, &coefficient) in artifact.features.iter().zip(&artifact.coefficients) {
            if !coefficient.is_finite() {
                return Err(ModelError::NonFiniteCoefficient {
                    feature: feature.clone(),
                });
            }
            if by_name.insert(feature.as_str(), coefficient).is_some() {
                return Err(ModelError::DuplicateFeature {
                    feature: feature.clone(),
                });
            }
        }

        let schema_set: HashSet<&str> = schema.iter().copied().collect();
        let missing: Vec<String> = schema
            .iter()
            .filter(|name| !by_name.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        let unexpected: Vec<String> = artifact
            .features
            .iter()
            .filter(|name| !schema_set.contains(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(ModelError::FeatureMismatch { missing, unexpected });
        }

        let coefficients = schema.iter().map(|name| by_name[*name]).collect();

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| "logit".to_string()),
            features: schema.iter().map(|s| s.to_string()).collect(),
            coefficients,
            intercept: artifact.intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Linear predictor per row, via a dense matrix-vector product.
    fn linear_predictor(&self, batch: &ProcessedBatch) -> ModelResult<Vec<f64>> {
        let x = batch.to_matrix()?;
        let beta = Mat::from_fn(self.coefficients.len(), 1, |i, _| self.coefficients[i]);
        let eta = x.as_ref() * beta.as_ref();
        Ok((0..eta.nrows()).map(|i| eta[(i, 0)] + self.intercept).collect())
    }
}

impl Model for LogitModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn predict(&self, batch: &ProcessedBatch) -> ModelResult<Vec<f64>> {
        let actual = batch.feature_names();
        if actual != self.features {
            return Err(ModelError::FeatureOrder {
                expected: self.features.clone(),
                actual,
            });
        }

        Ok(self
            .linear_predictor(batch)?
            .into_iter()
            .map(sigmoid)
            .collect())
    }
}

/// Logistic function, evaluated without overflow for large |z|.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
