//! Serialized form of a trained model

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ModelError, ModelResult};

/// Persisted logistic-regression fit.
///
/// ```json
/// {
///   "name": "final_model",
///   "features": ["x5_saturday", "x81_July", "..."],
///   "coefficients": [0.41, -1.2, "..."],
///   "intercept": 0.0
/// }
/// ```
///
/// `features` and `coefficients` are parallel arrays; their order need not
/// match the feature schema. A missing `intercept` means the model was fit
/// without a constant term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub name: Option<String>,
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an artifact from disk. Called once at startup.
    pub fn read(path: &Path) -> ModelResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn write(&self, path: &Path) -> ModelResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intercept_defaults_to_zero() {
        let artifact = ModelArtifact::from_json(r#"{"features": ["a"], "coefficients": [1.5]}"#).unwrap();
        assert_eq!(artifact.intercept, 0.0);
        assert_eq!(artifact.name, None);
    }

    #[test]
    fn test_rejects_malformed_artifact() {
        let err = ModelArtifact::from_json(r#"{"features": ["a"]}"#).unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let err = ModelArtifact::read(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
