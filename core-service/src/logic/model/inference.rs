//! Inference Engine - Classifier abstraction
//!
//! The trained model is opaque: a batch of feature rows goes in, one class
//! code per row comes out. Backends live next to this file so they can be
//! swapped without touching the pipeline.

use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::linear::LinearClassifier;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for classifier backends (linear JSON model, ONNX, ...)
pub trait Classifier: Send + Sync {
    /// Short human-readable model name
    fn name(&self) -> &str;

    /// Number of input features the model expects, when known
    fn feature_count(&self) -> Option<usize> {
        None
    }

    /// Predict one class code per input row, in row order
    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError>;
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String, // "linear" or "onnx"
    pub features: Option<usize>,
    pub loaded_at: DateTime<Utc>,
}

/// A loaded classifier plus where it came from
pub struct LoadedModel {
    pub classifier: Box<dyn Classifier>,
    pub metadata: ModelMetadata,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load a classifier, picking the backend from the file extension
pub fn load_classifier(model_path: &Path) -> Result<LoadedModel, InferenceError> {
    log::info!("Loading model from: {}", model_path.display());

    if !model_path.exists() {
        return Err(InferenceError(format!("Model not found: {}", model_path.display())));
    }

    let extension = model_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let (classifier, model_type): (Box<dyn Classifier>, &str) = match extension.as_str() {
        "json" => (Box::new(LinearClassifier::from_file(model_path)?), "linear"),
        "onnx" => (load_onnx(model_path)?, "onnx"),
        other => {
            return Err(InferenceError(format!(
                "Unsupported model format '{}' (expected .json or .onnx)",
                other
            )))
        }
    };

    let metadata = ModelMetadata {
        model_path: model_path.display().to_string(),
        model_type: model_type.to_string(),
        features: classifier.feature_count(),
        loaded_at: Utc::now(),
    };

    log::info!(
        "Model '{}' loaded ({} backend, {} features)",
        classifier.name(),
        metadata.model_type,
        metadata
            .features
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    );

    Ok(LoadedModel { classifier, metadata })
}

#[cfg(feature = "onnx")]
fn load_onnx(model_path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
    Ok(Box::new(super::onnx::OnnxClassifier::from_file(model_path)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_model_path: &Path) -> Result<Box<dyn Classifier>, InferenceError> {
    Err(InferenceError(
        "ONNX models require building with the `onnx` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_model_rejected() {
        let err = load_classifier(Path::new("/nonexistent/model.json")).err().unwrap();
        assert!(err.0.contains("Model not found"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.pkl");
        std::fs::write(&path, b"not a model").unwrap();

        let err = load_classifier(&path).err().unwrap();
        assert!(err.0.contains("Unsupported model format"));
    }

    #[test]
    fn test_load_linear_model() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"name":"tiny","classes":[1,0],"weights":[[0.0,0.0],[1.0,1.0]],"bias":[0.5,0.0]}"#,
        )
        .unwrap();

        let loaded = load_classifier(&path).unwrap();
        assert_eq!(loaded.classifier.name(), "tiny");
        assert_eq!(loaded.metadata.model_type, "linear");
        assert_eq!(loaded.metadata.features, Some(2));
    }
}
