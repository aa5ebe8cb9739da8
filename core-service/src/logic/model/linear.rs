//! Linear Classifier - JSON-serialized multinomial model
//!
//! Scores every class as `w_k . x + b_k` and picks the best one.
//! Missing feature values (NaN) contribute nothing to the score.

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::inference::{Classifier, InferenceError};

/// On-disk model format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    #[serde(default)]
    pub name: Option<String>,
    /// Class code emitted for each weight row
    pub classes: Vec<i64>,
    /// One row of feature weights per class
    pub weights: Vec<Vec<f32>>,
    /// One bias per class
    pub bias: Vec<f32>,
}

pub struct LinearClassifier {
    name: String,
    classes: Vec<i64>,
    /// Shape: (classes, features)
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl LinearClassifier {
    pub fn from_model(model: LinearModel) -> Result<Self, InferenceError> {
        let class_count = model.classes.len();
        if class_count == 0 {
            return Err(InferenceError("Model defines no classes".to_string()));
        }
        if model.weights.len() != class_count || model.bias.len() != class_count {
            return Err(InferenceError(format!(
                "Model has {} classes but {} weight rows and {} biases",
                class_count,
                model.weights.len(),
                model.bias.len()
            )));
        }

        let feature_count = model.weights[0].len();
        if model.weights.iter().any(|row| row.len() != feature_count) {
            return Err(InferenceError("Weight rows differ in length".to_string()));
        }

        let flat: Vec<f32> = model.weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((class_count, feature_count), flat)
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        Ok(Self {
            name: model.name.unwrap_or_else(|| "linear".to_string()),
            classes: model.classes,
            weights,
            bias: Array1::from(model.bias),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, InferenceError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InferenceError(format!("Failed to read model: {}", e)))?;
        let model: LinearModel = serde_json::from_str(&content)
            .map_err(|e| InferenceError(format!("Invalid model JSON: {}", e)))?;
        Self::from_model(model)
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_count(&self) -> Option<usize> {
        Some(self.weights.ncols())
    }

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError> {
        if features.ncols() != self.weights.ncols() {
            return Err(InferenceError(format!(
                "Expected {} features, got {}",
                self.weights.ncols(),
                features.ncols()
            )));
        }

        let clean = features.mapv(|v| if v.is_finite() { v } else { 0.0 });
        let scores = clean.dot(&self.weights.t()) + &self.bias;

        let labels = scores
            .axis_iter(Axis(0))
            .map(|row| {
                let mut best = 0;
                for (idx, score) in row.iter().enumerate() {
                    if *score > row[best] {
                        best = idx;
                    }
                }
                self.classes[best]
            })
            .collect();

        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Maps a single feature f in {0, 1, 2} to class code f
    fn staircase() -> LinearClassifier {
        LinearClassifier::from_model(LinearModel {
            name: None,
            classes: vec![0, 1, 2],
            weights: vec![vec![0.0], vec![1.0], vec![2.0]],
            bias: vec![0.0, -0.5, -2.4],
        })
        .unwrap()
    }

    #[test]
    fn test_argmax_per_row() {
        let model = staircase();
        let batch = array![[0.0f32], [1.0], [2.0], [1.0]];

        let labels = model.predict(batch.view()).unwrap();
        assert_eq!(labels, vec![0, 1, 2, 1]);
    }

    #[test]
    fn test_nan_treated_as_zero() {
        let model = staircase();
        let batch = array![[f32::NAN]];

        assert_eq!(model.predict(batch.view()).unwrap(), vec![0]);
    }

    #[test]
    fn test_feature_width_checked() {
        let model = staircase();
        let batch = array![[1.0f32, 2.0]];

        assert!(model.predict(batch.view()).is_err());
        assert_eq!(model.feature_count(), Some(1));
        assert_eq!(model.name(), "linear");
    }

    #[test]
    fn test_shape_validation() {
        let err = LinearClassifier::from_model(LinearModel {
            name: None,
            classes: vec![0, 1],
            weights: vec![vec![1.0]],
            bias: vec![0.0, 0.0],
        })
        .err()
        .unwrap();
        assert!(err.0.contains("weight rows"));

        let err = LinearClassifier::from_model(LinearModel {
            name: None,
            classes: vec![0, 1],
            weights: vec![vec![1.0], vec![1.0, 2.0]],
            bias: vec![0.0, 0.0],
        })
        .err()
        .unwrap();
        assert!(err.0.contains("differ"));
    }
}
