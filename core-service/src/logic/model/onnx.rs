//! ONNX Classifier - ONNX Runtime Integration
//!
//! Runs a classifier exported to ONNX (e.g. a gradient boosted model
//! converted with onnxmltools). Input is one `(rows, features)` f32 tensor;
//! the `label` output (or the first output) holds one class per row.

use std::path::Path;

use ndarray::ArrayView2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::inference::{Classifier, InferenceError};

pub struct OnnxClassifier {
    name: String,
    output_name: String,
    session: Mutex<Session>,
}

impl OnnxClassifier {
    pub fn from_file(model_path: &Path) -> Result<Self, InferenceError> {
        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name == "label")
            .or_else(|| session.outputs.first())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        let name = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
            .to_string();

        log::info!("ONNX model loaded, reading labels from output '{}'", output_name);

        Ok(Self {
            name,
            output_name,
            session: Mutex::new(session),
        })
    }
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: ArrayView2<'_, f32>) -> Result<Vec<i64>, InferenceError> {
        let input_tensor = Value::from_array(features.to_owned())
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        // Tree ensembles export int64 labels, some converters emit floats
        if let Ok(tensor) = output.try_extract_tensor::<i64>() {
            return Ok(tensor.1.to_vec());
        }

        let tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        Ok(tensor.1.iter().map(|v| v.round() as i64).collect())
    }
}
