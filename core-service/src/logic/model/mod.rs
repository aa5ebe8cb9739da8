//! Model Module - Classifier backends
//!
//! Keeps inference separate from ingestion so the model can be swapped.

pub mod inference;
pub mod linear;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use inference::{load_classifier, Classifier, InferenceError, LoadedModel, ModelMetadata};
pub use linear::{LinearClassifier, LinearModel};
#[cfg(feature = "onnx")]
pub use onnx::OnnxClassifier;
