//! Pipeline Module - Streaming classification
//!
//! ## Structure
//! - `batch`: lazy fixed-size batches over a CSV record stream
//! - `engine`: chunked inference, label tally, ordered row sink
//! - `error`: `ClassifyError`
//!
//! ## Usage
//! ```ignore
//! let engine = ChunkedInferenceEngine::new(classifier, &EngineConfig::default())?;
//! let result = engine.classify(std::fs::File::open("traffic.csv")?)?;
//! println!("{} attacks", result.counts().attacks());
//! ```

pub mod batch;
pub mod engine;
pub mod error;


pub use batch::{Batch, BatchReader};
pub use engine::{ChunkedInferenceEngine, RowSink};
pub use error::ClassifyError;
