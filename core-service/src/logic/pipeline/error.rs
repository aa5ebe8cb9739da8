use thiserror::Error;

use crate::logic::dataset::StoreError;
use crate::logic::identity::IdentityError;
use crate::logic::model::InferenceError;

/// Failure of a classification run. Nothing is committed when one occurs.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Input is empty: no header row found")]
    EmptyInput,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("Model expects {expected} features but the input has {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("Classifier returned {actual} labels for {expected} rows")]
    OutputLength { expected: usize, actual: usize },

    #[error("Classifier returned invalid label {code} for row {row}")]
    InvalidLabel { code: i64, row: usize },

    #[error("Failed to read input: {0}")]
    Read(#[source] csv::Error),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("A classification run is already in progress")]
    RunInProgress,
}

impl ClassifyError {
    /// Errors the caller can fix by sending different input
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            ClassifyError::EmptyInput
                | ClassifyError::Identity(_)
                | ClassifyError::MalformedRow { .. }
                | ClassifyError::FeatureCountMismatch { .. }
                | ClassifyError::InvalidLabel { .. }
        )
    }

    /// Map a csv error raised while reading data row `row` (1-based)
    pub(crate) fn from_csv(err: csv::Error, row: usize) -> Self {
        if err.is_io_error() {
            ClassifyError::Read(err)
        } else {
            ClassifyError::MalformedRow {
                row,
                reason: err.to_string(),
            }
        }
    }
}
