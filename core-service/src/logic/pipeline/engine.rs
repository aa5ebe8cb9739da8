//! Chunked Inference Engine
//!
//! Streams a CSV table through the classifier batch by batch:
//! resolve the identity column once, split identities from features,
//! predict per batch, tally labels and hand every row to a sink in input
//! order. Batch size only bounds memory; it never changes the result.

use std::io::Read;
use std::sync::Arc;
use std::time::Instant;

use crate::logic::config::EngineConfig;
use crate::logic::dataset::StoreError;
use crate::logic::identity::IdentityResolver;
use crate::logic::model::Classifier;
use crate::logic::threat::{ClassificationRow, Label, LabelCounts, ResultSet};

use super::batch::BatchReader;
use super::error::ClassifyError;

// ============================================================================
// ROW SINK
// ============================================================================

/// Destination for classified rows, fed strictly in input order
pub trait RowSink {
    fn push_row(&mut self, row: ClassificationRow) -> Result<(), StoreError>;
}

impl RowSink for ResultSet {
    fn push_row(&mut self, row: ClassificationRow) -> Result<(), StoreError> {
        self.push(row);
        Ok(())
    }
}

// ============================================================================
// ENGINE
// ============================================================================

pub struct ChunkedInferenceEngine {
    classifier: Arc<dyn Classifier>,
    resolver: IdentityResolver,
    batch_size: usize,
}

impl ChunkedInferenceEngine {
    pub fn new(classifier: Arc<dyn Classifier>, config: &EngineConfig) -> Result<Self, ClassifyError> {
        if config.batch_size == 0 {
            return Err(ClassifyError::InvalidBatchSize);
        }

        Ok(Self {
            classifier,
            resolver: IdentityResolver::new(&config.identity_aliases),
            batch_size: config.batch_size,
        })
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Classify `input` into an in-memory result set
    pub fn classify<R: Read>(&self, input: R) -> Result<ResultSet, ClassifyError> {
        let mut result = ResultSet::new();
        let counts = self.run(input, &mut result)?;
        debug_assert_eq!(counts, result.counts());
        Ok(result)
    }

    /// Classify `input`, pushing every row into `sink`. Returns the final counts.
    pub fn run<R: Read, S: RowSink>(&self, input: R, sink: &mut S) -> Result<LabelCounts, ClassifyError> {
        let started = Instant::now();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(input);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| ClassifyError::from_csv(e, 0))?
            .iter()
            .map(String::from)
            .collect();

        if columns.is_empty() {
            return Err(ClassifyError::EmptyInput);
        }

        let identity = self.resolver.resolve(&columns)?;
        let feature_width = columns.len() - 1;

        if let Some(expected) = self.classifier.feature_count() {
            if expected != feature_width {
                return Err(ClassifyError::FeatureCountMismatch {
                    expected,
                    actual: feature_width,
                });
            }
        }

        log::info!(
            "Classifying with '{}': identity column '{}' ({} features, batch size {})",
            self.classifier.name(),
            identity.name,
            feature_width,
            self.batch_size
        );

        let batches = BatchReader::new(reader.into_records(), columns, identity.index, self.batch_size)?;
        let mut counts = LabelCounts::default();

        for batch in batches {
            let batch = batch?;
            let codes = self.classifier.predict(batch.features.view())?;

            if codes.len() != batch.len() {
                return Err(ClassifyError::OutputLength {
                    expected: batch.len(),
                    actual: codes.len(),
                });
            }

            for (offset, (identity, code)) in batch.identities.into_iter().zip(codes).enumerate() {
                let label = Label::from_code(code).ok_or(ClassifyError::InvalidLabel {
                    code,
                    row: batch.first_row + offset,
                })?;
                counts.record(label);
                sink.push_row(ClassificationRow { identity, label })?;
            }

            log::debug!(
                "Batch starting at row {} classified, {} rows so far",
                batch.first_row,
                counts.total()
            );
        }

        log::info!(
            "Classification finished in {} ms - Legitimate: {}, Low-rated: {}, High-rated: {}",
            started.elapsed().as_millis(),
            counts.legitimate,
            counts.low_rated,
            counts.high_rated
        );

        Ok(counts)
    }
}
