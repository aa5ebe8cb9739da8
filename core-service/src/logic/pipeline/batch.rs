//! Batch Reader - fixed-size row batches for ML input
//!
//! Lazily splits a CSV record stream into batches of at most `batch_size`
//! rows. Each batch separates the identity column from the feature columns
//! and packs the features into a `(rows, features)` matrix.
//! Single pass: once exhausted it stays exhausted.

use std::io::Read;

use csv::StringRecordsIntoIter;
use ndarray::Array2;

use super::error::ClassifyError;

/// One batch of parsed input rows
#[derive(Debug)]
pub struct Batch {
    /// 1-based index of the first data row in this batch
    pub first_row: usize,
    /// Identity value of every row, in input order
    pub identities: Vec<String>,
    /// Feature matrix, one row per identity
    pub features: Array2<f32>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

pub struct BatchReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    columns: Vec<String>,
    identity_index: usize,
    batch_size: usize,
    rows_read: usize,
    done: bool,
}

impl<R: Read> BatchReader<R> {
    pub fn new(
        records: StringRecordsIntoIter<R>,
        columns: Vec<String>,
        identity_index: usize,
        batch_size: usize,
    ) -> Result<Self, ClassifyError> {
        if batch_size == 0 {
            return Err(ClassifyError::InvalidBatchSize);
        }

        Ok(Self {
            records,
            columns,
            identity_index,
            batch_size,
            rows_read: 0,
            done: false,
        })
    }

    /// Number of feature columns (all columns except the identity)
    pub fn feature_width(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    fn read_batch(&mut self) -> Result<Option<Batch>, ClassifyError> {
        let width = self.feature_width();
        let first_row = self.rows_read + 1;
        let mut identities = Vec::with_capacity(self.batch_size.min(1024));
        let mut values = Vec::with_capacity(self.batch_size.min(1024) * width);

        while identities.len() < self.batch_size {
            let record = match self.records.next() {
                Some(record) => record,
                None => {
                    self.done = true;
                    break;
                }
            };

            let row = self.rows_read + 1;
            let record = record.map_err(|e| ClassifyError::from_csv(e, row))?;

            if record.len() != self.columns.len() {
                return Err(ClassifyError::MalformedRow {
                    row,
                    reason: format!("expected {} fields, found {}", self.columns.len(), record.len()),
                });
            }

            for (idx, field) in record.iter().enumerate() {
                if idx == self.identity_index {
                    identities.push(field.to_string());
                } else {
                    values.push(parse_feature(field, &self.columns[idx], row)?);
                }
            }

            self.rows_read = row;
        }

        if identities.is_empty() {
            return Ok(None);
        }

        let features = Array2::from_shape_vec((identities.len(), width), values).map_err(|e| {
            ClassifyError::MalformedRow {
                row: first_row,
                reason: format!("Array error: {}", e),
            }
        })?;

        Ok(Some(Batch {
            first_row,
            identities,
            features,
        }))
    }
}

impl<R: Read> Iterator for BatchReader<R> {
    type Item = Result<Batch, ClassifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_batch() {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => None,
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Parse one feature cell. Blank cells are missing values (NaN).
fn parse_feature(field: &str, column: &str, row: usize) -> Result<f32, ClassifyError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(f32::NAN);
    }

    trimmed.parse::<f32>().map_err(|_| ClassifyError::MalformedRow {
        row,
        reason: format!("column '{}' has non-numeric value '{}'", column, field),
    })
}
