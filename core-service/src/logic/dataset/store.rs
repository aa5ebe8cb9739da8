//! Result Store - single-slot staging of the latest result set
//!
//! Holds at most one committed result set. A new run stages into its own
//! file and only becomes visible on `commit`, which swaps the slot in one
//! step. The replaced set's file is deleted as soon as the last reader
//! holding it lets go.
//!
//! Writers must be serialized by the caller (one run at a time); readers
//! may come from anywhere.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tempfile::TempPath;
use thiserror::Error;

use crate::logic::threat::{ClassificationRow, LabelCounts, ResultSet};

use super::record::StagedRecord;
use super::writer::ResultSetWriter;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No predictions available. Please analyze the file first.")]
    NoResultAvailable,

    #[error("Staging storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Staging file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid label {code} in staged row {row}")]
    InvalidLabel { code: i64, row: usize },

    #[error("Staged counts do not match: expected {expected} rows, wrote {actual}")]
    CountMismatch { expected: u64, actual: u64 },
}

// ============================================================================
// STAGED RESULT SET
// ============================================================================

/// A committed, read-only result set backed by a staging file
#[derive(Debug)]
pub struct StagedResultSet {
    path: TempPath,
    counts: LabelCounts,
    committed_at: DateTime<Utc>,
}

impl StagedResultSet {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn counts(&self) -> LabelCounts {
        self.counts
    }

    pub fn len(&self) -> u64 {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    /// Stream the rows back in the order they were classified
    pub fn rows(&self) -> Result<StagedRows, StoreError> {
        let reader = csv::Reader::from_path(&self.path)?;
        Ok(StagedRows {
            records: reader.into_deserialize(),
            row: 0,
        })
    }

    /// Load the whole set into memory
    pub fn load(&self) -> Result<ResultSet, StoreError> {
        self.rows()?.collect()
    }
}

impl Drop for StagedResultSet {
    fn drop(&mut self) {
        log::debug!("Releasing staged result set {}", self.path.display());
    }
}

pub struct StagedRows {
    records: csv::DeserializeRecordsIntoIter<File, StagedRecord>,
    row: usize,
}

impl Iterator for StagedRows {
    type Item = Result<ClassificationRow, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;

        let row = self.row;
        Some(
            record
                .map_err(StoreError::from)
                .and_then(|r| r.into_row().map_err(|code| StoreError::InvalidLabel { code, row })),
        )
    }
}

// ============================================================================
// STORE
// ============================================================================

pub struct ResultStore {
    staging_dir: PathBuf,
    slot: RwLock<Option<Arc<StagedResultSet>>>,
}

impl ResultStore {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let staging_dir = staging_dir.into();
        fs::create_dir_all(&staging_dir)?;

        Ok(Self {
            staging_dir,
            slot: RwLock::new(None),
        })
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Start staging a new result set. Invisible to readers until committed.
    pub fn begin(&self) -> Result<ResultSetWriter, StoreError> {
        ResultSetWriter::create_in(&self.staging_dir)
    }

    /// Publish a fully written result set, replacing the current one.
    ///
    /// `expected` is the tally reported by the producer; it must match what
    /// was actually written.
    pub fn commit(&self, writer: ResultSetWriter, expected: LabelCounts) -> Result<Arc<StagedResultSet>, StoreError> {
        let (path, counts) = writer.finish()?;

        if counts != expected {
            return Err(StoreError::CountMismatch {
                expected: expected.total(),
                actual: counts.total(),
            });
        }

        let staged = Arc::new(StagedResultSet {
            path,
            counts,
            committed_at: Utc::now(),
        });

        let previous = self.slot.write().replace(staged.clone());

        log::info!(
            "Prediction data saved to staging file: {} ({} rows)",
            staged.path().display(),
            staged.len()
        );
        if let Some(previous) = previous {
            log::debug!("Replaced result set {}", previous.path().display());
        }

        Ok(staged)
    }

    /// Stage and commit an in-memory result set
    pub fn replace(&self, result: &ResultSet) -> Result<Arc<StagedResultSet>, StoreError> {
        let mut writer = self.begin()?;
        for row in result.rows() {
            writer.write_row(row)?;
        }
        self.commit(writer, result.counts())
    }

    pub fn current(&self) -> Result<Arc<StagedResultSet>, StoreError> {
        self.slot.read().clone().ok_or(StoreError::NoResultAvailable)
    }

    pub fn has_result(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Drop the current result set. Returns whether there was one.
    pub fn clear(&self) -> bool {
        let previous = self.slot.write().take();
        if let Some(previous) = &previous {
            log::info!("Cleared staged result set {}", previous.path().display());
        }
        previous.is_some()
    }
}
