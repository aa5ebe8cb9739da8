//! Dataset Module - Staged classification results
//!
//! Keeps the latest result set on disk between the classify and report
//! phases. Stores data as a two-column CSV (`ip_address,prediction`).
//! The file format is internal; only the round trip matters.

pub mod record;
pub mod store;
pub mod writer;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::constants::STAGING_DIR_NAME;

pub use record::StagedRecord;
pub use store::{ResultStore, StagedResultSet, StagedRows, StoreError};
pub use writer::ResultSetWriter;

/// Get the default directory for staged predictions
pub fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}
