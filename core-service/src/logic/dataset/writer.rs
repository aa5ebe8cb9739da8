use std::fs::File;
use std::path::Path;

use tempfile::TempPath;

use crate::constants::STAGING_HEADER;
use crate::logic::pipeline::RowSink;
use crate::logic::threat::{ClassificationRow, LabelCounts};

use super::store::StoreError;

/// Writer for a result set that has not been committed yet.
///
/// Owns its staging file: dropping the writer without committing it
/// deletes the file, so a failed run leaves nothing behind.
pub struct ResultSetWriter {
    writer: csv::Writer<File>,
    path: TempPath,
    counts: LabelCounts,
}

impl ResultSetWriter {
    pub(crate) fn create_in(dir: &Path) -> Result<Self, StoreError> {
        let staged = tempfile::Builder::new()
            .prefix("predictions-")
            .suffix(".csv")
            .tempfile_in(dir)?;
        let (file, path) = staged.into_parts();

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(STAGING_HEADER)?;

        log::debug!("Staging predictions in {}", path.display());

        Ok(Self {
            writer,
            path,
            counts: LabelCounts::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tally of the rows written so far
    pub fn counts(&self) -> LabelCounts {
        self.counts
    }

    pub fn write_row(&mut self, row: &ClassificationRow) -> Result<(), StoreError> {
        self.writer
            .write_record([row.identity.as_str(), row.label.code().to_string().as_str()])?;
        self.counts.record(row.label);
        Ok(())
    }

    /// Flush everything to disk and hand over the staging file
    pub(crate) fn finish(self) -> Result<(TempPath, LabelCounts), StoreError> {
        let file = self.writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
        file.sync_all()?;
        Ok((self.path, self.counts))
    }
}

impl RowSink for ResultSetWriter {
    fn push_row(&mut self, row: ClassificationRow) -> Result<(), StoreError> {
        self.write_row(&row)
    }
}
