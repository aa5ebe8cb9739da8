//! Report Materializer
//!
//! Streams a result set once, keeps the block-worthy rows and writes them
//! with their attack type to a freshly named CSV report.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::constants::REPORT_HEADER;
use crate::logic::dataset::StoreError;
use crate::logic::threat::{ClassificationRow, Label};

use super::naming::{NameGenerator, TimestampNameGenerator};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report write failed: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    /// No classification has been committed yet
    pub fn is_no_result(&self) -> bool {
        matches!(self, ReportError::Store(StoreError::NoResultAvailable))
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// Which labels get blocked and how they are named in the report
#[derive(Debug, Clone)]
pub struct BlockPolicy {
    tags: HashMap<Label, String>,
}

impl Default for BlockPolicy {
    fn default() -> Self {
        Self::new([Label::HighRatedAttack, Label::LowRatedAttack])
    }
}

impl BlockPolicy {
    /// Block `labels`, tagged with their display names
    pub fn new<I: IntoIterator<Item = Label>>(labels: I) -> Self {
        Self {
            tags: labels
                .into_iter()
                .map(|label| (label, label.display_name().to_string()))
                .collect(),
        }
    }

    /// Block `label` under a custom tag
    pub fn with_tag(mut self, label: Label, tag: impl Into<String>) -> Self {
        self.tags.insert(label, tag.into());
        self
    }

    /// Tag for a blockable label, `None` if the label is not blocked
    pub fn tag_for(&self, label: Label) -> Option<&str> {
        self.tags.get(&label).map(String::as_str)
    }

    pub fn is_blockable(&self, label: Label) -> bool {
        self.tags.contains_key(&label)
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// A written block report
#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    pub name: String,
    pub path: PathBuf,
    pub count: usize,
    pub created_at: DateTime<Utc>,
}

/// Write the block-worthy rows of `rows` to `out`. Returns the row count.
pub fn write_report<I, W>(rows: I, policy: &BlockPolicy, out: W) -> Result<usize, ReportError>
where
    I: IntoIterator<Item = Result<ClassificationRow, StoreError>>,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(REPORT_HEADER)?;

    let mut blocked_count = 0;
    for row in rows {
        let row = row?;
        if let Some(tag) = policy.tag_for(row.label) {
            writer.write_record([row.identity.as_str(), tag])?;
            blocked_count += 1;
        }
    }

    writer.flush()?;
    Ok(blocked_count)
}

pub struct ReportMaterializer {
    reports_dir: PathBuf,
    policy: BlockPolicy,
    namer: Arc<dyn NameGenerator>,
}

impl ReportMaterializer {
    pub fn new(reports_dir: impl Into<PathBuf>, policy: BlockPolicy, namer: Arc<dyn NameGenerator>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            policy,
            namer,
        }
    }

    /// Default policy and timestamped names
    pub fn with_defaults(reports_dir: impl Into<PathBuf>) -> Self {
        Self::new(
            reports_dir,
            BlockPolicy::default(),
            Arc::new(TimestampNameGenerator::default()),
        )
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn policy(&self) -> &BlockPolicy {
        &self.policy
    }

    /// Write a new report from `rows`.
    ///
    /// The file is created with `create_new`, so a name collision fails
    /// instead of overwriting an older report. On error the partial file is
    /// removed.
    pub fn materialize<I>(&self, rows: I) -> Result<BlockReport, ReportError>
    where
        I: IntoIterator<Item = Result<ClassificationRow, StoreError>>,
    {
        fs::create_dir_all(&self.reports_dir)?;

        let name = self.namer.next_name();
        let path = self.reports_dir.join(&name);
        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;

        let count = match write_report(rows, &self.policy, file) {
            Ok(count) => count,
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&path) {
                    log::warn!("Failed to remove partial report {}: {}", path.display(), remove_err);
                }
                return Err(e);
            }
        };

        log::info!("Blocked IPs list saved: {} ({} entries)", path.display(), count);

        Ok(BlockReport {
            name,
            path,
            count,
            created_at: Utc::now(),
        })
    }
}
