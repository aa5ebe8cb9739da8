use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::constants::REPORT_PREFIX;

/// Process-wide sequence so two reports in the same millisecond still differ
static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Produces a fresh report file name on every call
pub trait NameGenerator: Send + Sync {
    fn next_name(&self) -> String;
}

/// `<prefix>_YYYYmmdd_HHMMSS_mmm_<seq>.csv`
#[derive(Debug, Clone)]
pub struct TimestampNameGenerator {
    prefix: String,
}

impl Default for TimestampNameGenerator {
    fn default() -> Self {
        Self::new(REPORT_PREFIX)
    }
}

impl TimestampNameGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl NameGenerator for TimestampNameGenerator {
    fn next_name(&self) -> String {
        let sequence = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        // timestamp format: YYYYmmdd_HHMMSS_mmm
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
        format!("{}_{}_{:04}.csv", self.prefix, timestamp, sequence)
    }
}
