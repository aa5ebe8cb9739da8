//! Classification Service - operation boundary
//!
//! Wires the engine, the result store and the report materializer into the
//! two operations the transport exposes: classify and generate block report.
//!
//! Only one classification run may be in flight. A second caller is turned
//! away with `RunInProgress` instead of racing on the single result slot.

use std::io::Read;
use std::sync::Arc;

use parking_lot::Mutex;

use super::dataset::{ResultStore, StagedResultSet};
use super::pipeline::{ChunkedInferenceEngine, ClassifyError};
use super::report::{BlockReport, ReportError, ReportMaterializer};
use super::threat::LabelCounts;

pub struct ClassificationService {
    engine: ChunkedInferenceEngine,
    store: ResultStore,
    reports: ReportMaterializer,
    run_gate: Mutex<()>,
}

impl ClassificationService {
    pub fn new(engine: ChunkedInferenceEngine, store: ResultStore, reports: ReportMaterializer) -> Self {
        Self {
            engine,
            store,
            reports,
            run_gate: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &ChunkedInferenceEngine {
        &self.engine
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn reports(&self) -> &ReportMaterializer {
        &self.reports
    }

    pub fn is_running(&self) -> bool {
        self.run_gate.is_locked()
    }

    /// Classify a CSV stream and commit it as the current result set.
    ///
    /// All or nothing: on any error the previous result set stays current.
    pub fn classify<R: Read>(&self, input: R) -> Result<LabelCounts, ClassifyError> {
        let _run = self.run_gate.try_lock().ok_or(ClassifyError::RunInProgress)?;

        let mut writer = self.store.begin()?;
        let counts = self.engine.run(input, &mut writer)?;
        self.store.commit(writer, counts)?;

        Ok(counts)
    }

    /// Write a block report from the current result set
    pub fn generate_block_report(&self) -> Result<BlockReport, ReportError> {
        let current = self.store.current()?;
        self.reports.materialize(current.rows()?)
    }

    pub fn current_result(&self) -> Option<Arc<StagedResultSet>> {
        self.store.current().ok()
    }

    /// Release staged storage. Called on graceful shutdown.
    pub fn shutdown(&self) {
        if self.store.clear() {
            log::info!("Staged predictions cleaned up");
        }
    }
}
