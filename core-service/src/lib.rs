//! DDoS Shield Core
//!
//! Classifies traffic records by source IP into legitimate, low-rated attack
//! and high-rated attack, stages the result set on disk and derives block
//! list reports from it.
//!
//! ```text
//!  CSV upload ──► IdentityResolver ──► ChunkedInferenceEngine ──► ResultStore
//!                                            │ (batches)               │
//!                                            ▼                         ▼
//!                                        Classifier            ReportMaterializer ──► Reports/
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::EngineConfig;
pub use logic::dataset::{ResultStore, StagedResultSet, StoreError};
pub use logic::identity::{IdentityError, IdentityResolver};
pub use logic::model::{load_classifier, Classifier, InferenceError, LoadedModel};
pub use logic::pipeline::{ChunkedInferenceEngine, ClassifyError};
pub use logic::report::{BlockPolicy, BlockReport, ReportError, ReportMaterializer};
pub use logic::service::ClassificationService;
pub use logic::threat::{ClassificationRow, Label, LabelCounts, ResultSet};
