use serde::{Deserialize, Serialize};

use crate::logic::threat::{ClassificationRow, Label};

/// One line of the staged prediction file (`ip_address,prediction`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StagedRecord {
    pub ip_address: String,
    pub prediction: i64,
}

impl From<&ClassificationRow> for StagedRecord {
    fn from(row: &ClassificationRow) -> Self {
        Self {
            ip_address: row.identity.clone(),
            prediction: row.label.code(),
        }
    }
}

impl StagedRecord {
    /// Convert back, rejecting codes outside the closed label set
    pub fn into_row(self) -> Result<ClassificationRow, i64> {
        let label = Label::try_from(self.prediction)?;
        Ok(ClassificationRow {
            identity: self.ip_address,
            label,
        })
    }
}
