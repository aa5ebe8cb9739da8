//! Threat Types
//!
//! Core types for traffic classification.
//! No logic beyond bookkeeping - just data structures.

use serde::{Deserialize, Serialize};

// ============================================================================
// LABEL
// ============================================================================

/// Classifier output for a single traffic record.
///
/// The integer codes are fixed by the trained model:
/// `0` high-rated attack, `1` legitimate, `2` low-rated attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    HighRatedAttack,
    Legitimate,
    LowRatedAttack,
}

impl Label {
    /// All labels, ordered by code
    pub const ALL: [Label; 3] = [Label::HighRatedAttack, Label::Legitimate, Label::LowRatedAttack];

    /// Integer code as emitted by the model
    pub fn code(&self) -> i64 {
        match self {
            Label::HighRatedAttack => 0,
            Label::Legitimate => 1,
            Label::LowRatedAttack => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Label::HighRatedAttack),
            1 => Some(Label::Legitimate),
            2 => Some(Label::LowRatedAttack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::HighRatedAttack => "high_rated_attack",
            Label::Legitimate => "legitimate",
            Label::LowRatedAttack => "low_rated_attack",
        }
    }

    /// Human-readable name, used as the attack type in block reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Label::HighRatedAttack => "High-Rated Attack",
            Label::Legitimate => "Legitimate",
            Label::LowRatedAttack => "Low-Rated Attack",
        }
    }

    pub fn is_attack(&self) -> bool {
        !matches!(self, Label::Legitimate)
    }
}

impl TryFrom<i64> for Label {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Label::from_code(code).ok_or(code)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLASSIFICATION ROW
// ============================================================================

/// One classified record: the source identity and its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRow {
    pub identity: String,
    pub label: Label,
}

impl ClassificationRow {
    pub fn new(identity: impl Into<String>, label: Label) -> Self {
        Self {
            identity: identity.into(),
            label,
        }
    }
}

// ============================================================================
// LABEL COUNTS
// ============================================================================

/// Running per-label tally of a classification run.
///
/// Serializes with the field names the HTTP API returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    #[serde(rename = "legitimate_count")]
    pub legitimate: u64,
    #[serde(rename = "low_rated_count")]
    pub low_rated: u64,
    #[serde(rename = "high_rated_count")]
    pub high_rated: u64,
}

impl LabelCounts {
    pub fn record(&mut self, label: Label) {
        match label {
            Label::Legitimate => self.legitimate += 1,
            Label::LowRatedAttack => self.low_rated += 1,
            Label::HighRatedAttack => self.high_rated += 1,
        }
    }

    pub fn get(&self, label: Label) -> u64 {
        match label {
            Label::Legitimate => self.legitimate,
            Label::LowRatedAttack => self.low_rated,
            Label::HighRatedAttack => self.high_rated,
        }
    }

    pub fn total(&self) -> u64 {
        self.legitimate + self.low_rated + self.high_rated
    }

    pub fn attacks(&self) -> u64 {
        self.low_rated + self.high_rated
    }
}

// ============================================================================
// RESULT SET
// ============================================================================

/// In-memory result of one classification run.
///
/// Rows keep input order and the counts always tally with the rows,
/// since `push` is the only way in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<ClassificationRow>,
    counts: LabelCounts,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ClassificationRow) {
        self.counts.record(row.label);
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ClassificationRow] {
        &self.rows
    }

    pub fn counts(&self) -> LabelCounts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ClassificationRow> {
        self.rows
    }
}

impl FromIterator<ClassificationRow> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ClassificationRow>>(iter: T) -> Self {
        let mut result = ResultSet::new();
        for row in iter {
            result.push(row);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_codes_roundtrip() {
        for label in Label::ALL {
            assert_eq!(Label::from_code(label.code()), Some(label));
        }
        assert_eq!(Label::try_from(3), Err(3));
        assert_eq!(Label::try_from(-1), Err(-1));
    }

    #[test]
    fn test_model_code_contract() {
        assert_eq!(Label::from_code(0), Some(Label::HighRatedAttack));
        assert_eq!(Label::from_code(1), Some(Label::Legitimate));
        assert_eq!(Label::from_code(2), Some(Label::LowRatedAttack));
    }

    #[test]
    fn test_counts_tally_rows() {
        let result: ResultSet = [
            ClassificationRow::new("10.0.0.1", Label::Legitimate),
            ClassificationRow::new("10.0.0.2", Label::HighRatedAttack),
            ClassificationRow::new("10.0.0.1", Label::LowRatedAttack),
            ClassificationRow::new("10.0.0.3", Label::Legitimate),
        ]
        .into_iter()
        .collect();

        let counts = result.counts();
        assert_eq!(counts.legitimate, 2);
        assert_eq!(counts.high_rated, 1);
        assert_eq!(counts.low_rated, 1);
        assert_eq!(counts.total(), result.len() as u64);
        assert_eq!(counts.attacks(), 2);
    }

    #[test]
    fn test_counts_wire_names() {
        let mut counts = LabelCounts::default();
        counts.record(Label::HighRatedAttack);

        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["high_rated_count"], 1);
        assert_eq!(json["legitimate_count"], 0);
        assert_eq!(json["low_rated_count"], 0);
    }
}
