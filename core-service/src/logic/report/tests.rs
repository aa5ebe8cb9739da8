use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use super::{write_report, BlockPolicy, NameGenerator, ReportMaterializer};
use crate::logic::dataset::{ResultStore, StoreError};
use crate::logic::threat::{ClassificationRow, Label, ResultSet};

/// Hands out the same name every time
struct FixedName;

impl NameGenerator for FixedName {
    fn next_name(&self) -> String {
        "report.csv".to_string()
    }
}

fn scenario() -> ResultSet {
    [
        ClassificationRow::new("ip1", Label::Legitimate),
        ClassificationRow::new("ip2", Label::HighRatedAttack),
        ClassificationRow::new("ip3", Label::LowRatedAttack),
    ]
    .into_iter()
    .collect()
}

fn rows_of(result: &ResultSet) -> impl Iterator<Item = Result<ClassificationRow, StoreError>> + '_ {
    result.rows().iter().cloned().map(Ok)
}

#[test]
fn test_scenario_report() {
    let dir = TempDir::new().unwrap();
    let materializer = ReportMaterializer::with_defaults(dir.path().join("Reports"));

    let report = materializer.materialize(rows_of(&scenario())).unwrap();

    assert_eq!(report.count, 2);
    assert!(report.path.starts_with(dir.path().join("Reports")));
    let content = fs::read_to_string(&report.path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Blocked IP Address,Attack Type",
            "ip2,High-Rated Attack",
            "ip3,Low-Rated Attack",
        ]
    );
}

#[test]
fn test_no_blockable_rows_gives_header_only() {
    let result: ResultSet = [
        ClassificationRow::new("ip1", Label::Legitimate),
        ClassificationRow::new("ip2", Label::Legitimate),
    ]
    .into_iter()
    .collect();

    let mut out = Vec::new();
    let count = write_report(rows_of(&result), &BlockPolicy::default(), &mut out).unwrap();

    assert_eq!(count, 0);
    assert_eq!(String::from_utf8(out).unwrap(), "Blocked IP Address,Attack Type\n");
}

#[test]
fn test_repeat_reports_have_same_content_distinct_names() {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::new(dir.path().join("staging")).unwrap();
    store.replace(&scenario()).unwrap();
    let materializer = ReportMaterializer::with_defaults(dir.path().join("Reports"));

    let staged = store.current().unwrap();
    let first = materializer.materialize(staged.rows().unwrap()).unwrap();
    let second = materializer.materialize(staged.rows().unwrap()).unwrap();

    assert_ne!(first.name, second.name);
    assert_eq!(
        fs::read_to_string(&first.path).unwrap(),
        fs::read_to_string(&second.path).unwrap()
    );
    // The result set is untouched by reporting
    assert_eq!(staged.load().unwrap(), scenario());
}

#[test]
fn test_report_outlives_result_set() {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::new(dir.path().join("staging")).unwrap();
    store.replace(&scenario()).unwrap();
    let materializer = ReportMaterializer::with_defaults(dir.path().join("Reports"));

    let report = materializer
        .materialize(store.current().unwrap().rows().unwrap())
        .unwrap();
    store.replace(&ResultSet::new()).unwrap();

    assert!(report.path.exists());
}

#[test]
fn test_name_collision_does_not_overwrite() {
    let dir = TempDir::new().unwrap();
    let materializer = ReportMaterializer::new(dir.path(), BlockPolicy::default(), Arc::new(FixedName));

    materializer.materialize(rows_of(&scenario())).unwrap();
    let err = materializer.materialize(rows_of(&ResultSet::new())).unwrap_err();

    assert!(matches!(err, super::ReportError::Io(_)));
    let content = fs::read_to_string(dir.path().join("report.csv")).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_invalid_label_aborts_and_removes_partial_file() {
    let dir = TempDir::new().unwrap();
    let materializer = ReportMaterializer::new(dir.path(), BlockPolicy::default(), Arc::new(FixedName));

    let rows = vec![
        Ok(ClassificationRow::new("ip1", Label::HighRatedAttack)),
        Err(StoreError::InvalidLabel { code: 9, row: 2 }),
    ];
    let err = materializer.materialize(rows).unwrap_err();

    assert!(matches!(err, super::ReportError::Store(StoreError::InvalidLabel { .. })));
    assert!(!dir.path().join("report.csv").exists());
}

#[test]
fn test_custom_policy() {
    let policy = BlockPolicy::new([Label::HighRatedAttack]).with_tag(Label::HighRatedAttack, "DROP");

    let mut out = Vec::new();
    let count = write_report(rows_of(&scenario()), &policy, &mut out).unwrap();

    assert_eq!(count, 1);
    assert!(policy.is_blockable(Label::HighRatedAttack));
    assert!(!policy.is_blockable(Label::LowRatedAttack));
    assert!(String::from_utf8(out).unwrap().ends_with("ip2,DROP\n"));
}

#[test]
fn test_no_result_error_is_recognised() {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();

    let err: super::ReportError = store.current().unwrap_err().into();
    assert!(err.is_no_result());
    assert_eq!(err.to_string(), "No predictions available. Please analyze the file first.");
}
