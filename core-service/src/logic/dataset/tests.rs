use super::store::{ResultStore, StoreError};
use crate::logic::pipeline::RowSink;
use crate::logic::threat::{ClassificationRow, Label, LabelCounts, ResultSet};
use std::fs;
use tempfile::tempdir;

fn sample_result() -> ResultSet {
    [
        ClassificationRow::new("ip1", Label::Legitimate),
        ClassificationRow::new("ip2", Label::HighRatedAttack),
        ClassificationRow::new("ip3", Label::LowRatedAttack),
    ]
    .into_iter()
    .collect()
}

fn staged_files(dir: &std::path::Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_empty_store_has_no_result() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();

    assert!(!store.has_result());
    assert!(matches!(store.current(), Err(StoreError::NoResultAvailable)));
}

#[test]
fn test_replace_and_read_back() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    let result = sample_result();

    store.replace(&result).unwrap();

    let current = store.current().unwrap();
    assert_eq!(current.counts(), result.counts());
    assert_eq!(current.load().unwrap(), result);
}

#[test]
fn test_staging_format_has_header() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    store.replace(&sample_result()).unwrap();

    let content = fs::read_to_string(store.current().unwrap().path()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec!["ip_address,prediction", "ip1,1", "ip2,0", "ip3,2"]);
}

#[test]
fn test_identity_strings_roundtrip() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    let result: ResultSet = [
        ClassificationRow::new("2001:db8::1", Label::Legitimate),
        ClassificationRow::new("host, with comma", Label::HighRatedAttack),
        ClassificationRow::new("\"quoted\"", Label::LowRatedAttack),
        ClassificationRow::new("", Label::Legitimate),
    ]
    .into_iter()
    .collect();

    store.replace(&result).unwrap();
    assert_eq!(store.current().unwrap().load().unwrap(), result);
}

#[test]
fn test_uncommitted_writer_leaves_previous_intact() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    store.replace(&sample_result()).unwrap();

    {
        let mut writer = store.begin().unwrap();
        writer
            .push_row(ClassificationRow::new("other", Label::HighRatedAttack))
            .unwrap();
        assert_eq!(staged_files(dir.path()), 2);
        // dropped without commit, as a failed run would
    }

    assert_eq!(staged_files(dir.path()), 1);
    assert_eq!(store.current().unwrap().load().unwrap(), sample_result());
}

#[test]
fn test_replace_releases_previous_file() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();

    store.replace(&sample_result()).unwrap();
    let first_path = store.current().unwrap().path().to_path_buf();

    store.replace(&ResultSet::new()).unwrap();

    assert!(!first_path.exists());
    assert_eq!(staged_files(dir.path()), 1);
    assert!(store.current().unwrap().is_empty());
}

#[test]
fn test_reader_keeps_replaced_set_alive() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();

    store.replace(&sample_result()).unwrap();
    let held = store.current().unwrap();

    store.replace(&ResultSet::new()).unwrap();

    // Still readable through the old handle
    assert_eq!(held.load().unwrap(), sample_result());
    let held_path = held.path().to_path_buf();
    drop(held);
    assert!(!held_path.exists());
}

#[test]
fn test_commit_rejects_wrong_counts() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();

    let mut writer = store.begin().unwrap();
    writer
        .push_row(ClassificationRow::new("ip1", Label::Legitimate))
        .unwrap();

    let err = store.commit(writer, LabelCounts::default()).unwrap_err();
    assert!(matches!(err, StoreError::CountMismatch { expected: 0, actual: 1 }));
    assert!(!store.has_result());
    assert_eq!(staged_files(dir.path()), 0);
}

#[test]
fn test_clear_releases_file() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    store.replace(&sample_result()).unwrap();

    assert!(store.clear());
    assert!(!store.clear());
    assert_eq!(staged_files(dir.path()), 0);
    assert!(matches!(store.current(), Err(StoreError::NoResultAvailable)));
}

#[test]
fn test_invalid_staged_label_detected() {
    let dir = tempdir().unwrap();
    let store = ResultStore::new(dir.path()).unwrap();
    store.replace(&sample_result()).unwrap();

    let current = store.current().unwrap();
    fs::write(current.path(), "ip_address,prediction\nip1,1\nip2,7\n").unwrap();

    let rows: Vec<_> = current.rows().unwrap().collect();
    assert!(rows[0].is_ok());
    assert!(matches!(rows[1], Err(StoreError::InvalidLabel { code: 7, row: 2 })));
}
