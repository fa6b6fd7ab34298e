use std::fs;

use chrono::{TimeZone, Utc};
use plagiarism_core::document::DocumentId;
use plagiarism_core::submission::{
    FileSubmissionStore, MemorySubmissionStore, StoreError, SubmissionRecord, SubmissionStore,
};
use plagiarism_core::types::DocumentVersion;
use tempfile::tempdir;

fn make_record(submitter: &str, filename: &str, text: &str, score: f64) -> SubmissionRecord {
    SubmissionRecord {
        id: DocumentId::for_submission(submitter, filename).unwrap(),
        submitter: submitter.to_string(),
        filename: filename.to_string(),
        score,
        submitted_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        version: DocumentVersion::from_content(text.as_bytes()),
        best_match: None,
    }
}

fn fill(store: &impl SubmissionStore) {
    store.append(make_record("alice", "a.txt", "alpha text", 0.0), "alpha text").unwrap();
    store.append(make_record("bob", "b.txt", "beta text", 40.0), "beta text").unwrap();
    store.append(make_record("alice", "c.txt", "gamma text", 80.0), "gamma text").unwrap();
}

#[test]
fn file_store_round_trips_records_in_order() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path().join("store")).unwrap();
    fill(&store);

    let reopened = FileSubmissionStore::open(dir.path().join("store")).unwrap();
    let records = reopened.records().unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["alice/a.txt", "bob/b.txt", "alice/c.txt"]);

    let corpus = reopened.corpus(None).unwrap();
    let texts: Vec<&str> = corpus.iter().map(|d| d.as_str()).collect();
    assert_eq!(texts, vec!["alpha text", "beta text", "gamma text"]);
    assert_eq!(corpus.get(1).unwrap().id.as_ref().unwrap().as_str(), "bob/b.txt");
}

#[test]
fn corpus_can_exclude_a_submitter() {
    let dir = tempdir().unwrap();
    let file_store = FileSubmissionStore::open(dir.path()).unwrap();
    let memory_store = MemorySubmissionStore::new();
    fill(&file_store);
    fill(&memory_store);

    for corpus in [
        file_store.corpus(Some("Alice")).unwrap(),
        memory_store.corpus(Some("Alice")).unwrap(),
    ] {
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(0).unwrap().as_str(), "beta text");
    }
}

#[test]
fn summary_averages_scores() {
    let store = MemorySubmissionStore::new();
    let empty = store.summary(50.0).unwrap();
    assert_eq!(empty.submissions, 0);
    assert_eq!(empty.average_score, None);

    fill(&store);
    let summary = store.summary(50.0).unwrap();
    assert_eq!(summary.submissions, 3);
    assert_eq!(summary.average_score, Some(40.0));
    assert_eq!(summary.flagged, 1);
}

#[test]
fn identical_texts_share_one_file() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path()).unwrap();
    store.append(make_record("alice", "a.txt", "same", 0.0), "same").unwrap();
    store.append(make_record("bob", "b.txt", "same", 100.0), "same").unwrap();

    let files = fs::read_dir(dir.path().join("texts")).unwrap().count();
    assert_eq!(files, 1);
    assert_eq!(store.corpus(None).unwrap().len(), 2);
}

#[test]
fn append_rejects_text_not_matching_record() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path()).unwrap();

    let result = store.append(make_record("alice", "a.txt", "original", 0.0), "tampered");
    assert!(matches!(result, Err(StoreError::HashMismatch(_))));
    assert!(store.records().unwrap().is_empty());
}

#[test]
fn missing_text_is_left_out_of_corpus() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path()).unwrap();
    fill(&store);

    let version = DocumentVersion::from_content(b"beta text");
    let name = format!("{}.txt", &version.digest().unwrap()[..16]);
    fs::remove_file(dir.path().join("texts").join(name)).unwrap();

    let corpus = store.corpus(None).unwrap();
    assert_eq!(corpus.len(), 2);
    assert_eq!(store.records().unwrap().len(), 3);
}

#[test]
fn modified_text_is_an_integrity_error() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path()).unwrap();
    fill(&store);

    let version = DocumentVersion::from_content(b"alpha text");
    let name = format!("{}.txt", &version.digest().unwrap()[..16]);
    fs::write(dir.path().join("texts").join(name), "edited").unwrap();

    assert!(matches!(store.corpus(None), Err(StoreError::HashMismatch(_))));
}

#[test]
fn corrupt_log_fails_to_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("log.json"), "{ not json").unwrap();

    let result = FileSubmissionStore::open(dir.path());
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}

#[test]
fn foreign_log_version_fails_to_open() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("log.json"),
        r#"{"format_version":"99","updated_at":null,"record_count":0,"records":[]}"#,
    )
    .unwrap();

    let result = FileSubmissionStore::open(dir.path());
    assert!(matches!(result, Err(StoreError::UnsupportedFormat(v)) if v == "99"));
}

#[test]
fn no_temporary_files_remain_after_append() {
    let dir = tempdir().unwrap();
    let store = FileSubmissionStore::open(dir.path()).unwrap();
    fill(&store);

    let leftovers = fs::read_dir(dir.path())
        .unwrap()
        .chain(fs::read_dir(dir.path().join("texts")).unwrap())
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn exclusion_folds_non_ascii_case() {
    let store = MemorySubmissionStore::new();
    store.append(make_record("Élodie", "draft.txt", "river essay", 0.0), "river essay").unwrap();
    store.append(make_record("bob", "b.txt", "beta text", 0.0), "beta text").unwrap();

    let corpus = store.corpus(Some("élodie")).unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.get(0).unwrap().as_str(), "beta text");
}
