use std::cell::Cell;
use std::fs;
use tempfile::tempdir;
use vecspace_core::corpus::{build_index, load_documents};
use vecspace_core::persist::{load_or_build, load_snapshot, save_snapshot};
use vecspace_core::tokenizer::EnglishAnalyzer;
use vecspace_core::{rank, InvertedIndex};

fn toks(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn tiny() -> InvertedIndex {
    InvertedIndex::build(&[toks("rust fast rust"), toks("python slow"), toks("rust python")])
}

#[test]
fn snapshot_round_trip_preserves_entries_and_scores() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    let idx = tiny();
    save_snapshot(&path, &idx).unwrap();

    let loaded = load_snapshot(&path).unwrap();
    assert_eq!(loaded.num_docs(), 3);
    assert_eq!(loaded.entries(), idx.entries());
    assert_eq!(loaded.term_id("python"), idx.term_id("python"));
    assert_eq!(rank(&loaded, &["rust"]), rank(&idx, &["rust"]));
}

#[test]
fn snapshot_is_plain_json_keyed_by_doc_id() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("index.json");
    save_snapshot(&path, &tiny()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["num_docs"], 3);
    assert_eq!(json["terms"][0]["term"], "rust");
    assert_eq!(json["terms"][0]["posting_list"]["0"], 2);
    assert_eq!(json["terms"][0]["document_frequency"], 2);
}

#[test]
fn inconsistent_snapshot_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    fs::write(
        &path,
        r#"{"num_docs": 1, "terms": [{"term": "a", "document_frequency": 2, "posting_list": {"0": 1}}]}"#,
    )
    .unwrap();
    assert!(load_snapshot(&path).is_err());

    fs::write(
        &path,
        r#"{"num_docs": 1, "terms": [{"term": "a", "document_frequency": 1, "posting_list": {"4": 1}}]}"#,
    )
    .unwrap();
    assert!(load_snapshot(&path).is_err());

    // A term with no postings would have an infinite idf.
    fs::write(
        &path,
        r#"{"num_docs": 1, "terms": [{"term": "a", "document_frequency": 1, "posting_list": {"0": 1}},
            {"term": "ghost", "document_frequency": 0, "posting_list": {}}]}"#,
    )
    .unwrap();
    let err = load_snapshot(&path).unwrap_err();
    assert!(err.to_string().contains("ghost"));

    fs::write(&path, r#"{"num_docs": 0, "terms": [{"term": "a", "document_frequency": 0, "posting_list": {}}]}"#)
        .unwrap();
    assert!(load_snapshot(&path).is_err());
}

#[test]
fn snapshot_with_empty_term_is_rebuilt_and_scores_stay_finite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    fs::write(
        &path,
        r#"{"num_docs": 2, "terms": [{"term": "a", "document_frequency": 1, "posting_list": {"0": 1}},
            {"term": "ghost", "document_frequency": 0, "posting_list": {}}]}"#,
    )
    .unwrap();

    let idx = load_or_build(&path, false, || Ok(tiny())).unwrap();
    assert!(idx.entry("ghost").is_none());
    assert!(rank(&idx, &["rust", "ghost"]).iter().all(|s| s.score.is_finite()));
}

#[test]
fn load_or_build_writes_missing_snapshot_then_reuses_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    let builds = Cell::new(0);

    let first = load_or_build(&path, false, || {
        builds.set(builds.get() + 1);
        Ok(tiny())
    })
    .unwrap();
    assert!(path.exists());

    let second = load_or_build(&path, false, || {
        builds.set(builds.get() + 1);
        Ok(tiny())
    })
    .unwrap();
    assert_eq!(builds.get(), 1);
    assert_eq!(first.entries(), second.entries());

    load_or_build(&path, true, || {
        builds.set(builds.get() + 1);
        Ok(tiny())
    })
    .unwrap();
    assert_eq!(builds.get(), 2);
}

#[test]
fn corrupt_snapshot_triggers_rebuild() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    fs::write(&path, "{\"num_docs\": 3, \"ter").unwrap();

    let idx = load_or_build(&path, false, || Ok(tiny())).unwrap();
    assert_eq!(idx.num_docs(), 3);
    assert!(load_snapshot(&path).is_ok());
}

#[test]
fn corpus_loading_walks_recursively_in_path_order() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("b.txt"), "Dogs bark loudly").unwrap();
    fs::write(dir.path().join("a.txt"), "Cats purr").unwrap();
    fs::write(dir.path().join("sub").join("c.txt"), b"Birds \xff sing").unwrap();

    let docs = load_documents(dir.path(), None).unwrap();
    assert_eq!(docs.len(), 3);
    assert!(docs[0].path.ends_with("a.txt"));
    assert!(docs[1].path.ends_with("b.txt"));
    assert_eq!(docs[2].text, "Birds  sing");

    let limited = load_documents(dir.path(), Some(2)).unwrap();
    assert_eq!(limited.len(), 2);

    let idx = build_index(&docs, &EnglishAnalyzer);
    assert_eq!(idx.num_docs(), 3);
    assert_eq!(idx.entry("cat").unwrap().posting_list.keys().copied().collect::<Vec<_>>(), vec![0]);
    assert!(idx.doc_meta(1).unwrap().path.as_deref().unwrap().ends_with("b.txt"));
}

#[test]
fn missing_corpus_directory_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(load_documents(dir.path().join("nope"), None).is_err());
}
