use crate::{DocMeta, InvertedIndex, TermEntry};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::Path;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    created_at: String,
    num_docs: u32,
    docs: &'a [DocMeta],
    terms: &'a [TermEntry],
}

#[derive(Deserialize)]
struct Snapshot {
    num_docs: u32,
    #[serde(default)]
    docs: Vec<DocMeta>,
    terms: Vec<TermEntry>,
}

/// Write the index as a single pretty-printed JSON document.
pub fn save_snapshot<P: AsRef<Path>>(path: P, index: &InvertedIndex) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    let snapshot = SnapshotRef {
        created_at,
        num_docs: index.num_docs,
        docs: &index.docs,
        terms: &index.terms,
    };
    let mut f = File::create(path).with_context(|| format!("creating snapshot {}", path.display()))?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let mut f = File::open(path).with_context(|| format!("opening snapshot {}", path.display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let snapshot: Snapshot = serde_json::from_str(&buf).with_context(|| format!("parsing snapshot {}", path.display()))?;

    if snapshot.num_docs == 0 && !snapshot.terms.is_empty() {
        bail!("snapshot {} has {} terms but no documents", path.display(), snapshot.terms.len());
    }
    for entry in &snapshot.terms {
        if entry.document_frequency == 0 {
            bail!("term {:?}: document frequency is zero", entry.term);
        }
        if entry.document_frequency as usize != entry.posting_list.len() {
            bail!("term {:?}: document frequency {} does not match {} postings", entry.term, entry.document_frequency, entry.posting_list.len());
        }
        if let Some(&last) = entry.posting_list.keys().next_back() {
            if last >= snapshot.num_docs {
                bail!("term {:?}: posting for doc {} beyond {} documents", entry.term, last, snapshot.num_docs);
            }
        }
    }

    let mut index = InvertedIndex { num_docs: snapshot.num_docs, docs: snapshot.docs, terms: snapshot.terms, ..InvertedIndex::default() };
    index.docs.resize(index.num_docs as usize, DocMeta::default());
    index.rebuild_dictionary();
    if index.dictionary.len() != index.terms.len() {
        bail!("snapshot {} repeats a term", path.display());
    }
    Ok(index)
}

/// Load the snapshot at `path`, or build and write it when it is missing,
/// unreadable, or `rebuild` is set.
pub fn load_or_build<P, F>(path: P, rebuild: bool, build: F) -> Result<InvertedIndex>
where
    P: AsRef<Path>,
    F: FnOnce() -> Result<InvertedIndex>,
{
    let path = path.as_ref();
    if !rebuild && path.exists() {
        match load_snapshot(path) {
            Ok(index) => {
                tracing::info!(path = %path.display(), num_docs = index.num_docs(), num_terms = index.vocabulary_size(), "loaded index snapshot");
                return Ok(index);
            }
            Err(err) => tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "discarding unreadable snapshot, rebuilding"),
        }
    }
    let index = build()?;
    save_snapshot(path, &index)?;
    tracing::info!(path = %path.display(), num_docs = index.num_docs(), num_terms = index.vocabulary_size(), "wrote index snapshot");
    Ok(index)
}
