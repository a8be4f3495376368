use crate::tokenizer::Analyzer;
use crate::{DocMeta, InvertedIndex};
use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct SourceDoc {
    pub path: PathBuf,
    pub text: String,
}

/// Read every regular file under `root`, sorted by path.
///
/// Files that cannot be read are logged and skipped. Invalid UTF-8 sequences
/// are dropped from the text.
pub fn load_documents<P: AsRef<Path>>(root: P, limit: Option<usize>) -> Result<Vec<SourceDoc>> {
    let root = root.as_ref();
    if !root.is_dir() {
        bail!("corpus directory {} does not exist", root.display());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(e) if e.file_type().is_file() => files.push(e.into_path()),
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "skipping unreadable directory entry"),
        }
    }
    if let Some(limit) = limit {
        files.truncate(limit);
    }

    let mut docs = Vec::with_capacity(files.len());
    for path in files {
        match fs::read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes).replace('\u{FFFD}', "");
                docs.push(SourceDoc { path, text });
            }
            Err(err) => tracing::warn!(path = %path.display(), error = %err, "skipping unreadable document"),
        }
    }
    tracing::info!(root = %root.display(), num_docs = docs.len(), "loaded documents");
    Ok(docs)
}

pub fn build_index(docs: &[SourceDoc], analyzer: &dyn Analyzer) -> InvertedIndex {
    let tokens: Vec<Vec<String>> = docs.iter().map(|d| analyzer.analyze(&d.text)).collect();
    let metas = docs
        .iter()
        .map(|d| DocMeta { path: Some(d.path.to_string_lossy().into_owned()) })
        .collect();
    InvertedIndex::build_with_meta(&tokens, metas)
}
