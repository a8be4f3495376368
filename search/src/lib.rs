use anyhow::Result;
use std::collections::HashSet;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use vecspace_core::corpus::{build_index, load_documents};
use vecspace_core::persist::load_or_build;
use vecspace_core::{Language, SearchContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Vsm,
    Boolean,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vsm" | "vector" => Ok(Mode::Vsm),
            "boolean" | "bool" => Ok(Mode::Boolean),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Vsm => f.write_str("vsm"),
            Mode::Boolean => f.write_str("boolean"),
        }
    }
}

pub struct ContextOptions {
    pub input: PathBuf,
    pub snapshot: PathBuf,
    pub language: Language,
    pub limit: Option<usize>,
    pub rebuild: bool,
}

/// Load the snapshot, or index the corpus and write one when it is missing.
pub fn build_context(opts: &ContextOptions) -> Result<SearchContext> {
    let analyzer = opts.language.analyzer();
    let index = load_or_build(&opts.snapshot, opts.rebuild, || {
        let docs = load_documents(&opts.input, opts.limit)?;
        Ok(build_index(&docs, analyzer.as_ref()))
    })?;
    Ok(SearchContext::new(index, opts.language))
}

/// Read queries line by line until `exit` or end of input.
pub fn run_loop<R: BufRead, W: Write>(ctx: &SearchContext, mode: Mode, top_k: usize, mut input: R, mut out: W) -> Result<()> {
    match mode {
        Mode::Vsm => writeln!(out, "Vector Space Model Retrieval System")?,
        Mode::Boolean => writeln!(out, "Boolean Retrieval System | {} documents indexed", ctx.index().num_docs())?,
    }
    writeln!(out, "Enter 'exit' to quit the program\n")?;

    let mut line = String::new();
    loop {
        write!(out, "Enter your query: ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query == "exit" {
            break;
        }
        tracing::debug!(query, %mode, "running query");
        match mode {
            Mode::Vsm => write_ranked(ctx, query, top_k, &mut out)?,
            Mode::Boolean => write_boolean(ctx, query, top_k, &mut out)?,
        }
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Top documents by cosine similarity, numbered from 1.
pub fn write_ranked<W: Write>(ctx: &SearchContext, query: &str, top_k: usize, out: &mut W) -> Result<()> {
    for hit in ctx.search(query, top_k) {
        writeln!(out, "Document {} - Similarity Score: {}", hit.doc_id + 1, hit.score)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn write_boolean<W: Write>(ctx: &SearchContext, query: &str, top_k: usize, out: &mut W) -> Result<()> {
    for (term, stats) in ctx.term_stats(query) {
        match stats {
            Some(s) => {
                writeln!(out, "Term: {term}")?;
                writeln!(out, "Term Frequency: {}", s.collection_frequency)?;
                writeln!(out, "Document Frequency: {}\n", s.document_frequency)?;
            }
            None => writeln!(out, "Term: {term} not found in any document\n")?,
        }
    }

    let hits = ctx.boolean(query);
    writeln!(out, "Number of documents retrieved: {}", hits.len())?;
    for doc_id in hits.into_iter().take(top_k) {
        let path = ctx.index().doc_meta(doc_id).and_then(|m| m.path.as_deref());
        writeln!(out, "Document {}: {}", doc_id + 1, path.unwrap_or("-"))?;
        if let Some(line) = path.and_then(|p| matching_line(Path::new(p), query)) {
            writeln!(out, "Content: ...{line}...")?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// First line of the file sharing a whitespace-separated word with the query, ignoring case.
fn matching_line(path: &Path, query: &str) -> Option<String> {
    let text = std::fs::read(path).ok()?;
    let text = String::from_utf8_lossy(&text);
    let words: HashSet<String> = query.split_whitespace().map(str::to_lowercase).collect();
    text.lines()
        .find(|line| line.split_whitespace().any(|w| words.contains(&w.to_lowercase())))
        .map(|line| line.trim().to_string())
}
