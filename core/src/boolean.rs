use crate::index::{DocId, InvertedIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermStats {
    pub term: String,
    pub collection_frequency: u64,
    pub document_frequency: u32,
    pub posting_list: BTreeMap<DocId, u32>,
}

/// AND over the query terms that exist in the vocabulary.
///
/// Unknown terms are skipped rather than emptying the result, so a query of
/// only unknown terms matches every document.
pub fn boolean_retrieval<S: AsRef<str>>(index: &InvertedIndex, query_terms: &[S]) -> BTreeSet<DocId> {
    let mut result: BTreeSet<DocId> = index.doc_ids().collect();
    for term in query_terms {
        if let Some(entry) = index.entry(term.as_ref()) {
            result.retain(|doc_id| entry.posting_list.contains_key(doc_id));
        }
    }
    result
}

pub fn term_stats(index: &InvertedIndex, term: &str) -> Option<TermStats> {
    index.entry(term).map(|e| TermStats {
        term: e.term.clone(),
        collection_frequency: e.collection_frequency,
        document_frequency: e.document_frequency,
        posting_list: e.posting_list.clone(),
    })
}
