use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// Source file the document was read from, if it came from disk.
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub term: String,
    pub document_frequency: u32,
    /// Total occurrences of the term across the whole collection.
    #[serde(default)]
    pub collection_frequency: u64,
    /// doc_id -> raw count of the term in that document
    pub posting_list: BTreeMap<DocId, u32>,
}

impl TermEntry {
    fn new(term: String) -> Self {
        Self { term, document_frequency: 0, collection_frequency: 0, posting_list: BTreeMap::new() }
    }
}

/// Term -> posting structure over a fixed document collection.
///
/// Term ids are assigned in first-occurrence order, so building twice from the
/// same collection yields identical ids and entries. The index is read-only
/// once built or loaded.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    pub(crate) num_docs: u32,
    pub(crate) docs: Vec<DocMeta>,
    pub(crate) terms: Vec<TermEntry>,
    pub(crate) dictionary: HashMap<String, TermId>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Build from already tokenized documents; document ids are positions in `docs`.
    pub fn build(docs: &[Vec<String>]) -> Self {
        Self::build_with_meta(docs, vec![DocMeta::default(); docs.len()])
    }

    pub fn build_with_meta(docs: &[Vec<String>], metas: Vec<DocMeta>) -> Self {
        let mut index = Self { num_docs: docs.len() as u32, docs: metas, ..Self::default() };
        index.docs.resize(docs.len(), DocMeta::default());

        for (doc_id, tokens) in docs.iter().enumerate() {
            // Counts in first-occurrence order so term id assignment is deterministic.
            let mut order: Vec<&str> = Vec::new();
            let mut counts: HashMap<&str, u32> = HashMap::new();
            for token in tokens {
                let c = counts.entry(token.as_str()).or_insert(0);
                if *c == 0 { order.push(token.as_str()); }
                *c += 1;
            }

            for term in order {
                let count = counts[term];
                let tid = index.intern(term);
                let entry = &mut index.terms[tid as usize];
                entry.document_frequency += 1;
                entry.collection_frequency += u64::from(count);
                entry.posting_list.insert(doc_id as DocId, count);
            }
        }

        tracing::debug!(num_docs = index.num_docs, num_terms = index.terms.len(), "built inverted index");
        index
    }

    fn intern(&mut self, term: &str) -> TermId {
        if let Some(&tid) = self.dictionary.get(term) {
            return tid;
        }
        let tid = self.terms.len() as TermId;
        self.terms.push(TermEntry::new(term.to_string()));
        self.dictionary.insert(term.to_string(), tid);
        tid
    }

    /// Recreate the term -> id lookup after deserialization.
    pub(crate) fn rebuild_dictionary(&mut self) {
        self.dictionary = self
            .terms
            .iter()
            .enumerate()
            .map(|(tid, e)| (e.term.clone(), tid as TermId))
            .collect();
    }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn vocabulary_size(&self) -> usize { self.terms.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn entry(&self, term: &str) -> Option<&TermEntry> {
        self.term_id(term).map(|tid| &self.terms[tid as usize])
    }

    /// Entries in term-id order; weight vectors are aligned with this order.
    pub fn entries(&self) -> &[TermEntry] { &self.terms }

    pub fn doc_meta(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(doc_id as usize) }

    pub fn doc_ids(&self) -> impl Iterator<Item = DocId> { 0..self.num_docs }
}
