//! Owned query-time state: one index, its analyzer, and cached document vectors.

use crate::boolean::{boolean_retrieval, term_stats, TermStats};
use crate::index::{DocId, InvertedIndex, TermId};
use crate::rank::{top_k, ScoredDoc};
use crate::tokenizer::{Analyzer, Language};
use crate::weight::{idf, query_weight_vector, WeightVector};
use std::collections::BTreeSet;

/// Non-zero document weights in ascending term id order.
///
/// Skipping zero slots leaves dot products and magnitudes bit-for-bit equal to
/// the dense computation, since adding 0.0 is exact.
#[derive(Debug, Clone, Default)]
struct DocVector {
    weights: Vec<(TermId, f64)>,
    magnitude: f64,
}

pub struct SearchContext {
    index: InvertedIndex,
    language: Language,
    analyzer: Box<dyn Analyzer>,
    doc_vectors: Vec<DocVector>,
}

impl SearchContext {
    pub fn new(index: InvertedIndex, language: Language) -> Self {
        let doc_vectors = doc_vectors(&index);
        Self { index, language, analyzer: language.analyzer(), doc_vectors }
    }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    pub fn language(&self) -> Language { self.language }

    /// Swap in a freshly built or loaded index.
    pub fn reload(&mut self, index: InvertedIndex) {
        self.doc_vectors = doc_vectors(&index);
        self.index = index;
        tracing::info!(num_docs = self.index.num_docs(), num_terms = self.index.vocabulary_size(), "search context reloaded");
    }

    pub fn analyze(&self, query: &str) -> Vec<String> { self.analyzer.analyze(query) }

    /// Same scores as [`crate::rank::rank`], using the cached document vectors.
    pub fn rank_terms<S: AsRef<str>>(&self, query_terms: &[S]) -> Vec<ScoredDoc> {
        let q = query_weight_vector(&self.index, query_terms);
        let q_mag = q.magnitude();
        self.doc_vectors
            .iter()
            .enumerate()
            .map(|(doc_id, d)| ScoredDoc { doc_id: doc_id as DocId, score: cached_cosine(&q, q_mag, d) })
            .collect()
    }

    pub fn rank_text(&self, query: &str) -> Vec<ScoredDoc> { self.rank_terms(&self.analyze(query)) }

    pub fn search(&self, query: &str, k: usize) -> Vec<ScoredDoc> { top_k(self.rank_text(query), k) }

    pub fn boolean(&self, query: &str) -> BTreeSet<DocId> {
        boolean_retrieval(&self.index, &self.analyze(query))
    }

    /// Statistics for each analyzed query term, `None` when it is not in the vocabulary.
    pub fn term_stats(&self, query: &str) -> Vec<(String, Option<TermStats>)> {
        self.analyze(query)
            .into_iter()
            .map(|term| {
                let stats = term_stats(&self.index, &term);
                (term, stats)
            })
            .collect()
    }
}

fn doc_vectors(index: &InvertedIndex) -> Vec<DocVector> {
    let mut vectors = vec![DocVector::default(); index.num_docs() as usize];
    for (tid, entry) in index.entries().iter().enumerate() {
        let idf = idf(index, entry);
        for (&doc_id, &raw) in &entry.posting_list {
            let w = (1.0 + (raw as f64).log10()) * idf;
            vectors[doc_id as usize].weights.push((tid as TermId, w));
        }
    }
    for v in vectors.iter_mut() {
        v.magnitude = v.weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    }
    vectors
}

fn cached_cosine(q: &WeightVector, q_mag: f64, d: &DocVector) -> f64 {
    let denom = q_mag * d.magnitude;
    if denom == 0.0 {
        return 0.0;
    }
    let dot: f64 = d.weights.iter().map(|&(tid, w)| q.get(tid as usize) * w).sum();
    dot / denom
}
