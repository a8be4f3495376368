use crate::index::{DocId, InvertedIndex};
use crate::similarity::cosine_similarity;
use crate::weight::{document_weight_vector, query_weight_vector};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Score every document against the query, in ascending doc id order.
///
/// Document vectors are recomputed for each call; see `SearchContext` for the
/// cached variant.
pub fn rank<S: AsRef<str>>(index: &InvertedIndex, query_terms: &[S]) -> Vec<ScoredDoc> {
    let q = query_weight_vector(index, query_terms);
    index
        .doc_ids()
        .map(|doc_id| {
            let d = document_weight_vector(index, doc_id);
            ScoredDoc { doc_id, score: cosine_similarity(&q, &d) }
        })
        .collect()
}

/// Highest scores first; equal scores keep their incoming order.
pub fn top_k(mut scores: Vec<ScoredDoc>, k: usize) -> Vec<ScoredDoc> {
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores.truncate(k);
    scores
}
