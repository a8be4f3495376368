//! Log-frequency TF times IDF weighting over the full vocabulary.
//!
//! Vectors are dense: one slot per term in the index's term-id order, zero
//! where the term is absent. A term present in every document gets
//! `log10(N / N) == 0` and therefore weight zero whatever its frequency.

use crate::index::{DocId, InvertedIndex, TermEntry};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    pub fn zeros(len: usize) -> Self { Self { weights: vec![0.0; len] } }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    pub fn get(&self, pos: usize) -> f64 { self.weights.get(pos).copied().unwrap_or(0.0) }

    pub fn as_slice(&self) -> &[f64] { &self.weights }

    pub fn dot(&self, other: &WeightVector) -> f64 {
        self.weights.iter().zip(other.weights.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.weights.iter().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl From<Vec<f64>> for WeightVector {
    fn from(weights: Vec<f64>) -> Self { Self { weights } }
}

pub fn idf(index: &InvertedIndex, entry: &TermEntry) -> f64 {
    (index.num_docs() as f64 / entry.document_frequency as f64).log10()
}

fn tf_weight(raw: u32) -> f64 {
    if raw > 0 { 1.0 + (raw as f64).log10() } else { 0.0 }
}

pub fn document_weight_vector(index: &InvertedIndex, doc_id: DocId) -> WeightVector {
    index
        .entries()
        .iter()
        .map(|entry| match entry.posting_list.get(&doc_id) {
            Some(&raw) => tf_weight(raw) * idf(index, entry),
            None => 0.0,
        })
        .collect::<Vec<_>>()
        .into()
}

/// Query terms missing from the vocabulary have no slot and are ignored.
pub fn query_weight_vector<S: AsRef<str>>(index: &InvertedIndex, query_terms: &[S]) -> WeightVector {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for term in query_terms {
        *counts.entry(term.as_ref()).or_insert(0) += 1;
    }
    index
        .entries()
        .iter()
        .map(|entry| match counts.get(entry.term.as_str()) {
            Some(&qtf) => tf_weight(qtf) * idf(index, entry),
            None => 0.0,
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> { s.split_whitespace().map(String::from).collect() }

    #[test]
    fn document_weights_follow_log_tf_idf() {
        let idx = InvertedIndex::build(&[toks("a a b"), toks("b c"), toks("c")]);
        let v = document_weight_vector(&idx, 0);
        let a = idx.term_id("a").unwrap() as usize;
        let expected = (1.0 + 2f64.log10()) * 3f64.log10();
        assert!((v.get(a) - expected).abs() < 1e-12);
        let c = idx.term_id("c").unwrap() as usize;
        assert_eq!(v.get(c), 0.0);
    }

    #[test]
    fn ubiquitous_term_weighs_zero() {
        let idx = InvertedIndex::build(&[toks("x x x y"), toks("x")]);
        let x = idx.term_id("x").unwrap() as usize;
        assert_eq!(document_weight_vector(&idx, 0).get(x), 0.0);
        assert_eq!(query_weight_vector(&idx, &["x", "x"]).get(x), 0.0);
    }

    #[test]
    fn query_uses_its_own_term_counts() {
        let idx = InvertedIndex::build(&[toks("a"), toks("b"), toks("b")]);
        let v = query_weight_vector(&idx, &["a", "a", "a"]);
        let a = idx.term_id("a").unwrap() as usize;
        let expected = (1.0 + 3f64.log10()) * 3f64.log10();
        assert!((v.get(a) - expected).abs() < 1e-12);
    }
}
