//! Average precision of a ranked run against relevance judgements.
//!
//! Inputs are TREC-style text files: qrels lines `query iter doc relevance`
//! and run lines `query iter doc rank score tag`.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Default)]
pub struct Qrels {
    judgements: HashMap<String, Vec<(String, i64)>>,
}

impl Qrels {
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut qrels = Self::default();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [query, _, doc, relevance] = &fields[..] else {
                bail!("qrels line {}: expected 4 fields, found {}", lineno + 1, fields.len());
            };
            let relevance: i64 = relevance
                .parse()
                .with_context(|| format!("qrels line {}: invalid relevance {relevance:?}", lineno + 1))?;
            let judged = qrels.judgements.entry(query.to_string()).or_default();
            // A repeated (query, doc) pair overrides the earlier judgement in place.
            match judged.iter().position(|(d, _)| d.as_str() == *doc) {
                Some(i) => judged[i].1 = relevance,
                None => judged.push((doc.to_string(), relevance)),
            }
        }
        Ok(qrels)
    }

    /// Documents judged relevant (relevance > 0) for the query, in first-seen order.
    pub fn relevant_docs(&self, query: &str) -> Result<Vec<&str>> {
        let judged = self.judgements.get(query).ok_or_else(|| anyhow!("query {query} not found in relevance judgements"))?;
        Ok(judged.iter().filter(|(_, rel)| *rel > 0).map(|(doc, _)| doc.as_str()).collect())
    }
}

#[derive(Debug, Default)]
pub struct RunResults {
    retrieved: HashMap<String, Vec<String>>,
}

impl RunResults {
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut run = Self::default();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [query, _, doc, _, _, _] = &fields[..] else {
                bail!("results line {}: expected 6 fields, found {}", lineno + 1, fields.len());
            };
            run.retrieved.entry(query.to_string()).or_default().push(doc.to_string());
        }
        Ok(run)
    }

    /// Retrieved documents for the query in run order.
    pub fn retrieved_docs(&self, query: &str) -> Result<&[String]> {
        self.retrieved
            .get(query)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow!("query {query} not found in retrieval results"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApReport {
    pub retrieved: usize,
    pub relevant: usize,
    pub retrieved_relevant: usize,
    pub average_precision: f64,
}

/// Sum of precision at each relevant hit, over the total number of relevant documents.
///
/// With no relevant documents the average precision is 0.
pub fn average_precision<S: AsRef<str>>(retrieved: &[S], relevant: &[&str]) -> ApReport {
    let mut hits = 0usize;
    let mut sum_precision = 0.0f64;
    for (i, doc) in retrieved.iter().enumerate() {
        if relevant.contains(&doc.as_ref()) {
            hits += 1;
            sum_precision += hits as f64 / (i + 1) as f64;
        }
    }
    let average_precision = if relevant.is_empty() { 0.0 } else { sum_precision / relevant.len() as f64 };
    ApReport { retrieved: retrieved.len(), relevant: relevant.len(), retrieved_relevant: hits, average_precision }
}

pub fn evaluate_query(run: &RunResults, qrels: &Qrels, query: &str) -> Result<ApReport> {
    let relevant = qrels.relevant_docs(query)?;
    let retrieved = run.retrieved_docs(query)?;
    Ok(average_precision(retrieved, &relevant))
}
