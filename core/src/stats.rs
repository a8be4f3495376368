use crate::tokenizer::Analyzer;
use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Word counts over a collection, split on whitespace after lowercasing.
#[derive(Debug, Default)]
pub struct CorpusStats {
    pub total_words: u64,
    pub unique_stems: Option<usize>,
    frequencies: HashMap<String, u64>,
}

impl CorpusStats {
    pub fn collect<I, S>(texts: I, stemmer: Option<&dyn Analyzer>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = Self::default();
        let mut stems: HashSet<String> = HashSet::new();
        for text in texts {
            for word in text.as_ref().to_lowercase().split_whitespace() {
                stats.total_words += 1;
                *stats.frequencies.entry(word.to_string()).or_insert(0) += 1;
                if let Some(analyzer) = stemmer {
                    let stem = analyzer.stem(word);
                    if !stem.is_empty() { stems.insert(stem); }
                }
            }
        }
        stats.unique_stems = stemmer.map(|_| stems.len());
        stats
    }

    pub fn unique_words(&self) -> usize { self.frequencies.len() }

    pub fn frequency(&self, word: &str) -> u64 { self.frequencies.get(word).copied().unwrap_or(0) }

    /// Zipf table: (rank, word, frequency), most frequent first, ranks from 1.
    pub fn rank_frequencies(&self) -> Vec<(usize, &str, u64)> {
        let mut pairs: Vec<(&str, u64)> = self.frequencies.iter().map(|(w, &f)| (w.as_str(), f)).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs.into_iter().enumerate().map(|(i, (w, f))| (i + 1, w, f)).collect()
    }

    pub fn write_zipf_table<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "rank\tword\tfrequency")?;
        for (rank, word, freq) in self.rank_frequencies() {
            writeln!(out, "{rank}\t{word}\t{freq}")?;
        }
        out.flush()?;
        Ok(())
    }
}
