//! Multinomial Naive Bayes over newsgroup messages with add-one smoothing.

use anyhow::{bail, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Message header lines that carry no topical content.
pub const HEADER_PREFIXES: &[&str] = &[
    "Newsgroups:",
    "Path:",
    "From:",
    "Subject:",
    "Message-ID:",
    "Sender:",
    "Nntp-Posting-Host:",
    "Organization:",
    "References:",
    "Distribution:",
    "Date:",
    "Lines:",
];

pub type TokenFrequencies = HashMap<String, u32>;

pub fn token_frequencies(text: &str) -> TokenFrequencies {
    let mut freqs = TokenFrequencies::new();
    for line in text.lines() {
        if HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) { continue; }
        for token in line.to_lowercase().split_whitespace() {
            *freqs.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    freqs
}

pub fn read_token_frequencies(path: &Path) -> Result<TokenFrequencies> {
    let bytes = fs::read(path)?;
    Ok(token_frequencies(&String::from_utf8_lossy(&bytes).replace('\u{FFFD}', "")))
}

#[derive(Debug)]
struct ClassModel {
    name: String,
    log_prior: f64,
    log_likelihood: HashMap<String, f64>,
    /// ln P(t|c) for vocabulary terms never seen in this class.
    log_unseen: f64,
}

#[derive(Debug)]
pub struct NaiveBayesClassifier {
    classes: Vec<ClassModel>,
    vocabulary: HashSet<String>,
    /// ln(1/|V|), used for tokens outside the training vocabulary.
    log_out_of_vocabulary: f64,
    total_docs: usize,
}

impl NaiveBayesClassifier {
    /// Train from (class name, documents) pairs. Classes are ordered by name.
    pub fn train(mut classes: Vec<(String, Vec<TokenFrequencies>)>) -> Result<Self> {
        classes.sort_by(|a, b| a.0.cmp(&b.0));
        let total_docs: usize = classes.iter().map(|(_, docs)| docs.len()).sum();
        if total_docs == 0 {
            bail!("no training documents");
        }
        let vocabulary: HashSet<String> = classes
            .iter()
            .flat_map(|(_, docs)| docs.iter().flat_map(|d| d.keys().cloned()))
            .collect();
        if vocabulary.is_empty() {
            bail!("training documents contain no tokens");
        }
        let vocab_size = vocabulary.len() as f64;
        tracing::info!(total_docs, vocabulary = vocabulary.len(), classes = classes.len(), "training naive bayes");

        let num_classes = classes.len();
        let mut models = Vec::with_capacity(num_classes);
        for (i, (name, docs)) in classes.into_iter().enumerate() {
            tracing::info!(class = %name, docs = docs.len(), "[{}/{}] training class", i + 1, num_classes);
            let mut counts: HashMap<String, u64> = HashMap::new();
            for doc in &docs {
                for (token, &n) in doc {
                    *counts.entry(token.clone()).or_insert(0) += u64::from(n);
                }
            }
            let denom = vocab_size + counts.values().sum::<u64>() as f64;
            let log_likelihood = counts
                .into_iter()
                .map(|(token, n)| (token, ((n as f64 + 1.0) / denom).ln()))
                .collect();
            models.push(ClassModel {
                name,
                log_prior: (docs.len() as f64 / total_docs as f64).ln(),
                log_likelihood,
                log_unseen: (1.0 / denom).ln(),
            });
        }

        Ok(Self { classes: models, log_out_of_vocabulary: (1.0 / vocab_size).ln(), vocabulary, total_docs })
    }

    /// Each subdirectory of `root` is a class; each file inside it is one training document.
    pub fn from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("training directory {} does not exist", root.display());
        }
        let mut classes = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_dir() { continue; }
            let name = entry.file_name().to_string_lossy().into_owned();
            classes.push((name, read_dir_frequencies(entry.path())?.into_iter().map(|(_, f)| f).collect()));
        }
        Self::train(classes)
    }

    pub fn vocabulary_size(&self) -> usize { self.vocabulary.len() }

    pub fn total_docs(&self) -> usize { self.total_docs }

    pub fn class_names(&self) -> impl Iterator<Item = &str> { self.classes.iter().map(|c| c.name.as_str()) }

    /// ln P(c) + Σ tf · ln P(t|c) for every class, in class order.
    pub fn log_posteriors(&self, doc: &TokenFrequencies) -> Vec<(&str, f64)> {
        self.classes
            .iter()
            .map(|class| {
                let mut score = class.log_prior;
                for (token, &n) in doc {
                    let lp = match class.log_likelihood.get(token) {
                        Some(&lp) => lp,
                        None if self.vocabulary.contains(token) => class.log_unseen,
                        None => self.log_out_of_vocabulary,
                    };
                    score += lp * f64::from(n);
                }
                (class.name.as_str(), score)
            })
            .collect()
    }

    /// Most probable class; the first class in order wins ties.
    pub fn predict(&self, doc: &TokenFrequencies) -> Option<&str> {
        let mut best: Option<(&str, f64)> = None;
        for (name, score) in self.log_posteriors(doc) {
            if best.map_or(score > f64::NEG_INFINITY, |(_, s)| score > s) {
                best = Some((name, score));
            }
        }
        best.map(|(name, _)| name)
    }

    /// Predict every file directly inside `dir`, returning (file name, class) sorted by file name.
    pub fn classify_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<(String, String)>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            bail!("test directory {} does not exist", dir.display());
        }
        let mut out = Vec::new();
        for (file_name, freqs) in read_dir_frequencies(dir)? {
            match self.predict(&freqs) {
                Some(class) => out.push((file_name, class.to_string())),
                None => tracing::warn!(file = %file_name, "no class could be assigned"),
            }
        }
        Ok(out)
    }
}

fn read_dir_frequencies(dir: &Path) -> Result<Vec<(String, TokenFrequencies)>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() { continue; }
        match read_token_frequencies(entry.path()) {
            Ok(freqs) => out.push((entry.file_name().to_string_lossy().into_owned(), freqs)),
            Err(err) => tracing::warn!(path = %entry.path().display(), error = %err, "skipping unreadable document"),
        }
    }
    Ok(out)
}
