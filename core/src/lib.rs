pub mod boolean;
pub mod classify;
pub mod context;
pub mod corpus;
pub mod eval;
pub mod index;
pub mod persist;
pub mod rank;
pub mod similarity;
pub mod stats;
pub mod tokenizer;
pub mod weight;

pub use context::SearchContext;
pub use index::{DocId, DocMeta, InvertedIndex, TermEntry, TermId};
pub use rank::{rank, top_k, ScoredDoc};
pub use similarity::cosine_similarity;
pub use tokenizer::{Analyzer, Language};
pub use weight::{document_weight_vector, query_weight_vector, WeightVector};

/// Number of ranked documents shown per query.
pub const DEFAULT_TOP_K: usize = 5;
