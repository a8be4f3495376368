use vecspace_core::{
    cosine_similarity, document_weight_vector, query_weight_vector, rank, top_k, DocId, InvertedIndex, Language,
    SearchContext, WeightVector,
};

fn toks(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn animals() -> InvertedIndex {
    InvertedIndex::build(&[toks("the cat sat"), toks("the dog ran"), toks("cat and dog played")])
}

#[test]
fn document_frequency_matches_posting_list() {
    let idx = animals();
    for entry in idx.entries() {
        assert_eq!(entry.document_frequency as usize, entry.posting_list.len(), "term {}", entry.term);
    }
}

#[test]
fn document_vectors_are_dense_over_vocabulary() {
    let idx = animals();
    for doc_id in idx.doc_ids() {
        let v = document_weight_vector(&idx, doc_id);
        assert_eq!(v.len(), idx.vocabulary_size());
        for (pos, entry) in idx.entries().iter().enumerate() {
            if !entry.posting_list.contains_key(&doc_id) {
                assert_eq!(v.get(pos), 0.0);
            }
        }
    }
}

#[test]
fn cosine_is_symmetric() {
    let idx = animals();
    let vs: Vec<WeightVector> = idx.doc_ids().map(|d| document_weight_vector(&idx, d)).collect();
    for a in &vs {
        for b in &vs {
            assert_eq!(cosine_similarity(a, b), cosine_similarity(b, a));
        }
    }
}

#[test]
fn cosine_of_vector_with_itself_is_one() {
    let idx = animals();
    let v = document_weight_vector(&idx, 2);
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
}

#[test]
fn rebuilding_is_deterministic() {
    let a = animals();
    let b = animals();
    assert_eq!(a.entries(), b.entries());
}

#[test]
fn document_matching_both_terms_ranks_first() {
    let idx = animals();
    let scores = rank(&idx, &["cat", "dog"]);
    assert_eq!(scores.len(), 3);
    assert!((scores[0].score - scores[1].score).abs() < 1e-12);

    let top: Vec<DocId> = top_k(scores, 5).into_iter().map(|s| s.doc_id).collect();
    assert_eq!(top, vec![2, 0, 1]);
}

#[test]
fn unknown_query_term_contributes_nothing() {
    let idx = animals();
    let with_unknown = query_weight_vector(&idx, &["cat", "zebra"]);
    let without = query_weight_vector(&idx, &["cat"]);
    assert_eq!(with_unknown, without);
    assert_eq!(with_unknown.len(), idx.vocabulary_size());

    let only_unknown = rank(&idx, &["zebra"]);
    assert!(only_unknown.iter().all(|s| s.score == 0.0));
}

#[test]
fn term_in_every_document_scores_zero() {
    let idx = InvertedIndex::build(&[toks("common rare"), toks("common common"), toks("common")]);
    let scores = rank(&idx, &["common"]);
    assert!(scores.iter().all(|s| s.score == 0.0));
}

#[test]
fn empty_index_ranks_nothing() {
    let idx = InvertedIndex::build(&[]);
    assert!(rank(&idx, &["anything"]).is_empty());
}

#[test]
fn cached_context_matches_direct_ranking() {
    let docs = [
        toks("rust systems programming language"),
        toks("python scripting language language"),
        toks("rust compiler borrow checker"),
        toks("systems programming with c"),
    ];
    let idx = InvertedIndex::build(&docs);
    let queries: [&[&str]; 3] = [&["rust", "language"], &["systems", "systems", "c"], &["borrow"]];
    let ctx = SearchContext::new(idx.clone(), Language::English);
    for q in queries {
        let direct = rank(&idx, q);
        let cached = ctx.rank_terms(q);
        assert_eq!(direct.len(), cached.len());
        for (d, c) in direct.iter().zip(cached.iter()) {
            assert_eq!(d.doc_id, c.doc_id);
            assert!((d.score - c.score).abs() < 1e-12);
        }
    }
}

#[test]
fn context_searches_raw_text() {
    let docs = [toks("cat"), toks("dog"), toks("cat dog"), toks("bird")];
    let ctx = SearchContext::new(InvertedIndex::build(&docs), Language::English);
    let hits = ctx.search("Cats and DOGS", 2);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc_id, 2);
    assert_eq!(ctx.boolean("cats dogs").into_iter().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn context_reload_replaces_index() {
    let mut ctx = SearchContext::new(InvertedIndex::build(&[toks("a")]), Language::English);
    assert_eq!(ctx.index().num_docs(), 1);
    ctx.reload(InvertedIndex::build(&[toks("apple"), toks("pear")]));
    assert_eq!(ctx.index().num_docs(), 2);
    assert!((ctx.rank_terms(&["pear"])[1].score - 1.0).abs() < 1e-12);
}
