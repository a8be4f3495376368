use criterion::{criterion_group, criterion_main, Criterion};
use vecspace_core::{rank, InvertedIndex, Language, SearchContext};

fn synthetic_docs(n: usize) -> Vec<Vec<String>> {
    (0..n)
        .map(|i| (0..40).map(|j| format!("t{}", (i * 7 + j * 13) % 500)).collect())
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let index = InvertedIndex::build(&synthetic_docs(300));
    let query = ["t1", "t42", "t42", "t377"];
    c.bench_function("rank_uncached_300", |b| b.iter(|| rank(&index, &query)));

    let ctx = SearchContext::new(index, Language::English);
    c.bench_function("rank_cached_300", |b| b.iter(|| ctx.rank_terms(&query)));
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
