use criterion::{criterion_group, criterion_main, Criterion};
use minisearch_core::tokenizer::gather_tokens;
use minisearch_core::{build_index, find_query_matches};

const PAGE: &str = "The quick brown fox jumps over the lazy dog. It's the U.S.A's \
    favourite pangram, printed in 1,000 type-specimen books!";

fn corpus(pages: usize) -> Vec<String> {
    (0..pages)
        .flat_map(|i| [format!("http://example.com/{i}"), format!("{PAGE} page{} extra", (b'a' + (i % 26) as u8) as char)])
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("gather_tokens_page", |b| b.iter(|| gather_tokens(PAGE)));
}

fn bench_query(c: &mut Criterion) {
    let (_, index) = build_index(corpus(2_000));
    c.bench_function("query_with_modifiers", |b| b.iter(|| find_query_matches(&index, "fox pagea pageb +lazy -pagec")));
}

criterion_group!(benches, bench_tokenize, bench_query);
criterion_main!(benches);
