//! Benchmarks for card selection
//!
//! Run with: cargo bench --package pipeline
//!
//! Measures dedupe and random sampling over pools the size stratified and
//! pooled discovery produce.

use cards::{CardRecord, DEFAULT_IMAGE_BASE, RawCandidate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::FilterPipeline;
use sources::DeckRng;

fn pool_of(size: u64) -> Vec<CardRecord> {
    // Every id appears twice
    (0..size)
        .chain(0..size)
        .map(|id| {
            CardRecord::from_candidate(
                &RawCandidate::new(id, format!("Movie {id}")),
                DEFAULT_IMAGE_BASE,
            )
        })
        .collect()
}

fn bench_discovery_selection(c: &mut Criterion) {
    let pipeline = FilterPipeline::for_discovery(DeckRng::seeded(42), 20);
    let cards = pool_of(500);

    c.bench_function("discovery_selection_1000", |b| {
        b.iter(|| {
            let deck = pipeline.apply(black_box(cards.clone()));
            black_box(deck)
        })
    });
}

fn bench_curated_selection(c: &mut Criterion) {
    let pipeline = FilterPipeline::for_curated_list();
    let cards = pool_of(100);

    c.bench_function("curated_selection_200", |b| {
        b.iter(|| {
            let deck = pipeline.apply(black_box(cards.clone()));
            black_box(deck)
        })
    });
}

criterion_group!(benches, bench_discovery_selection, bench_curated_selection);
criterion_main!(benches);
