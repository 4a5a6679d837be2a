//! Benchmarks for the similarity scan
//!
//! Run with: cargo bench --package similarity
//!
//! Uses a synthetic rating graph so the benches run without any data files.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::{HashMap, HashSet};

use catalog::{FilmId, Rating, RatingGraph};
use similarity::{accumulate_deltas, closest_neighbors, gather_candidates};

const USERS: u32 = 2_000;
const FILMS: u32 = 500;
const RATINGS_PER_USER: u32 = 40;

/// Deterministic synthetic graph: every user marks a spread of films with
/// values that differ between users, so deltas are non-trivial.
fn build_graph() -> RatingGraph {
    let mut snapshot: HashMap<FilmId, HashSet<Rating>> = HashMap::new();
    for user_id in 1..=USERS {
        for step in 0..RATINGS_PER_USER {
            let film_id = (user_id * 7 + step * 13) % FILMS + 1;
            let value = ((user_id + step) % 10 + 1) as u8;
            snapshot
                .entry(film_id)
                .or_default()
                .insert(Rating::new(film_id, user_id, value));
        }
    }
    RatingGraph::from_snapshot(snapshot)
}

fn bench_accumulate_deltas(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("accumulate_deltas", |b| {
        b.iter(|| {
            let deltas = accumulate_deltas(black_box(&graph), black_box(1));
            black_box(deltas)
        })
    });
}

fn bench_full_scan(c: &mut Criterion) {
    let graph = build_graph();

    c.bench_function("scan_to_candidates", |b| {
        b.iter(|| {
            let deltas = accumulate_deltas(black_box(&graph), black_box(1));
            let neighbors = closest_neighbors(&deltas);
            let candidates = gather_candidates(&graph, &neighbors);
            black_box(candidates)
        })
    });
}

fn bench_graph_build(c: &mut Criterion) {
    c.bench_function("rating_graph_from_snapshot", |b| {
        b.iter(|| {
            let graph = build_graph();
            black_box(graph)
        })
    });
}

criterion_group!(
    benches,
    bench_accumulate_deltas,
    bench_full_scan,
    bench_graph_build
);
criterion_main!(benches);
