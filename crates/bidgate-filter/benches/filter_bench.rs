//! Performance benchmarks for the per-request filtering hot path
//!
//! Run with: cargo bench --package bidgate-filter

use bidgate_filter::set::ConfigSet;
use bidgate_filter::state::FilterState;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sparse_set(universe: usize, stride: usize) -> ConfigSet {
    let mut set = ConfigSet::with_capacity(universe);
    for id in (0..universe).step_by(stride) {
        set.insert(id as u32);
    }
    set
}

fn bench_set_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_set_scan");

    for &universe in &[64usize, 512, 4096] {
        let set = sparse_set(universe, 7);
        group.bench_with_input(BenchmarkId::new("next_walk", universe), &set, |b, set| {
            b.iter(|| {
                let mut total = 0usize;
                let mut cursor = set.next(0);
                while cursor < set.size() {
                    total += cursor;
                    cursor = set.next(cursor + 1);
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_set_intersect");

    for &universe in &[512usize, 4096] {
        let mask = sparse_set(universe, 3);
        group.bench_with_input(BenchmarkId::new("intersect", universe), &mask, |b, mask| {
            b.iter(|| {
                let mut set = ConfigSet::full(universe);
                set.intersect(black_box(mask));
                black_box(set)
            });
        });
    }

    group.finish();
}

fn bench_biddable_spots(c: &mut Criterion) {
    let mut group = c.benchmark_group("biddable_spots");

    // Typical exchange shapes: a few impressions, a handful of creatives,
    // a few hundred candidate configurations.
    for &(imps, creatives, universe) in &[(1usize, 4usize, 128usize), (4, 8, 512)] {
        let shape: Vec<usize> = vec![creatives; imps];
        let mask = sparse_set(universe, 2);

        group.bench_function(
            BenchmarkId::new("reconstruct", format!("{imps}x{creatives}x{universe}")),
            |b| {
                b.iter(|| {
                    let mut state = FilterState::new(&shape, universe);
                    state.narrow_all_creatives(&mask);
                    black_box(state.biddable_spots())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_set_scan, bench_intersect, bench_biddable_spots);
criterion_main!(benches);
