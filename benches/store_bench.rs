//! Tally store throughput benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `increment` | Key normalization plus increment, single thread and contended |
//! | `flush` | Atomic write of the whole tally at growing key counts |
//! | `load` | Parsing a tally file back into the store |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench store_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keytally_core::{normalize, KeyId, KeyPress, Tally, TallyStore};
use std::hint::black_box;
use std::sync::Arc;

const TEXT: &str = "The quick brown fox jumps over the lazy dog.\n";

fn tally_of(keys: usize) -> Tally {
    (0..keys).map(|i| (KeyId::new(format!("Key.k{i}")), i as u64 * 7)).collect()
}

// ---------------------------------------------------------------------------
// Increment throughput
// ---------------------------------------------------------------------------

fn increment_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment");
    let presses: Vec<KeyPress> = TEXT.chars().map(KeyPress::Character).collect();

    group.throughput(Throughput::Elements(presses.len() as u64));
    group.bench_function("typed_sentence", |b| {
        let store = TallyStore::new();
        b.iter(|| {
            for press in &presses {
                black_box(store.increment(&normalize(press)));
            }
        })
    });

    for threads in [2usize, 4] {
        let per_thread = 10_000u64;
        group.throughput(Throughput::Elements(per_thread * threads as u64));
        group.bench_with_input(BenchmarkId::new("contended", threads), &threads, |b, &n| {
            b.iter(|| {
                let store = Arc::new(TallyStore::new());
                std::thread::scope(|s| {
                    for t in 0..n {
                        let store = Arc::clone(&store);
                        s.spawn(move || {
                            let id = KeyId::new(if t % 2 == 0 { "e" } else { "Key.space" });
                            for _ in 0..per_thread {
                                store.increment(&id);
                            }
                        });
                    }
                });
                black_box(store.total())
            })
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Flush and load
// ---------------------------------------------------------------------------

fn flush_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("flush");
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("key_counts.json");

    for keys in [50usize, 500, 5_000] {
        let store = TallyStore::from_counts(tally_of(keys));
        group.throughput(Throughput::Elements(keys as u64));
        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, _| {
            b.iter(|| black_box(store.flush(&path).expect("flush")))
        });
    }

    group.finish();
}

fn load_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let dir = tempfile::tempdir().expect("temp dir");

    for keys in [50usize, 5_000] {
        let path = dir.path().join(format!("counts-{keys}.json"));
        TallyStore::from_counts(tally_of(keys)).flush(&path).expect("seed file");
        let store = TallyStore::new();
        group.throughput(Throughput::Elements(keys as u64));
        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, _| {
            b.iter(|| black_box(store.load(&path)))
        });
    }

    group.finish();
}

criterion_group!(benches, increment_bench, flush_bench, load_bench);
criterion_main!(benches);
