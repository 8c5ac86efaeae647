use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use store::{Store, StoreConfig};
use tempfile::{tempdir, TempDir};

const N_RECORDS: usize = 10_000;

/// Distinct encoded line for `i`: color cycles, zipcode is `i`.
fn line_for(i: usize) -> String {
    const COLORS: [&str; 4] = ["Red     ", "Blue    ", "Green   ", "Black   "];
    format!("{},{:05},CA", COLORS[i % COLORS.len()], i)
}

fn build_store(n: usize) -> (TempDir, Store) {
    let dir = tempdir().unwrap();
    let store = Store::open(StoreConfig::new(dir.path().join("bench.dat"))).unwrap();
    for i in 0..n {
        store.append(&line_for(i)).unwrap();
    }
    (dir, store)
}

fn append_benchmark(c: &mut Criterion) {
    c.bench_function("store_append_1k", |b| {
        b.iter_batched(
            || build_store(0),
            |(_dir, store)| {
                for i in 0..1_000 {
                    store.append(&line_for(i)).unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn exists_benchmark(c: &mut Criterion) {
    let (_dir, store) = build_store(N_RECORDS);
    let last = line_for(N_RECORDS - 1);

    c.bench_function("store_exists_hit_last_10k", |b| {
        b.iter(|| assert!(store.exists(&last).unwrap()));
    });
    c.bench_function("store_exists_miss_10k", |b| {
        b.iter(|| assert!(!store.exists("Purple  ,00000,ZZ").unwrap()));
    });
}

fn update_benchmark(c: &mut Criterion) {
    c.bench_function("store_update_last_10k", |b| {
        b.iter_batched(
            || build_store(N_RECORDS),
            |(_dir, store)| {
                store.update_state(&line_for(N_RECORDS - 1), "NY").unwrap();
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, append_benchmark, exists_benchmark, update_benchmark);
criterion_main!(benches);
