//! Store benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cryptkv_bench::utils::{generate_keys, random_value};
use cryptkv_core::EncryptedStore;
use tempfile::TempDir;

/// Benchmark durable set operations.
fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_set");
    group.sample_size(30);

    for size in [64, 1024].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let store = EncryptedStore::open(temp_dir.path().join("bench")).unwrap();
            let value = random_value(size);
            let mut i = 0u64;

            b.iter(|| {
                i += 1;
                store
                    .set("store", &format!("key-{i}"), black_box(&value), "bench-pass")
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark get operations.
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_get");

    let temp_dir = TempDir::new().unwrap();
    let store = EncryptedStore::open(temp_dir.path().join("bench")).unwrap();
    let keys = generate_keys(1000);
    for key in &keys {
        store.set("store", key, &random_value(256), "bench-pass").unwrap();
    }

    group.bench_function("256", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(store.get("store", &keys[i], "bench-pass").unwrap());
        });
    });

    group.bench_function("keys_1000", |b| {
        b.iter(|| black_box(store.keys("store").unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_get);
criterion_main!(benches);
