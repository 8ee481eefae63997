//! Value pipeline benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cryptkv_bench::utils::{random_value, repetitive_value};
use cryptkv_codec::{CompressionCodec, CryptoCodec, ValueCodec};

/// Benchmark gzip compression of compressible data.
fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    let codec = CompressionCodec::default();

    for size in [64, 1024, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let data = repetitive_value(size).into_bytes();
            b.iter(|| black_box(codec.compress(black_box(&data)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark passphrase encryption (includes key derivation).
fn bench_encrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("encrypt");

    for size in [64, 1024, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let value = random_value(size);
            b.iter(|| black_box(CryptoCodec::encrypt("bench-pass", black_box(&value)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark the full encode/decode pipeline.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let codec = ValueCodec::default();

    for size in [64, 1024, 16384].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), size, |b, &size| {
            let value = random_value(size);
            b.iter(|| black_box(codec.encode(black_box(&value), "bench-pass").unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), size, |b, &size| {
            let stored = codec.encode(&random_value(size), "bench-pass").unwrap();
            b.iter(|| black_box(codec.decode(black_box(&stored), "bench-pass").unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compress, bench_encrypt, bench_pipeline);
criterion_main!(benches);
