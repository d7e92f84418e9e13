//! Benchmarks for stripefx transforms.
//!
//! Run with: `cargo bench -p stripefx-bench`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stripefx_bench::noise_raster;
use stripefx_ops::{partition, Effect, Executor, ImageSession};

/// Single effect, sequential against striped, across image sizes.
fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effect");

    for size in [64u32, 256, 1024] {
        let source = noise_raster(size, size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        for effect in Effect::ALL {
            group.bench_with_input(BenchmarkId::new(format!("{effect}/sequential"), size), &source, |b, src| {
                b.iter(|| {
                    let mut session = ImageSession::initialize(src.clone());
                    Executor::Sequential.run(&mut session, &[effect]).unwrap();
                    black_box(session.into_output())
                })
            });

            group.bench_with_input(BenchmarkId::new(format!("{effect}/striped_8"), size), &source, |b, src| {
                b.iter(|| {
                    let mut session = ImageSession::initialize(src.clone());
                    Executor::Parallel { workers: 8 }.run(&mut session, &[effect]).unwrap();
                    black_box(session.into_output())
                })
            });
        }
    }

    group.finish();
}

/// Blur over a fixed image while the stripe count grows.
fn bench_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("workers");
    let source = noise_raster(1024, 1024);
    group.throughput(Throughput::Elements(1024 * 1024));

    for workers in [1usize, 2, 4, 8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("blur", workers), &workers, |b, &w| {
            b.iter(|| {
                let mut session = ImageSession::initialize(source.clone());
                Executor::Parallel { workers: w }.run(&mut session, &[Effect::Blur]).unwrap();
                black_box(session.into_output())
            })
        });
    }

    group.finish();
}

/// Partitioning alone.
fn bench_partition(c: &mut Criterion) {
    c.bench_function("partition_4096_x_64", |b| {
        b.iter(|| partition(black_box(4096), black_box(64)))
    });
}

criterion_group!(benches, bench_effects, bench_workers, bench_partition);
criterion_main!(benches);
