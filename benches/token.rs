//! Token generation benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use surl::services::{TokenGenerator, generate_token};

fn bench_generate_token(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_token");

    for length in [6, 8, 16, 64] {
        group.bench_function(format!("len_{}", length), |b| {
            b.iter(|| generate_token(black_box(length)))
        });
    }

    group.finish();
}

fn bench_generator(c: &mut Criterion) {
    let generator = TokenGenerator::new(8).unwrap();
    c.bench_function("TokenGenerator::generate", |b| {
        b.iter(|| black_box(generator.generate()))
    });
}

criterion_group!(benches, bench_generate_token, bench_generator);
criterion_main!(benches);
