// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use trellis_sweep::{Interval, intersecting_pairs, pairs_within_distance};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_intervals(count: usize, span: f64, max_len: f64) -> Vec<Interval> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let min = rng.next_f64() * span;
        out.push(Interval::new(min, min + rng.next_f64() * max_len));
    }
    out
}

fn gen_points(count: usize, span: f64) -> Vec<(usize, Point)> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        out.push((i, Point::new(rng.next_f64() * span, rng.next_f64() * span)));
    }
    out
}

fn naive_interval_pairs(intervals: &[Interval]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for i in 0..intervals.len() {
        for j in (i + 1)..intervals.len() {
            if intervals[i].overlaps(&intervals[j]) {
                out.push((i, j));
            }
        }
    }
    out
}

fn bench_interval_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_sweep");
    for &n in &[256usize, 1024, 4096] {
        let intervals = gen_intervals(n, 1000.0, 10.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("sweep_n{}", n), |b| {
            b.iter(|| black_box(intersecting_pairs(black_box(&intervals))))
        });
    }
    group.finish();
}

fn bench_interval_naive(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_naive");
    for &n in &[256usize, 1024] {
        let intervals = gen_intervals(n, 1000.0, 10.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("naive_n{}", n), |b| {
            b.iter(|| black_box(naive_interval_pairs(black_box(&intervals))))
        });
    }
    group.finish();
}

fn bench_near_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("near_pairs");
    for &n in &[256usize, 1024, 4096] {
        let points = gen_points(n, 1000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("broad_narrow_n{}", n), |b| {
            b.iter(|| black_box(pairs_within_distance(black_box(&points), 25.0)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_interval_sweep,
    bench_interval_naive,
    bench_near_pairs,
);
criterion_main!(benches);
