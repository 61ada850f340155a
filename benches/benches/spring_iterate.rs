// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use trellis_spring::{AdjacencyList, LayoutState, SpringLayout, SpringLayoutParams};

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

/// Random graph with roughly `degree * n / 2` edges, positions scattered
/// over a square a few grid cells wide.
fn gen_graph(n: usize, degree: usize, seed: u64) -> (AdjacencyList<usize>, LayoutState<usize>) {
    let mut rng = Rng::new(seed);
    let mut graph = AdjacencyList::new();
    let mut state = LayoutState::new();
    let span = 400.0;
    for i in 0..n {
        graph.add_node(i);
        state.set_position(
            i,
            Point::new(
                (rng.next_f64() - 0.5) * span,
                (rng.next_f64() - 0.5) * span,
            ),
        );
    }
    for _ in 0..(n * degree / 2) {
        let a = (rng.next_u64() as usize) % n;
        let b = (rng.next_u64() as usize) % n;
        if a != b {
            graph.add_edge(a, b);
        }
    }
    (graph, state)
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_iterate");
    for &n in &[100usize, 400, 1000] {
        let (graph, state) = gen_graph(n, 3, 0xC1A5_7E55_9999_ABCD);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("one_step_n{}", n), |b| {
            b.iter_batched(
                || {
                    (
                        SpringLayout::with_seed(SpringLayoutParams::default(), 7),
                        state.clone(),
                    )
                },
                |(mut engine, mut state)| {
                    black_box(engine.iterate(&graph, &mut state));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_run_to_budget(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_run");
    let (graph, state) = gen_graph(100, 3, 0xFACE_FEED_CAFE_BABE);
    group.bench_function("hundred_steps_n100", |b| {
        b.iter_batched(
            || {
                (
                    SpringLayout::with_seed(SpringLayoutParams::default(), 7),
                    state.clone(),
                )
            },
            |(mut engine, mut state)| {
                for _ in 0..100 {
                    black_box(engine.iterate(&graph, &mut state));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_iterate, bench_run_to_budget);
criterion_main!(benches);
