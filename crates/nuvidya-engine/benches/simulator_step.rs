// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulator step and offline analysis benchmarks
//!
//! Fixed inputs, no I/O. The tick benchmark covers a full influence window so
//! eviction and the trapezoid pass are both on the measured path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nuvidya_config::{EnergyConfig, EngineConfig};
use nuvidya_energy::{FieldParams, PresetName, SeriesAnalysis};
use nuvidya_engine::EnergySimulator;

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulator_tick");

    for capacity in [10usize, 100, 1000] {
        let engine = EngineConfig {
            history_capacity: capacity,
            ..EngineConfig::default()
        };
        let mut sim =
            EnergySimulator::new(PresetName::Balanced.preset(), &engine, &EnergyConfig::default())
                .unwrap();
        for _ in 0..capacity {
            sim.tick();
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, _| {
            b.iter(|| black_box(sim.tick()))
        });
    }

    group.finish();
}

fn bench_series_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_analysis");

    for samples in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, &n| {
            b.iter(|| {
                black_box(SeriesAnalysis::compute(10.0, n, FieldParams::default()).unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_series_analysis);
criterion_main!(benches);
