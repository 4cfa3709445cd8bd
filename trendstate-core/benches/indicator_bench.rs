//! Criterion benchmarks for the indicator engines.
//!
//! Benchmarks:
//! 1. Each trend engine on its own (ATR, ADX, SAR, Supertrend, KAMA, Ichimoku)
//! 2. Batch precompute of the full default set

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use trendstate_core::components::indicator::Indicator;
use trendstate_core::components::precompute::compute_all;
use trendstate_core::config::IndicatorConfig;
use trendstate_core::create_indicator;
use trendstate_core::domain::BarSeries;
use trendstate_core::indicators::{Adx, Atr, Ichimoku, Kama, ParabolicSar, Supertrend};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> BarSeries {
    let close: Vec<f64> = (0..n)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0 + (i as f64 * 0.013).cos() * 4.0)
        .collect();
    let high = close.iter().map(|c| c + 1.5).collect();
    let low = close.iter().map(|c| c - 1.5).collect();
    let volume = (0..n).map(|i| 1_000_000.0 + (i % 500) as f64 * 10.0).collect();
    BarSeries::new(high, low, close, volume).unwrap()
}

// ── 1. Single engines ────────────────────────────────────────────────

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for &bar_count in &[2_520, 10_000] {
        let series = make_series(bar_count);
        let engines: Vec<Box<dyn Indicator>> = vec![
            Box::new(Atr::default()),
            Box::new(Adx::default()),
            Box::new(ParabolicSar::default()),
            Box::new(Supertrend::default()),
            Box::new(Kama::default()),
            Box::new(Ichimoku::default()),
        ];

        for engine in &engines {
            group.bench_with_input(
                BenchmarkId::new(engine.name(), bar_count),
                &bar_count,
                |b, _| b.iter(|| engine.compute(black_box(&series))),
            );
        }
    }

    group.finish();
}

// ── 2. Batch precompute ──────────────────────────────────────────────

fn bench_precompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("precompute");
    let series = make_series(10_000);
    let indicators: Vec<Box<dyn Indicator>> = IndicatorConfig::all_defaults()
        .iter()
        .map(|config| create_indicator(config, None).unwrap())
        .collect();

    group.bench_function("default_set_10k", |b| {
        b.iter(|| compute_all(black_box(&indicators), black_box(&series)))
    });

    group.finish();
}

criterion_group!(benches, bench_engines, bench_precompute);
criterion_main!(benches);
