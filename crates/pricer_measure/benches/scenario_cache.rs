//! Criterion benchmarks for scenario view resolution.
//!
//! Benchmarks cover:
//! - Resolving a credit view straight from the lookup (no memo)
//! - Reading an already-resolved scenario view
//! - Warming every scenario, sequentially and with Rayon

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::{CurveId, MarketDataValue, NodalCurve, ScenarioMarketData};
use pricer_core::types::{Currency, StandardId};
use pricer_measure::credit::{CreditRatesMarketData, CreditRatesScenarioMarketData, DefaultCreditRatesLookup};
use pricer_measure::{MarketDataView, ScenarioMarketDataView};

const ENTITIES: usize = 20;

/// Lookup over one discount curve and `ENTITIES` survival curves.
fn lookup() -> Arc<DefaultCreditRatesLookup> {
    let lookup = (0..ENTITIES).fold(
        DefaultCreditRatesLookup::new().with_discount_curve(Currency::USD, CurveId::new("USD-Disc")),
        |lookup, i| {
            let entity = StandardId::of("LEI", format!("E{:03}", i)).unwrap();
            lookup.with_survival_curve(entity, Currency::USD, CurveId::new(format!("E{:03}-USD", i)))
        },
    );
    Arc::new(lookup)
}

/// Scenario set shifting the discount curve by 1bp per scenario.
fn market_data(n_scenarios: usize) -> Arc<ScenarioMarketData> {
    let base = NodalCurve::new(vec![0.5, 1.0, 2.0, 5.0, 10.0], vec![0.030, 0.032, 0.034, 0.037, 0.040]).unwrap();
    let shifted = (0..n_scenarios)
        .map(|s| MarketDataValue::from(base.shifted(s as f64 * 1e-4).unwrap()))
        .collect();
    let builder = (0..ENTITIES).fold(
        ScenarioMarketData::builder(n_scenarios, NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
            .add_scenario_values(CurveId::new("USD-Disc"), shifted),
        |builder, i| {
            builder.add_value(
                CurveId::new(format!("E{:03}-USD", i)),
                NodalCurve::constant(0.01 + i as f64 * 1e-3).unwrap(),
            )
        },
    );
    Arc::new(builder.build().unwrap())
}

fn bench_uncached_resolution(c: &mut Criterion) {
    let lookup = lookup();
    let market_data = market_data(1);
    let snapshot = Arc::new(market_data.scenario(0).unwrap());

    c.bench_function("credit_view_of", |b| {
        b.iter(|| CreditRatesMarketData::of(Arc::clone(&lookup), black_box(Arc::clone(&snapshot))).unwrap())
    });
}

fn bench_cached_read(c: &mut Criterion) {
    let view = CreditRatesScenarioMarketData::of(lookup(), market_data(100));
    for i in 0..100 {
        view.scenario(i).unwrap();
    }

    c.bench_function("scenario_cached_read", |b| {
        b.iter(|| view.scenario(black_box(42)).unwrap().valuation_date())
    });
}

fn bench_warm_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario_warm_all");

    for n_scenarios in [10, 100, 1000] {
        let lookup = lookup();
        let market_data = market_data(n_scenarios);

        group.bench_with_input(BenchmarkId::new("sequential", n_scenarios), &n_scenarios, |b, &n| {
            b.iter(|| {
                let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), Arc::clone(&market_data));
                for i in 0..n {
                    view.scenario(i).unwrap();
                }
                view.cached_count()
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", n_scenarios), &n_scenarios, |b, _| {
            b.iter(|| {
                let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), Arc::clone(&market_data));
                pricer_measure::scenario::warm_all(&view).unwrap();
                view.cached_count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_uncached_resolution, bench_cached_read, bench_warm_all);
criterion_main!(benches);
