//! Integration tests for per-scenario views.
//!
//! Exercises the memo through the public credit and legal-entity views:
//! equivalence with direct resolution, identity of repeated reads,
//! convergence under contention, index bounds and failure handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use approx::assert_relative_eq;
use chrono::NaiveDate;
use pricer_core::market_data::{
    CurveId, MarketDataError, MarketDataSnapshot, MarketDataValue, NodalCurve, ScenarioMarketData,
};
use pricer_core::types::{Currency, LegalEntityGroup, StandardId};
use pricer_measure::bond::{
    DefaultLegalEntityDiscountingLookup, LegalEntityDiscountingMarketData, LegalEntityDiscountingScenarioMarketData,
};
use pricer_measure::credit::{
    CreditRatesMarketData, CreditRatesMarketDataLookup, CreditRatesProvider, CreditRatesScenarioMarketData,
    DefaultCreditRatesLookup,
};
use pricer_measure::{MarketDataView, ScenarioMarketDataView};

fn valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

fn usd_disc() -> CurveId {
    CurveId::new("USD-Disc")
}

fn scenarios(rates: &[f64]) -> Arc<ScenarioMarketData> {
    let curves = rates
        .iter()
        .map(|r| MarketDataValue::from(NodalCurve::constant(*r).unwrap()))
        .collect();
    Arc::new(
        ScenarioMarketData::builder(rates.len(), valuation_date())
            .add_scenario_values(usd_disc(), curves)
            .build()
            .unwrap(),
    )
}

/// Counts resolutions and fails the first `failures` of them.
#[derive(Debug)]
struct CountingLookup {
    inner: DefaultCreditRatesLookup,
    calls: AtomicUsize,
    failures: AtomicUsize,
}

impl CountingLookup {
    fn new(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: DefaultCreditRatesLookup::new().with_discount_curve(Currency::USD, usd_disc()),
            calls: AtomicUsize::new(0),
            failures: AtomicUsize::new(failures),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CreditRatesMarketDataLookup for CountingLookup {
    fn credit_rates_provider(&self, market_data: &MarketDataSnapshot) -> Result<CreditRatesProvider, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(MarketDataError::configuration("lookup unavailable"));
        }
        self.inner.credit_rates_provider(market_data)
    }
}

fn usd_rate(view: &CreditRatesMarketData<CountingLookup>) -> f64 {
    view.provider()
        .discount_curve(Currency::USD)
        .unwrap()
        .zero_rate(1.0)
        .unwrap()
}

#[test]
fn test_scenario_equals_direct_resolution() {
    let lookup = CountingLookup::new(0);
    let market_data = scenarios(&[0.01, 0.02, 0.03]);
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), Arc::clone(&market_data));

    for i in 0..3 {
        let direct = lookup
            .credit_rates_provider(&market_data.scenario(i).unwrap())
            .unwrap();
        let cached = view.scenario(i).unwrap();
        assert_eq!(cached.provider(), &direct);
        assert_eq!(cached.market_data().as_ref(), &market_data.scenario(i).unwrap());
        assert!(Arc::ptr_eq(cached.lookup(), &lookup));
    }
}

#[test]
fn test_repeat_call_returns_same_instance() {
    let lookup = CountingLookup::new(0);
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&[0.01, 0.02]));

    let first = view.scenario(1).unwrap();
    let second = view.scenario(1).unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(lookup.calls(), 1);
    assert!(view.cached(0).is_none());
}

#[test]
fn test_three_scenario_example() {
    let view = CreditRatesScenarioMarketData::of(CountingLookup::new(0), scenarios(&[0.01, 0.02, 0.03]));
    assert_eq!(view.scenario_count(), 3);

    let s1 = view.scenario(1).unwrap();
    assert_relative_eq!(usd_rate(s1), 0.02);
    assert!(std::ptr::eq(s1, view.scenario(1).unwrap()));
    assert_eq!(
        view.scenario(3).unwrap_err(),
        MarketDataError::ScenarioIndexOutOfRange { index: 3, count: 3 }
    );
    assert_eq!(view.cached_count(), 1);

    let s2 = view.scenario(2).unwrap();
    assert!(!std::ptr::eq(s1, s2));
    assert_relative_eq!(usd_rate(s2), 0.03);
    assert_relative_eq!(usd_rate(view.scenario(1).unwrap()), 0.02);
    assert!(std::ptr::eq(s1, view.scenario(1).unwrap()));
    assert_eq!(view.cached_count(), 2);
    assert!(view.cached(0).is_none());
}

#[test]
fn test_out_of_range_leaves_cache_untouched() {
    let lookup = CountingLookup::new(0);
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&[0.01, 0.02]));
    let s0 = view.scenario(0).unwrap() as *const _;

    for index in [2, 3, usize::MAX] {
        assert!(matches!(
            view.scenario(index),
            Err(MarketDataError::ScenarioIndexOutOfRange { count: 2, .. })
        ));
    }
    assert_eq!(lookup.calls(), 1);
    assert_eq!(view.cached_count(), 1);
    assert!(std::ptr::eq(view.cached(0).unwrap(), s0));
    assert!(view.cached(1).is_none());
}

#[test]
fn test_lookup_failure_propagates_and_is_not_cached() {
    let lookup = CountingLookup::new(1);
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&[0.01]));

    assert_eq!(
        view.scenario(0).unwrap_err(),
        MarketDataError::configuration("lookup unavailable")
    );
    assert!(view.cached(0).is_none());

    let retried = view.scenario(0).unwrap();
    assert_relative_eq!(usd_rate(retried), 0.01);
    assert_eq!(lookup.calls(), 2);
}

#[test]
fn test_concurrent_first_calls_converge() {
    const THREADS: usize = 16;
    let lookup = CountingLookup::new(0);
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&[0.01, 0.02, 0.03, 0.04]));
    let barrier = Barrier::new(THREADS);

    let addresses: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    view.scenario(2).unwrap() as *const CreditRatesMarketData<CountingLookup> as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(addresses.iter().all(|a| *a == addresses[0]));
    let retained = view.cached(2).unwrap();
    assert_eq!(retained as *const _ as usize, addresses[0]);
    assert_relative_eq!(usd_rate(retained), 0.03);
    // Racing writers may each resolve once; only one result is kept.
    assert!((1..=THREADS).contains(&lookup.calls()));
    assert_eq!(view.cached_count(), 1);
}

#[test]
fn test_with_market_data_leaves_original_unaffected() {
    let lookup = CountingLookup::new(0);
    let original = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&[0.01, 0.02]));
    let before = original.scenario(0).unwrap() as *const _;

    let rebound = original.with_market_data(scenarios(&[0.05, 0.06, 0.07]));
    assert_eq!(rebound.scenario_count(), 3);
    assert_eq!(rebound.cached_count(), 0);
    assert_relative_eq!(usd_rate(rebound.scenario(2).unwrap()), 0.07);

    assert_eq!(original.scenario_count(), 2);
    assert!(std::ptr::eq(original.scenario(0).unwrap(), before));
    assert_relative_eq!(usd_rate(original.scenario(0).unwrap()), 0.01);
    assert!(Arc::ptr_eq(original.lookup(), rebound.lookup()));
}

#[test]
fn test_zero_scenarios() {
    let market_data = Arc::new(ScenarioMarketData::builder(0, valuation_date()).build().unwrap());
    let view = CreditRatesScenarioMarketData::of(CountingLookup::new(0), market_data);
    assert_eq!(view.scenario_count(), 0);
    assert!(view.scenario(0).is_err());
}

#[test]
fn test_legal_entity_scenarios() {
    let issuer = StandardId::of("LEI", "GOVT1").unwrap();
    let lookup = Arc::new(
        DefaultLegalEntityDiscountingLookup::new()
            .with_issuer_group(issuer.clone(), LegalEntityGroup::new("GOVT1"))
            .with_issuer_curve(LegalEntityGroup::new("GOVT1"), Currency::USD, usd_disc()),
    );
    let market_data = scenarios(&[0.03, 0.04]);
    let view = LegalEntityDiscountingScenarioMarketData::of(Arc::clone(&lookup), Arc::clone(&market_data));

    let single =
        LegalEntityDiscountingMarketData::of(lookup, Arc::new(market_data.scenario(1).unwrap())).unwrap();
    assert_eq!(
        view.scenario(1).unwrap().discounting_provider(),
        single.discounting_provider()
    );
    let df = view
        .scenario(1)
        .unwrap()
        .discounting_provider()
        .issuer_curve(&issuer, Currency::USD)
        .unwrap()
        .discount_factor(2.0)
        .unwrap();
    assert_relative_eq!(df, (-0.08f64).exp(), epsilon = 1e-12);
}

#[cfg(feature = "parallel")]
#[test]
fn test_warm_all_fills_every_slot() {
    let lookup = CountingLookup::new(0);
    let rates: Vec<f64> = (0..64).map(|i| 0.001 * i as f64).collect();
    let view = CreditRatesScenarioMarketData::of(Arc::clone(&lookup), scenarios(&rates));

    pricer_measure::scenario::warm_all(&view).unwrap();
    assert_eq!(view.cached_count(), 64);

    let calls = lookup.calls();
    let views = pricer_measure::scenario::resolve_all(&view).unwrap();
    assert_eq!(lookup.calls(), calls);
    for (i, v) in views.iter().enumerate() {
        assert_relative_eq!(usd_rate(v), rates[i]);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_warm_all_reports_failure() {
    let view = CreditRatesScenarioMarketData::of(CountingLookup::new(1), scenarios(&[0.01, 0.02, 0.03]));
    assert_eq!(
        pricer_measure::scenario::warm_all(&view),
        Err(MarketDataError::configuration("lookup unavailable"))
    );
    assert!(view.cached_count() < 3);
    pricer_measure::scenario::warm_all(&view).unwrap();
    assert_eq!(view.cached_count(), 3);
}
