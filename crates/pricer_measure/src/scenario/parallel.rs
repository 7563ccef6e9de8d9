//! Rayon-backed resolution of every scenario view.

use rayon::prelude::*;

use pricer_core::market_data::MarketDataError;

use crate::view::ScenarioMarketDataView;

/// Resolve all scenario views in parallel and return them in index order.
///
/// Stops at the first lookup failure; views resolved before it stay cached.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{CurveId, MarketDataValue, NodalCurve, ScenarioMarketData};
/// use pricer_core::types::Currency;
/// use pricer_measure::credit::{CreditRatesScenarioMarketData, DefaultCreditRatesLookup};
/// use pricer_measure::scenario::resolve_all;
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let id = CurveId::new("USD-Disc");
/// let curves = (0..4)
///     .map(|i| MarketDataValue::from(NodalCurve::constant(0.01 * i as f64).unwrap()))
///     .collect();
/// let market_data = ScenarioMarketData::builder(4, date)
///     .add_scenario_values(id.clone(), curves)
///     .build()
///     .unwrap();
///
/// let lookup = Arc::new(DefaultCreditRatesLookup::new().with_discount_curve(Currency::USD, id));
/// let view = CreditRatesScenarioMarketData::of(lookup, Arc::new(market_data));
///
/// let views = resolve_all(&view).unwrap();
/// assert_eq!(views.len(), 4);
/// assert_eq!(view.cached_count(), 4);
/// ```
pub fn resolve_all<S>(view: &S) -> Result<Vec<&S::View>, MarketDataError>
where
    S: ScenarioMarketDataView + Sync,
    S::View: Sync,
{
    let scenario_count = view.scenario_count();
    tracing::debug!(scenario_count, "resolving all scenario views");
    (0..scenario_count)
        .into_par_iter()
        .map(|index| view.scenario(index))
        .collect()
}

/// Resolve all scenario views in parallel, discarding the references.
pub fn warm_all<S>(view: &S) -> Result<(), MarketDataError>
where
    S: ScenarioMarketDataView + Sync,
    S::View: Sync,
{
    (0..view.scenario_count())
        .into_par_iter()
        .try_for_each(|index| view.scenario(index).map(|_| ()))
}
