//! Scenario views backed by a per-scenario memo.
//!
//! [`CachedScenarioMarketData`] is the one implementation of
//! [`ScenarioMarketDataView`] in this crate. The domain aliases
//! ([`CreditRatesScenarioMarketData`](crate::credit::CreditRatesScenarioMarketData),
//! [`LegalEntityDiscountingScenarioMarketData`](crate::bond::LegalEntityDiscountingScenarioMarketData),
//! [`SwaptionScenarioMarketData`](crate::swaption::SwaptionScenarioMarketData))
//! only fix the single-scenario view type.

mod cache;
#[cfg(feature = "parallel")]
mod parallel;

pub use cache::ScenarioViewCache;
#[cfg(feature = "parallel")]
pub use parallel::{resolve_all, warm_all};

use std::fmt;
use std::sync::Arc;

use pricer_core::market_data::{MarketDataError, ScenarioMarketData};

use crate::view::{MarketDataView, ScenarioMarketDataView};

/// A lookup bound to N scenarios, resolving each scenario's view at most
/// once per winning writer.
///
/// `scenario(i)` slices scenario `i` out of the bound [`ScenarioMarketData`],
/// binds the lookup to it through [`MarketDataView::of`] and installs the
/// result. Later calls for `i` return the installed view without locking.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{CurveId, NodalCurve, ScenarioMarketData, MarketDataValue};
/// use pricer_core::types::Currency;
/// use pricer_measure::credit::{CreditRatesScenarioMarketData, DefaultCreditRatesLookup};
/// use pricer_measure::{MarketDataView, ScenarioMarketDataView};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let id = CurveId::new("USD-Disc");
/// let market_data = ScenarioMarketData::builder(2, date)
///     .add_scenario_values(
///         id.clone(),
///         vec![
///             MarketDataValue::from(NodalCurve::constant(0.01).unwrap()),
///             MarketDataValue::from(NodalCurve::constant(0.02).unwrap()),
///         ],
///     )
///     .build()
///     .unwrap();
///
/// let lookup = Arc::new(DefaultCreditRatesLookup::new().with_discount_curve(Currency::USD, id));
/// let view = CreditRatesScenarioMarketData::of(lookup, Arc::new(market_data));
///
/// let up = view.scenario(1).unwrap();
/// let rate = up.provider().discount_curve(Currency::USD).unwrap().zero_rate(1.0).unwrap();
/// assert_eq!(rate, 0.02);
/// assert!(std::ptr::eq(up, view.scenario(1).unwrap()));
/// assert!(view.scenario(2).is_err());
/// ```
pub struct CachedScenarioMarketData<V: MarketDataView> {
    lookup: Arc<V::Lookup>,
    market_data: Arc<ScenarioMarketData>,
    cache: ScenarioViewCache<V>,
}

impl<V: MarketDataView> CachedScenarioMarketData<V> {
    /// Bind `lookup` to `market_data` with an empty cache of
    /// `market_data.scenario_count()` slots.
    pub fn of(lookup: Arc<V::Lookup>, market_data: Arc<ScenarioMarketData>) -> Self {
        let scenario_count = market_data.scenario_count();
        tracing::debug!(scenario_count, "binding scenario market data view");
        Self {
            lookup,
            market_data,
            cache: ScenarioViewCache::new(scenario_count),
        }
    }

    /// The view for `index` if it has already been resolved.
    pub fn cached(&self, index: usize) -> Option<&V> {
        self.cache.get(index)
    }

    /// Number of scenarios whose view has been resolved.
    pub fn cached_count(&self) -> usize {
        self.cache.occupied()
    }

    fn resolve(&self, index: usize) -> Result<V, MarketDataError> {
        let snapshot = self.market_data.scenario(index)?;
        V::of(Arc::clone(&self.lookup), Arc::new(snapshot))
    }
}

impl<V: MarketDataView> ScenarioMarketDataView for CachedScenarioMarketData<V> {
    type Lookup = V::Lookup;
    type View = V;

    fn lookup(&self) -> &Arc<V::Lookup> {
        &self.lookup
    }

    fn market_data(&self) -> &Arc<ScenarioMarketData> {
        &self.market_data
    }

    fn with_market_data(&self, market_data: Arc<ScenarioMarketData>) -> Self {
        Self::of(Arc::clone(&self.lookup), market_data)
    }

    fn scenario(&self, index: usize) -> Result<&V, MarketDataError> {
        self.cache.get_or_try_resolve(index, || self.resolve(index))
    }

    fn scenario_count(&self) -> usize {
        self.cache.len()
    }
}

impl<V> fmt::Debug for CachedScenarioMarketData<V>
where
    V: MarketDataView,
    V::Lookup: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedScenarioMarketData")
            .field("lookup", &self.lookup)
            .field("market_data", &self.market_data)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(feature = "serde")]
impl<V> serde::Serialize for CachedScenarioMarketData<V>
where
    V: MarketDataView,
    V::Lookup: Sized + serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = crate::view::bound::BoundRef {
            lookup: self.lookup.as_ref(),
            market_data: self.market_data.as_ref(),
        };
        serde::Serialize::serialize(&bound, serializer)
    }
}

// The cache is never serialised; a deserialised view starts empty.
#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for CachedScenarioMarketData<V>
where
    V: MarketDataView,
    V::Lookup: Sized + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bound: crate::view::bound::Bound<V::Lookup, ScenarioMarketData> =
            serde::Deserialize::deserialize(deserializer)?;
        Ok(Self::of(bound.lookup, bound.market_data))
    }
}
