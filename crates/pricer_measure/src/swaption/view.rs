//! Swaption views.

use std::fmt;
use std::sync::Arc;

use pricer_core::market_data::{MarketDataError, MarketDataSnapshot};
use pricer_core::types::IndexId;

use super::{SwaptionMarketDataLookup, SwaptionVolatilities};
use crate::scenario::CachedScenarioMarketData;
use crate::view::MarketDataView;

/// A swaption lookup bound to one snapshot.
///
/// Nothing is resolved when the view is built or rebound; each call to
/// [`volatilities`](Self::volatilities) goes straight to the lookup.
pub struct SwaptionMarketData<L: ?Sized = dyn SwaptionMarketDataLookup> {
    lookup: Arc<L>,
    market_data: Arc<MarketDataSnapshot>,
}

impl<L: ?Sized + SwaptionMarketDataLookup> SwaptionMarketData<L> {
    /// Volatilities for `index`, as the lookup reports them for the bound
    /// snapshot.
    pub fn volatilities(&self, index: &IndexId) -> Result<SwaptionVolatilities, MarketDataError> {
        self.lookup.volatilities(index, &self.market_data)
    }
}

impl<L: ?Sized> MarketDataView for SwaptionMarketData<L> {
    type Lookup = L;

    fn of(lookup: Arc<L>, market_data: Arc<MarketDataSnapshot>) -> Result<Self, MarketDataError> {
        Ok(Self { lookup, market_data })
    }

    fn lookup(&self) -> &Arc<L> {
        &self.lookup
    }

    fn market_data(&self) -> &Arc<MarketDataSnapshot> {
        &self.market_data
    }
}

impl<L: ?Sized> Clone for SwaptionMarketData<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            market_data: Arc::clone(&self.market_data),
        }
    }
}

impl<L: ?Sized + fmt::Debug> fmt::Debug for SwaptionMarketData<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwaptionMarketData")
            .field("lookup", &&*self.lookup)
            .field("valuation_date", &self.market_data.valuation_date())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
impl<L: serde::Serialize> serde::Serialize for SwaptionMarketData<L> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = crate::view::bound::BoundRef {
            lookup: self.lookup.as_ref(),
            market_data: self.market_data.as_ref(),
        };
        serde::Serialize::serialize(&bound, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, L: serde::Deserialize<'de>> serde::Deserialize<'de> for SwaptionMarketData<L> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bound: crate::view::bound::Bound<L, MarketDataSnapshot> = serde::Deserialize::deserialize(deserializer)?;
        Ok(Self {
            lookup: bound.lookup,
            market_data: bound.market_data,
        })
    }
}

/// A swaption lookup bound to a set of scenarios.
pub type SwaptionScenarioMarketData<L> = CachedScenarioMarketData<SwaptionMarketData<L>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swaption::DefaultSwaptionLookup;
    use chrono::NaiveDate;
    use pricer_core::market_data::{CurveId, NodalCurve};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct CountingLookup {
        calls: AtomicUsize,
        inner: DefaultSwaptionLookup,
    }

    impl SwaptionMarketDataLookup for CountingLookup {
        fn volatility_indices(&self) -> std::collections::BTreeSet<IndexId> {
            self.inner.volatility_indices()
        }

        fn volatilities(
            &self,
            index: &IndexId,
            market_data: &MarketDataSnapshot,
        ) -> Result<SwaptionVolatilities, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.volatilities(index, market_data)
        }
    }

    fn snapshot(vol: f64) -> Arc<MarketDataSnapshot> {
        Arc::new(
            MarketDataSnapshot::builder(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
                .add_curve(CurveId::new("VOL"), NodalCurve::constant(vol).unwrap())
                .build(),
        )
    }

    fn lookup() -> Arc<CountingLookup> {
        Arc::new(CountingLookup {
            calls: AtomicUsize::new(0),
            inner: DefaultSwaptionLookup::new().with_volatilities(IndexId::new("USD-SOFR"), CurveId::new("VOL")),
        })
    }

    #[test]
    fn test_construction_and_rebinding_resolve_nothing() {
        let lookup = lookup();
        let view = SwaptionMarketData::of(Arc::clone(&lookup), snapshot(0.2)).unwrap();
        let _rebound = view.with_market_data(snapshot(0.3)).unwrap();
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_volatilities_delegate_every_call() {
        let lookup = lookup();
        let view = SwaptionMarketData::of(Arc::clone(&lookup), snapshot(0.2)).unwrap();
        let index = IndexId::new("USD-SOFR");

        let direct = lookup.inner.volatilities(&index, view.market_data()).unwrap();
        assert_eq!(view.volatilities(&index).unwrap(), direct);
        assert_eq!(view.volatilities(&index).unwrap(), direct);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_rebound_view_reads_new_snapshot() {
        let view = SwaptionMarketData::of(lookup(), snapshot(0.2)).unwrap();
        let rebound = view.with_market_data(snapshot(0.3)).unwrap();
        let index = IndexId::new("USD-SOFR");
        assert_eq!(view.volatilities(&index).unwrap().volatility(1.0).unwrap(), 0.2);
        assert_eq!(rebound.volatilities(&index).unwrap().volatility(1.0).unwrap(), 0.3);
    }
}
