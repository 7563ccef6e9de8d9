//! Credit rates views.

use std::fmt;
use std::sync::Arc;

use pricer_core::market_data::{MarketDataError, MarketDataSnapshot};

use super::{CreditRatesMarketDataLookup, CreditRatesProvider};
use crate::scenario::CachedScenarioMarketData;
use crate::view::MarketDataView;

/// A credit rates lookup bound to one snapshot.
///
/// The provider is resolved once, in [`of`](MarketDataView::of), and held for
/// the lifetime of the view. Rebinding resolves again for the new snapshot.
pub struct CreditRatesMarketData<L: ?Sized = dyn CreditRatesMarketDataLookup> {
    lookup: Arc<L>,
    market_data: Arc<MarketDataSnapshot>,
    provider: CreditRatesProvider,
}

impl<L: ?Sized + CreditRatesMarketDataLookup> CreditRatesMarketData<L> {
    /// The resolved provider.
    #[inline]
    pub fn provider(&self) -> &CreditRatesProvider {
        &self.provider
    }
}

impl<L: ?Sized + CreditRatesMarketDataLookup> MarketDataView for CreditRatesMarketData<L> {
    type Lookup = L;

    fn of(lookup: Arc<L>, market_data: Arc<MarketDataSnapshot>) -> Result<Self, MarketDataError> {
        let provider = lookup.credit_rates_provider(&market_data)?;
        Ok(Self {
            lookup,
            market_data,
            provider,
        })
    }

    fn lookup(&self) -> &Arc<L> {
        &self.lookup
    }

    fn market_data(&self) -> &Arc<MarketDataSnapshot> {
        &self.market_data
    }
}

impl<L: ?Sized + fmt::Debug> fmt::Debug for CreditRatesMarketData<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditRatesMarketData")
            .field("lookup", &&*self.lookup)
            .field("valuation_date", &self.market_data.valuation_date())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
impl<L: serde::Serialize> serde::Serialize for CreditRatesMarketData<L> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = crate::view::bound::BoundRef {
            lookup: self.lookup.as_ref(),
            market_data: self.market_data.as_ref(),
        };
        serde::Serialize::serialize(&bound, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, L> serde::Deserialize<'de> for CreditRatesMarketData<L>
where
    L: CreditRatesMarketDataLookup + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bound: crate::view::bound::Bound<L, MarketDataSnapshot> = serde::Deserialize::deserialize(deserializer)?;
        Self::of(bound.lookup, bound.market_data).map_err(serde::de::Error::custom)
    }
}

/// A credit rates lookup bound to a set of scenarios.
pub type CreditRatesScenarioMarketData<L> = CachedScenarioMarketData<CreditRatesMarketData<L>>;
