//! Legal entity discounting views.

use std::fmt;
use std::sync::Arc;

use pricer_core::market_data::{MarketDataError, MarketDataSnapshot};

use super::{LegalEntityDiscountingMarketDataLookup, LegalEntityDiscountingProvider};
use crate::scenario::CachedScenarioMarketData;
use crate::view::MarketDataView;

/// A legal entity discounting lookup bound to one snapshot.
///
/// Like [`CreditRatesMarketData`](crate::credit::CreditRatesMarketData), the
/// provider is resolved once when the view is built.
pub struct LegalEntityDiscountingMarketData<L: ?Sized = dyn LegalEntityDiscountingMarketDataLookup> {
    lookup: Arc<L>,
    market_data: Arc<MarketDataSnapshot>,
    provider: LegalEntityDiscountingProvider,
}

impl<L: ?Sized + LegalEntityDiscountingMarketDataLookup> LegalEntityDiscountingMarketData<L> {
    /// The resolved provider.
    #[inline]
    pub fn discounting_provider(&self) -> &LegalEntityDiscountingProvider {
        &self.provider
    }
}

impl<L: ?Sized + LegalEntityDiscountingMarketDataLookup> MarketDataView for LegalEntityDiscountingMarketData<L> {
    type Lookup = L;

    fn of(lookup: Arc<L>, market_data: Arc<MarketDataSnapshot>) -> Result<Self, MarketDataError> {
        let provider = lookup.discounting_provider(&market_data)?;
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

impl<L: ?Sized + fmt::Debug> fmt::Debug for LegalEntityDiscountingMarketData<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegalEntityDiscountingMarketData")
            .field("lookup", &&*self.lookup)
            .field("valuation_date", &self.market_data.valuation_date())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "serde")]
impl<L: serde::Serialize> serde::Serialize for LegalEntityDiscountingMarketData<L> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bound = crate::view::bound::BoundRef {
            lookup: self.lookup.as_ref(),
            market_data: self.market_data.as_ref(),
        };
        serde::Serialize::serialize(&bound, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, L> serde::Deserialize<'de> for LegalEntityDiscountingMarketData<L>
where
    L: LegalEntityDiscountingMarketDataLookup + serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bound: crate::view::bound::Bound<L, MarketDataSnapshot> = serde::Deserialize::deserialize(deserializer)?;
        Self::of(bound.lookup, bound.market_data).map_err(serde::de::Error::custom)
    }
}

/// A legal entity discounting lookup bound to a set of scenarios.
pub type LegalEntityDiscountingScenarioMarketData<L> = CachedScenarioMarketData<LegalEntityDiscountingMarketData<L>>;
