//! Market data view contracts.
//!
//! A view binds a lookup (how to find things) to market data (what was
//! observed). Pricers hold a view and ask it for domain objects; they never
//! see the raw snapshot layout.
//!
//! - [`MarketDataView`]: bound to one [`MarketDataSnapshot`]
//! - [`ScenarioMarketDataView`]: bound to a [`ScenarioMarketData`], handing out
//!   one memoised [`MarketDataView`] per scenario

use std::sync::Arc;

use chrono::NaiveDate;
use pricer_core::market_data::{MarketDataError, MarketDataSnapshot, ScenarioMarketData};

/// A lookup bound to a single snapshot.
///
/// # Contract
///
/// - `lookup()` and `market_data()` are plain accessors.
/// - `with_market_data` returns a new view over the same lookup and never
///   changes the receiver.
/// - `of` is the single canonical constructor. Views that derive a domain
///   object from the snapshot compute it there, once, so every path that
///   produces a view (including deserialisation) goes through it.
pub trait MarketDataView: Sized {
    /// The lookup strategy this view delegates to.
    type Lookup: ?Sized;

    /// Bind `lookup` to `market_data`.
    fn of(lookup: Arc<Self::Lookup>, market_data: Arc<MarketDataSnapshot>) -> Result<Self, MarketDataError>;

    /// The lookup.
    fn lookup(&self) -> &Arc<Self::Lookup>;

    /// The bound snapshot.
    fn market_data(&self) -> &Arc<MarketDataSnapshot>;

    /// Valuation date of the bound snapshot.
    fn valuation_date(&self) -> NaiveDate {
        self.market_data().valuation_date()
    }

    /// A new view over the same lookup and `market_data`.
    fn with_market_data(&self, market_data: Arc<MarketDataSnapshot>) -> Result<Self, MarketDataError> {
        Self::of(Arc::clone(self.lookup()), market_data)
    }
}

/// A lookup bound to a set of scenarios.
///
/// # Contract
///
/// - `scenario(i)` is equivalent to binding the lookup to
///   `market_data().scenario(i)`, and repeated calls return the same stored
///   view.
/// - An index outside `[0, scenario_count())` fails with
///   `MarketDataError::ScenarioIndexOutOfRange` and changes nothing.
/// - A lookup failure is returned unchanged and is not remembered.
/// - `with_market_data` returns a new view with its own, empty, cache.
pub trait ScenarioMarketDataView: Sized {
    /// The lookup strategy shared by every scenario view.
    type Lookup: ?Sized;

    /// The single-scenario view handed out by [`scenario`](Self::scenario).
    type View: MarketDataView<Lookup = Self::Lookup>;

    /// The lookup.
    fn lookup(&self) -> &Arc<Self::Lookup>;

    /// The bound scenario set.
    fn market_data(&self) -> &Arc<ScenarioMarketData>;

    /// A new scenario view over the same lookup and `market_data`.
    fn with_market_data(&self, market_data: Arc<ScenarioMarketData>) -> Self;

    /// The view for scenario `index`.
    fn scenario(&self, index: usize) -> Result<&Self::View, MarketDataError>;

    /// Number of scenarios.
    fn scenario_count(&self) -> usize {
        self.market_data().scenario_count()
    }
}

/// Serialised form shared by all views: the lookup and the market data,
/// never the derived values.
#[cfg(feature = "serde")]
pub(crate) mod bound {
    use std::sync::Arc;

    #[derive(serde::Serialize)]
    pub(crate) struct BoundRef<'a, L, M> {
        pub lookup: &'a L,
        pub market_data: &'a M,
    }

    #[derive(serde::Deserialize)]
    pub(crate) struct Bound<L, M> {
        pub lookup: Arc<L>,
        pub market_data: Arc<M>,
    }
}
