//! Swaption volatility lookups.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use pricer_core::market_data::{CurveId, MarketDataError, MarketDataId, MarketDataSnapshot};
use pricer_core::types::IndexId;

use super::SwaptionVolatilities;

/// Resolves swaption volatilities for a rate index from a snapshot.
pub trait SwaptionMarketDataLookup: fmt::Debug + Send + Sync {
    /// Indices this lookup can resolve.
    fn volatility_indices(&self) -> BTreeSet<IndexId>;

    /// Volatilities for `index` in `market_data`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::MissingMapping` if `index` is not configured, or any
    /// error raised while reading the snapshot.
    fn volatilities(
        &self,
        index: &IndexId,
        market_data: &MarketDataSnapshot,
    ) -> Result<SwaptionVolatilities, MarketDataError>;
}

/// Swaption lookup mapping each index to a volatility curve by expiry.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{CurveId, MarketDataSnapshot, NodalCurve};
/// use pricer_core::types::IndexId;
/// use pricer_measure::swaption::{DefaultSwaptionLookup, SwaptionMarketDataLookup};
///
/// let index = IndexId::new("USD-SOFR");
/// let lookup = DefaultSwaptionLookup::new().with_volatilities(index.clone(), CurveId::new("USD-SWPT-VOL"));
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let snapshot = MarketDataSnapshot::builder(date)
///     .add_curve(CurveId::new("USD-SWPT-VOL"), NodalCurve::constant(0.25).unwrap())
///     .build();
///
/// let vols = lookup.volatilities(&index, &snapshot).unwrap();
/// assert_eq!(vols.volatility(1.0).unwrap(), 0.25);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultSwaptionLookup {
    #[cfg_attr(feature = "serde", serde(default))]
    volatility_ids: HashMap<IndexId, CurveId>,
}

impl DefaultSwaptionLookup {
    /// Lookup with no indices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `index` to a volatility curve.
    pub fn with_volatilities(mut self, index: IndexId, curve_id: CurveId) -> Self {
        self.volatility_ids.insert(index, curve_id);
        self
    }

    /// Every market data id this lookup reads.
    pub fn requirements(&self) -> BTreeSet<MarketDataId> {
        self.volatility_ids.values().cloned().map(MarketDataId::Curve).collect()
    }
}

impl SwaptionMarketDataLookup for DefaultSwaptionLookup {
    fn volatility_indices(&self) -> BTreeSet<IndexId> {
        self.volatility_ids.keys().cloned().collect()
    }

    fn volatilities(
        &self,
        index: &IndexId,
        market_data: &MarketDataSnapshot,
    ) -> Result<SwaptionVolatilities, MarketDataError> {
        let curve_id = self
            .volatility_ids
            .get(index)
            .ok_or_else(|| MarketDataError::missing_mapping("swaption volatilities", index))?;
        let curve = market_data.curve(&MarketDataId::Curve(curve_id.clone()))?;
        Ok(SwaptionVolatilities::new(
            index.clone(),
            market_data.valuation_date(),
            curve.clone(),
        ))
    }
}
