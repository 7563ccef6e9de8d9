//! Swaption volatilities resolved for one index.

use std::sync::Arc;

use chrono::NaiveDate;
use pricer_core::market_data::{MarketDataError, NodalCurve};
use pricer_core::types::IndexId;

/// Implied volatilities for swaptions on one rate index, by expiry.
///
/// Expiries are year fractions from the valuation date; the volatility is
/// interpolated linearly between nodes and held flat outside them.
#[derive(Debug, Clone, PartialEq)]
pub struct SwaptionVolatilities {
    index: IndexId,
    valuation_date: NaiveDate,
    curve: Arc<NodalCurve>,
}

impl SwaptionVolatilities {
    /// Volatilities for `index` at `valuation_date` from an expiry curve.
    pub fn new(index: IndexId, valuation_date: NaiveDate, curve: Arc<NodalCurve>) -> Self {
        Self {
            index,
            valuation_date,
            curve,
        }
    }

    /// The rate index.
    #[inline]
    pub fn index(&self) -> &IndexId {
        &self.index
    }

    /// Valuation date the expiries are measured from.
    #[inline]
    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// Volatility for an expiry `expiry` years from the valuation date.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidTime` for a negative or non-finite expiry.
    pub fn volatility(&self, expiry: f64) -> Result<f64, MarketDataError> {
        if !expiry.is_finite() || expiry < 0.0 {
            return Err(MarketDataError::InvalidTime { t: expiry });
        }
        Ok(self.curve.y_value(expiry))
    }
}
