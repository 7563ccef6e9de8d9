//! Discount curve backed by continuously compounded zero rates.

use std::sync::Arc;

use super::NodalCurve;
use crate::market_data::error::MarketDataError;
use crate::types::Currency;

/// Discount factors in one currency, from a zero-rate nodal curve.
///
/// # Contract
///
/// - `discount_factor(t) = exp(-r(t) * t)` with `r` the interpolated zero rate
/// - D(0) = 1
/// - Negative `t` is rejected with `MarketDataError::InvalidTime`
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{DiscountCurve, NodalCurve};
/// use pricer_core::types::Currency;
///
/// let zero = Arc::new(NodalCurve::constant(0.05).unwrap());
/// let curve = DiscountCurve::new(Currency::USD, zero);
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscountCurve {
    currency: Currency,
    zero_rates: Arc<NodalCurve>,
}

impl DiscountCurve {
    /// Discount curve in `currency` over the given zero-rate curve.
    pub fn new(currency: Currency, zero_rates: Arc<NodalCurve>) -> Self {
        Self {
            currency,
            zero_rates,
        }
    }

    /// Currency of the discounted cash flows.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Underlying zero-rate curve.
    #[inline]
    pub fn zero_rates(&self) -> &NodalCurve {
        &self.zero_rates
    }

    /// Continuously compounded zero rate at `t`.
    pub fn zero_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok(self.zero_rates.y_value(t))
    }

    /// Discount factor for a cash flow at `t`.
    pub fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok((-self.zero_rates.y_value(t) * t).exp())
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    pub fn forward_rate(&self, t1: f64, t2: f64) -> Result<f64, MarketDataError> {
        if t2 <= t1 {
            return Err(MarketDataError::InvalidTime { t: t2 - t1 });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok((df1 / df2).ln() / (t2 - t1))
    }
}

pub(super) fn check_time(t: f64) -> Result<(), MarketDataError> {
    if t < 0.0 || !t.is_finite() {
        return Err(MarketDataError::InvalidTime { t });
    }
    Ok(())
}
