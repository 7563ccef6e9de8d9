//! Survival probabilities from a hazard-rate nodal curve.

use std::sync::Arc;

use super::discount::check_time;
use super::NodalCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{Currency, StandardId};

/// Survival probabilities of one legal entity, for protection in one currency.
///
/// `Q(t) = exp(-h(t) * t)` where `h` is the interpolated average hazard rate.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{NodalCurve, SurvivalCurve};
/// use pricer_core::types::{Currency, StandardId};
///
/// let entity = StandardId::of("LEI", "ISSUER-A").unwrap();
/// let hazard = Arc::new(NodalCurve::constant(0.02).unwrap());
/// let curve = SurvivalCurve::new(entity, Currency::USD, hazard);
///
/// let q = curve.survival_probability(1.0).unwrap();
/// assert!((q - 0.980199).abs() < 1e-5);
/// assert!((curve.default_probability(1.0).unwrap() - 0.019801).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurvivalCurve {
    legal_entity: StandardId,
    currency: Currency,
    hazard_rates: Arc<NodalCurve>,
}

impl SurvivalCurve {
    /// Survival curve for `legal_entity` in `currency`.
    pub fn new(legal_entity: StandardId, currency: Currency, hazard_rates: Arc<NodalCurve>) -> Self {
        Self {
            legal_entity,
            currency,
            hazard_rates,
        }
    }

    /// The reference legal entity.
    pub fn legal_entity(&self) -> &StandardId {
        &self.legal_entity
    }

    /// Currency of the protection.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Average hazard rate to `t`.
    pub fn hazard_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok(self.hazard_rates.y_value(t))
    }

    /// Probability of no default before `t`.
    pub fn survival_probability(&self, t: f64) -> Result<f64, MarketDataError> {
        check_time(t)?;
        Ok((-self.hazard_rates.y_value(t) * t).exp())
    }

    /// Probability of default before `t`.
    pub fn default_probability(&self, t: f64) -> Result<f64, MarketDataError> {
        Ok(1.0 - self.survival_probability(t)?)
    }
}
