//! Resolved credit rates.

use std::collections::HashMap;

use chrono::NaiveDate;
use pricer_core::market_data::{DiscountCurve, MarketDataError, SurvivalCurve};
use pricer_core::types::{Currency, StandardId};

/// Discount curves, survival curves and recovery rates for one valuation
/// state, as produced by a credit rates lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditRatesProvider {
    valuation_date: NaiveDate,
    discount_curves: HashMap<Currency, DiscountCurve>,
    survival_curves: HashMap<StandardId, HashMap<Currency, SurvivalCurve>>,
    recovery_rates: HashMap<StandardId, f64>,
}

impl CreditRatesProvider {
    /// Empty provider at `valuation_date`.
    pub fn new(valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date,
            discount_curves: HashMap::new(),
            survival_curves: HashMap::new(),
            recovery_rates: HashMap::new(),
        }
    }

    /// Add a discount curve, keyed by its currency.
    pub fn with_discount_curve(mut self, curve: DiscountCurve) -> Self {
        self.discount_curves.insert(curve.currency(), curve);
        self
    }

    /// Add a survival curve, keyed by its legal entity and currency.
    pub fn with_survival_curve(mut self, curve: SurvivalCurve) -> Self {
        self.survival_curves
            .entry(curve.legal_entity().clone())
            .or_default()
            .insert(curve.currency(), curve);
        self
    }

    /// Add a recovery rate for `legal_entity`.
    pub fn with_recovery_rate(mut self, legal_entity: StandardId, rate: f64) -> Self {
        self.recovery_rates.insert(legal_entity, rate);
        self
    }

    /// Valuation date.
    #[inline]
    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// Discount curve for `currency`.
    pub fn discount_curve(&self, currency: Currency) -> Result<&DiscountCurve, MarketDataError> {
        self.discount_curves
            .get(&currency)
            .ok_or_else(|| MarketDataError::missing_mapping("discount curve", currency))
    }

    /// Survival curve for `legal_entity` in `currency`.
    pub fn survival_curve(
        &self,
        legal_entity: &StandardId,
        currency: Currency,
    ) -> Result<&SurvivalCurve, MarketDataError> {
        self.survival_curves
            .get(legal_entity)
            .and_then(|by_currency| by_currency.get(&currency))
            .ok_or_else(|| {
                MarketDataError::missing_mapping("survival curve", format!("{}/{}", legal_entity, currency))
            })
    }

    /// Recovery rate for `legal_entity`.
    pub fn recovery_rate(&self, legal_entity: &StandardId) -> Result<f64, MarketDataError> {
        self.recovery_rates
            .get(legal_entity)
            .copied()
            .ok_or_else(|| MarketDataError::missing_mapping("recovery rate", legal_entity))
    }
}
