//! Credit rates lookups.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use pricer_core::market_data::{
    CurveId, DiscountCurve, MarketDataError, MarketDataId, MarketDataSnapshot, SurvivalCurve,
};
use pricer_core::types::{Currency, StandardId};

use super::CreditRatesProvider;

/// Resolves a [`CreditRatesProvider`] from a snapshot.
///
/// Implementations must be pure: the same snapshot yields an equal provider.
/// Errors are returned to the caller unchanged by every view and cache.
pub trait CreditRatesMarketDataLookup: fmt::Debug + Send + Sync {
    /// Build the provider for `market_data`.
    fn credit_rates_provider(&self, market_data: &MarketDataSnapshot) -> Result<CreditRatesProvider, MarketDataError>;
}

/// Credit rates lookup backed by fixed id mappings.
///
/// Discount curves are keyed by currency, survival curves by legal entity and
/// currency, and recovery rates by legal entity (read as quotes).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{CurveId, MarketDataSnapshot, NodalCurve};
/// use pricer_core::types::{Currency, StandardId};
/// use pricer_measure::credit::{CreditRatesMarketDataLookup, DefaultCreditRatesLookup};
///
/// let entity = StandardId::of("LEI", "ISSUER-A").unwrap();
/// let recovery = StandardId::of("RR", "ISSUER-A").unwrap();
/// let lookup = DefaultCreditRatesLookup::new()
///     .with_discount_curve(Currency::USD, CurveId::new("USD-Disc"))
///     .with_survival_curve(entity.clone(), Currency::USD, CurveId::new("ISSUER-A-USD"))
///     .with_recovery_rate(entity.clone(), recovery.clone());
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let snapshot = MarketDataSnapshot::builder(date)
///     .add_curve(CurveId::new("USD-Disc"), NodalCurve::constant(0.03).unwrap())
///     .add_curve(CurveId::new("ISSUER-A-USD"), NodalCurve::constant(0.01).unwrap())
///     .add_quote(recovery, 0.4)
///     .build();
///
/// let provider = lookup.credit_rates_provider(&snapshot).unwrap();
/// assert_eq!(provider.recovery_rate(&entity).unwrap(), 0.4);
/// assert_eq!(lookup.requirements().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultCreditRatesLookup {
    #[cfg_attr(feature = "serde", serde(default))]
    discount_curve_ids: HashMap<Currency, CurveId>,
    #[cfg_attr(feature = "serde", serde(default))]
    survival_curve_ids: HashMap<StandardId, HashMap<Currency, CurveId>>,
    #[cfg_attr(feature = "serde", serde(default))]
    recovery_rate_ids: HashMap<StandardId, StandardId>,
}

impl DefaultCreditRatesLookup {
    /// Lookup with no mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `currency` to a zero-rate curve.
    pub fn with_discount_curve(mut self, currency: Currency, curve_id: CurveId) -> Self {
        self.discount_curve_ids.insert(currency, curve_id);
        self
    }

    /// Map `legal_entity` in `currency` to a hazard-rate curve.
    pub fn with_survival_curve(mut self, legal_entity: StandardId, currency: Currency, curve_id: CurveId) -> Self {
        self.survival_curve_ids
            .entry(legal_entity)
            .or_default()
            .insert(currency, curve_id);
        self
    }

    /// Map `legal_entity` to a recovery rate quote.
    pub fn with_recovery_rate(mut self, legal_entity: StandardId, quote_id: StandardId) -> Self {
        self.recovery_rate_ids.insert(legal_entity, quote_id);
        self
    }

    /// Every market data id this lookup reads.
    pub fn requirements(&self) -> BTreeSet<MarketDataId> {
        let curves = self
            .discount_curve_ids
            .values()
            .chain(self.survival_curve_ids.values().flat_map(HashMap::values))
            .cloned()
            .map(MarketDataId::Curve);
        let quotes = self.recovery_rate_ids.values().cloned().map(MarketDataId::Quote);
        curves.chain(quotes).collect()
    }
}

impl CreditRatesMarketDataLookup for DefaultCreditRatesLookup {
    fn credit_rates_provider(&self, market_data: &MarketDataSnapshot) -> Result<CreditRatesProvider, MarketDataError> {
        let mut provider = CreditRatesProvider::new(market_data.valuation_date());

        for (currency, curve_id) in &self.discount_curve_ids {
            let zero_rates = market_data.curve(&MarketDataId::Curve(curve_id.clone()))?;
            provider = provider.with_discount_curve(DiscountCurve::new(*currency, zero_rates.clone()));
        }
        for (legal_entity, by_currency) in &self.survival_curve_ids {
            for (currency, curve_id) in by_currency {
                let hazard_rates = market_data.curve(&MarketDataId::Curve(curve_id.clone()))?;
                provider = provider.with_survival_curve(SurvivalCurve::new(
                    legal_entity.clone(),
                    *currency,
                    hazard_rates.clone(),
                ));
            }
        }
        for (legal_entity, quote_id) in &self.recovery_rate_ids {
            let rate = market_data.quote(&MarketDataId::Quote(quote_id.clone()))?;
            provider = provider.with_recovery_rate(legal_entity.clone(), rate);
        }
        Ok(provider)
    }
}
