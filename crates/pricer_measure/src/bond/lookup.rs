//! Legal entity discounting lookups.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use pricer_core::market_data::{CurveId, DiscountCurve, MarketDataError, MarketDataId, MarketDataSnapshot};
use pricer_core::types::{Currency, LegalEntityGroup, RepoGroup, StandardId};

use super::LegalEntityDiscountingProvider;

/// Resolves a [`LegalEntityDiscountingProvider`] from a snapshot.
pub trait LegalEntityDiscountingMarketDataLookup: fmt::Debug + Send + Sync {
    /// Build the provider for `market_data`.
    fn discounting_provider(
        &self,
        market_data: &MarketDataSnapshot,
    ) -> Result<LegalEntityDiscountingProvider, MarketDataError>;
}

/// Legal entity lookup backed by group assignments and curve id mappings.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{CurveId, MarketDataSnapshot, NodalCurve};
/// use pricer_core::types::{Currency, LegalEntityGroup, RepoGroup, StandardId};
/// use pricer_measure::bond::{DefaultLegalEntityDiscountingLookup, LegalEntityDiscountingMarketDataLookup};
///
/// let issuer = StandardId::of("LEI", "GOVT1").unwrap();
/// let lookup = DefaultLegalEntityDiscountingLookup::new()
///     .with_repo_group(issuer.clone(), RepoGroup::new("GOVT1 BOND"))
///     .with_repo_curve(RepoGroup::new("GOVT1 BOND"), Currency::USD, CurveId::new("USD-Repo"))
///     .with_issuer_group(issuer.clone(), LegalEntityGroup::new("GOVT1"))
///     .with_issuer_curve(LegalEntityGroup::new("GOVT1"), Currency::USD, CurveId::new("GOVT1-USD"));
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let snapshot = MarketDataSnapshot::builder(date)
///     .add_curve(CurveId::new("USD-Repo"), NodalCurve::constant(0.045).unwrap())
///     .add_curve(CurveId::new("GOVT1-USD"), NodalCurve::constant(0.04).unwrap())
///     .build();
///
/// let provider = lookup.discounting_provider(&snapshot).unwrap();
/// let df = provider.issuer_curve(&issuer, Currency::USD).unwrap().discount_factor(1.0).unwrap();
/// assert!((df - (-0.04f64).exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultLegalEntityDiscountingLookup {
    #[cfg_attr(feature = "serde", serde(default))]
    repo_groups: HashMap<StandardId, RepoGroup>,
    #[cfg_attr(feature = "serde", serde(default))]
    repo_curve_ids: HashMap<RepoGroup, HashMap<Currency, CurveId>>,
    #[cfg_attr(feature = "serde", serde(default))]
    issuer_groups: HashMap<StandardId, LegalEntityGroup>,
    #[cfg_attr(feature = "serde", serde(default))]
    issuer_curve_ids: HashMap<LegalEntityGroup, HashMap<Currency, CurveId>>,
}

impl DefaultLegalEntityDiscountingLookup {
    /// Lookup with no mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `legal_entity` to a repo group.
    pub fn with_repo_group(mut self, legal_entity: StandardId, group: RepoGroup) -> Self {
        self.repo_groups.insert(legal_entity, group);
        self
    }

    /// Map `group` in `currency` to a repo zero-rate curve.
    pub fn with_repo_curve(mut self, group: RepoGroup, currency: Currency, curve_id: CurveId) -> Self {
        self.repo_curve_ids.entry(group).or_default().insert(currency, curve_id);
        self
    }

    /// Assign `legal_entity` to an issuer group.
    pub fn with_issuer_group(mut self, legal_entity: StandardId, group: LegalEntityGroup) -> Self {
        self.issuer_groups.insert(legal_entity, group);
        self
    }

    /// Map `group` in `currency` to an issuer zero-rate curve.
    pub fn with_issuer_curve(mut self, group: LegalEntityGroup, currency: Currency, curve_id: CurveId) -> Self {
        self.issuer_curve_ids.entry(group).or_default().insert(currency, curve_id);
        self
    }

    /// Every market data id this lookup reads.
    pub fn requirements(&self) -> BTreeSet<MarketDataId> {
        self.repo_curve_ids
            .values()
            .chain(self.issuer_curve_ids.values())
            .flat_map(HashMap::values)
            .cloned()
            .map(MarketDataId::Curve)
            .collect()
    }
}

fn discount_curve(
    market_data: &MarketDataSnapshot,
    currency: Currency,
    curve_id: &CurveId,
) -> Result<DiscountCurve, MarketDataError> {
    let zero_rates = market_data.curve(&MarketDataId::Curve(curve_id.clone()))?;
    Ok(DiscountCurve::new(currency, zero_rates.clone()))
}

impl LegalEntityDiscountingMarketDataLookup for DefaultLegalEntityDiscountingLookup {
    fn discounting_provider(
        &self,
        market_data: &MarketDataSnapshot,
    ) -> Result<LegalEntityDiscountingProvider, MarketDataError> {
        let mut provider = LegalEntityDiscountingProvider::new(market_data.valuation_date());

        for (legal_entity, group) in &self.repo_groups {
            provider = provider.with_repo_group(legal_entity.clone(), group.clone());
        }
        for (group, by_currency) in &self.repo_curve_ids {
            for (currency, curve_id) in by_currency {
                provider = provider.with_repo_curve(group.clone(), discount_curve(market_data, *currency, curve_id)?);
            }
        }
        for (legal_entity, group) in &self.issuer_groups {
            provider = provider.with_issuer_group(legal_entity.clone(), group.clone());
        }
        for (group, by_currency) in &self.issuer_curve_ids {
            for (currency, curve_id) in by_currency {
                provider = provider.with_issuer_curve(group.clone(), discount_curve(market_data, *currency, curve_id)?);
            }
        }
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pricer_core::market_data::NodalCurve;

    #[test]
    fn test_missing_issuer_curve() {
        let lookup = DefaultLegalEntityDiscountingLookup::new().with_issuer_curve(
            LegalEntityGroup::new("GOVT1"),
            Currency::GBP,
            CurveId::new("GOVT1-GBP"),
        );
        let snapshot = MarketDataSnapshot::builder(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
            .add_curve(CurveId::new("GOVT1-USD"), NodalCurve::constant(0.04).unwrap())
            .build();
        assert_eq!(
            lookup.discounting_provider(&snapshot),
            Err(MarketDataError::MissingMarketData {
                id: MarketDataId::curve("GOVT1-GBP")
            })
        );
    }

    #[test]
    fn test_requirements() {
        let lookup = DefaultLegalEntityDiscountingLookup::new()
            .with_repo_curve(RepoGroup::new("A"), Currency::USD, CurveId::new("USD-Repo"))
            .with_issuer_curve(LegalEntityGroup::new("B"), Currency::USD, CurveId::new("B-USD"))
            .with_issuer_curve(LegalEntityGroup::new("B"), Currency::EUR, CurveId::new("B-EUR"));
        let ids: Vec<String> = lookup.requirements().iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["curve:B-EUR", "curve:B-USD", "curve:USD-Repo"]);
    }
}
