//! Resolved repo and issuer discount curves.

use std::collections::HashMap;

use chrono::NaiveDate;
use pricer_core::market_data::{DiscountCurve, MarketDataError};
use pricer_core::types::{Currency, LegalEntityGroup, RepoGroup, StandardId};

/// Discount curves for pricing bonds by legal entity.
///
/// A legal entity is first mapped to a group, and the group and currency
/// select the curve. Repo curves discount the security up to settlement;
/// issuer curves discount its cash flows.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalEntityDiscountingProvider {
    valuation_date: NaiveDate,
    repo_groups: HashMap<StandardId, RepoGroup>,
    repo_curves: HashMap<RepoGroup, HashMap<Currency, DiscountCurve>>,
    issuer_groups: HashMap<StandardId, LegalEntityGroup>,
    issuer_curves: HashMap<LegalEntityGroup, HashMap<Currency, DiscountCurve>>,
}

impl LegalEntityDiscountingProvider {
    /// Empty provider at `valuation_date`.
    pub fn new(valuation_date: NaiveDate) -> Self {
        Self {
            valuation_date,
            repo_groups: HashMap::new(),
            repo_curves: HashMap::new(),
            issuer_groups: HashMap::new(),
            issuer_curves: HashMap::new(),
        }
    }

    /// Assign `legal_entity` to a repo group.
    pub fn with_repo_group(mut self, legal_entity: StandardId, group: RepoGroup) -> Self {
        self.repo_groups.insert(legal_entity, group);
        self
    }

    /// Add the repo curve for `group`, keyed by the curve's currency.
    pub fn with_repo_curve(mut self, group: RepoGroup, curve: DiscountCurve) -> Self {
        self.repo_curves
            .entry(group)
            .or_default()
            .insert(curve.currency(), curve);
        self
    }

    /// Assign `legal_entity` to an issuer group.
    pub fn with_issuer_group(mut self, legal_entity: StandardId, group: LegalEntityGroup) -> Self {
        self.issuer_groups.insert(legal_entity, group);
        self
    }

    /// Add the issuer curve for `group`, keyed by the curve's currency.
    pub fn with_issuer_curve(mut self, group: LegalEntityGroup, curve: DiscountCurve) -> Self {
        self.issuer_curves
            .entry(group)
            .or_default()
            .insert(curve.currency(), curve);
        self
    }

    /// Valuation date.
    #[inline]
    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// Repo curve for securities of `legal_entity` in `currency`.
    pub fn repo_curve(&self, legal_entity: &StandardId, currency: Currency) -> Result<&DiscountCurve, MarketDataError> {
        let group = self
            .repo_groups
            .get(legal_entity)
            .ok_or_else(|| MarketDataError::missing_mapping("repo group", legal_entity))?;
        self.repo_curves
            .get(group)
            .and_then(|by_currency| by_currency.get(&currency))
            .ok_or_else(|| MarketDataError::missing_mapping("repo curve", format!("{}/{}", group, currency)))
    }

    /// Issuer curve for `legal_entity` in `currency`.
    pub fn issuer_curve(
        &self,
        legal_entity: &StandardId,
        currency: Currency,
    ) -> Result<&DiscountCurve, MarketDataError> {
        let group = self
            .issuer_groups
            .get(legal_entity)
            .ok_or_else(|| MarketDataError::missing_mapping("issuer group", legal_entity))?;
        self.issuer_curves
            .get(group)
            .and_then(|by_currency| by_currency.get(&currency))
            .ok_or_else(|| MarketDataError::missing_mapping("issuer curve", format!("{}/{}", group, currency)))
    }
}
