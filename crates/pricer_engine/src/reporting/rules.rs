//! Reporting currency rules.

use std::fmt;
use std::sync::Arc;

use pricer_core::types::Currency;
use serde::{Deserialize, Serialize};

use super::{CalculationTarget, ReportingRuleError};

/// Chooses the currency a target's results are reported in.
///
/// Returning `None` means the rule has no opinion; it is not an error.
pub trait ReportingRule: fmt::Debug + Send + Sync {
    /// Reporting currency for `target`, if this rule determines one.
    fn reporting_currency(&self, target: &dyn CalculationTarget) -> Option<Currency>;
}

/// The closed set of reporting rules, plus an escape hatch for custom ones.
///
/// # Variants
///
/// - `Empty`: No currency for any target
/// - `Fixed`: The same currency for every target, without inspecting it
/// - `Composite`: The first rule, in order, that yields a currency
/// - `Custom`: A caller-supplied [`ReportingRule`]
///
/// Composition goes through [`of`](Self::of), which never wraps zero or one
/// rule in a `Composite`.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_engine::reporting::{CalculationTarget, ReportingRule, ReportingRules};
///
/// #[derive(Debug)]
/// struct Trade;
///
/// impl CalculationTarget for Trade {
///     fn target_type(&self) -> &str {
///         "Trade"
///     }
/// }
///
/// let rules = ReportingRules::empty().composed_with(ReportingRules::fixed(Currency::GBP));
/// assert_eq!(rules.reporting_currency(&Trade), Some(Currency::GBP));
///
/// assert_eq!(ReportingRules::of([]), ReportingRules::Empty);
/// assert_eq!(ReportingRules::of([ReportingRules::fixed(Currency::USD)]), ReportingRules::Fixed(Currency::USD));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingRules {
    /// No reporting currency.
    #[default]
    Empty,
    /// A fixed reporting currency.
    Fixed(Currency),
    /// Ordered delegates; the first `Some` wins.
    Composite(Vec<ReportingRules>),
    /// A caller-supplied rule. Never serialised.
    #[serde(skip)]
    Custom(Arc<dyn ReportingRule>),
}

impl ReportingRules {
    /// The rule that never yields a currency.
    pub fn empty() -> Self {
        ReportingRules::Empty
    }

    /// The rule that always yields `currency`.
    pub fn fixed(currency: Currency) -> Self {
        ReportingRules::Fixed(currency)
    }

    /// Wrap a caller-supplied rule.
    pub fn custom(rule: impl ReportingRule + 'static) -> Self {
        ReportingRules::Custom(Arc::new(rule))
    }

    /// Compose rules, tried in the given order.
    ///
    /// No rules gives [`Empty`](Self::Empty) and a single rule is returned
    /// unchanged; otherwise the rules become a [`Composite`](Self::Composite).
    pub fn of(rules: impl IntoIterator<Item = ReportingRules>) -> Self {
        let mut rules: Vec<ReportingRules> = rules.into_iter().collect();
        match rules.len() {
            0 => ReportingRules::Empty,
            1 => rules.pop().unwrap_or_default(),
            _ => ReportingRules::Composite(rules),
        }
    }

    /// `self` first, then `other`.
    pub fn composed_with(self, other: ReportingRules) -> Self {
        Self::of([self, other])
    }

    /// Report in the target's own currency.
    ///
    /// # Errors
    ///
    /// Always `ReportingRuleError::NotImplemented`.
    pub fn target_currency() -> Result<Self, ReportingRuleError> {
        Err(ReportingRuleError::NotImplemented {
            rule: "target currency",
        })
    }

    /// Report in the currency of the pay leg.
    ///
    /// # Errors
    ///
    /// Always `ReportingRuleError::NotImplemented`.
    pub fn pay_leg_currency() -> Result<Self, ReportingRuleError> {
        Err(ReportingRuleError::NotImplemented {
            rule: "pay leg currency",
        })
    }

    /// Report in the currency of the receive leg.
    ///
    /// # Errors
    ///
    /// Always `ReportingRuleError::NotImplemented`.
    pub fn receive_leg_currency() -> Result<Self, ReportingRuleError> {
        Err(ReportingRuleError::NotImplemented {
            rule: "receive leg currency",
        })
    }
}

impl ReportingRule for ReportingRules {
    fn reporting_currency(&self, target: &dyn CalculationTarget) -> Option<Currency> {
        match self {
            ReportingRules::Empty => None,
            ReportingRules::Fixed(currency) => Some(*currency),
            ReportingRules::Composite(rules) => rules.iter().enumerate().find_map(|(position, rule)| {
                let currency = rule.reporting_currency(target)?;
                tracing::trace!(
                    position,
                    %currency,
                    target_type = target.target_type(),
                    "composite reporting rule matched"
                );
                Some(currency)
            }),
            ReportingRules::Custom(rule) => rule.reporting_currency(target),
        }
    }
}

impl PartialEq for ReportingRules {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ReportingRules::Empty, ReportingRules::Empty) => true,
            (ReportingRules::Fixed(a), ReportingRules::Fixed(b)) => a == b,
            (ReportingRules::Composite(a), ReportingRules::Composite(b)) => a == b,
            (ReportingRules::Custom(a), ReportingRules::Custom(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}

impl From<Currency> for ReportingRules {
    fn from(currency: Currency) -> Self {
        ReportingRules::Fixed(currency)
    }
}

impl From<Arc<dyn ReportingRule>> for ReportingRules {
    fn from(rule: Arc<dyn ReportingRule>) -> Self {
        ReportingRules::Custom(rule)
    }
}
