//! Reporting rule errors.

use thiserror::Error;

/// Reporting rule construction errors.
///
/// # Examples
///
/// ```
/// use pricer_engine::reporting::{ReportingRuleError, ReportingRules};
///
/// let err = ReportingRules::pay_leg_currency().unwrap_err();
/// assert_eq!(err, ReportingRuleError::NotImplemented { rule: "pay leg currency" });
/// assert_eq!(err.to_string(), "Reporting rule not implemented: pay leg currency");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingRuleError {
    /// The named rule exists in the vocabulary but has no behaviour yet.
    #[error("Reporting rule not implemented: {rule}")]
    NotImplemented {
        /// Name of the rule
        rule: &'static str,
    },
}
