//! Calculation targets.

use std::fmt;

/// Anything a calculation runs against: a trade, a position, a security.
///
/// Reporting rules receive targets as trait objects and may inspect them;
/// the rules in this crate accept every kind of target.
pub trait CalculationTarget: fmt::Debug + Send + Sync {
    /// Classification of the target, such as `"Trade"` or `"Position"`.
    fn target_type(&self) -> &str;
}
