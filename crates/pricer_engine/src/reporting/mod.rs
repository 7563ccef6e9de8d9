//! Reporting currency rules.
//!
//! A [`ReportingRules`] value decides which currency a calculation target's
//! results are reported in. Rules compose in order: the first one that
//! yields a currency wins and later ones are never consulted.
//!
//! - [`CalculationTarget`]: What a rule inspects
//! - [`ReportingRule`]: The rule contract
//! - [`ReportingRules`]: Empty, fixed, composite and custom rules
//! - [`ReportingRuleError`]: Rules that are named but not implemented

mod error;
mod rules;
mod target;

pub use error::ReportingRuleError;
pub use rules::{ReportingRule, ReportingRules};
pub use target::CalculationTarget;
