//! # Pricer Engine (L3: Calculation Rules)
//!
//! Rules that apply to a calculation as a whole rather than to its market
//! data: which currency results are reported in, and how those rules are
//! configured.
//!
//! - [`reporting`]: `ReportingRules` and the `CalculationTarget` they inspect
//! - [`config`]: `CalculationRulesConfig`, loaded from TOML
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::Currency;
//! use pricer_engine::config::CalculationRulesConfig;
//! use pricer_engine::reporting::{CalculationTarget, ReportingRule};
//!
//! #[derive(Debug)]
//! struct Bond;
//!
//! impl CalculationTarget for Bond {
//!     fn target_type(&self) -> &str {
//!         "Bond"
//!     }
//! }
//!
//! let config = CalculationRulesConfig::from_toml_str(
//!     r#"
//!     [[reporting_rules]]
//!     type = "empty"
//!
//!     [[reporting_rules]]
//!     type = "fixed"
//!     currency = "EUR"
//!     "#,
//! )
//! .unwrap();
//!
//! let rules = config.reporting_rules().unwrap();
//! assert_eq!(rules.reporting_currency(&Bond), Some(Currency::EUR));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod reporting;

pub use config::{CalculationRulesConfig, ConfigError, ReportingRuleConfig};
pub use reporting::{CalculationTarget, ReportingRule, ReportingRuleError, ReportingRules};
