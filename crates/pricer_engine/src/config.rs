//! Calculation rules configuration.
//!
//! Handles loading of calculation rules from TOML files with environment
//! variable override support.
//!
//! ```toml
//! log_level = "info"
//! warm_scenario_cache = true
//!
//! [[reporting_rules]]
//! type = "fixed"
//! currency = "USD"
//! ```

use std::path::{Path, PathBuf};

use pricer_core::types::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reporting::{ReportingRuleError, ReportingRules};

/// One configured reporting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReportingRuleConfig {
    /// No reporting currency
    Empty,
    /// A fixed reporting currency
    Fixed {
        /// ISO currency code
        currency: Currency,
    },
    /// The target's own currency
    TargetCurrency,
    /// The pay leg currency
    PayLegCurrency,
    /// The receive leg currency
    ReceiveLegCurrency,
}

impl ReportingRuleConfig {
    /// Build the rule.
    pub fn to_rule(&self) -> Result<ReportingRules, ReportingRuleError> {
        match self {
            Self::Empty => Ok(ReportingRules::empty()),
            Self::Fixed { currency } => Ok(ReportingRules::fixed(*currency)),
            Self::TargetCurrency => ReportingRules::target_currency(),
            Self::PayLegCurrency => ReportingRules::pay_leg_currency(),
            Self::ReceiveLegCurrency => ReportingRules::receive_leg_currency(),
        }
    }
}

/// Calculation rules configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalculationRulesConfig {
    /// Reporting rules, tried in order
    #[serde(default)]
    pub reporting_rules: Vec<ReportingRuleConfig>,

    /// Resolve every scenario view up front
    #[serde(default)]
    pub warm_scenario_cache: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CalculationRulesConfig {
    fn default() -> Self {
        Self {
            reporting_rules: Vec::new(),
            warm_scenario_cache: false,
            log_level: default_log_level(),
        }
    }
}

impl CalculationRulesConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from default path or return default config
    pub fn load_or_default() -> Self {
        let config_path = PathBuf::from("demo/scenario_runner/config/calculation_rules.toml");
        Self::load(&config_path).unwrap_or_default()
    }

    /// Apply environment variable overrides
    ///
    /// - `PRICER_REPORTING_CURRENCY`: Replaces the configured rules with a
    ///   single fixed rule
    /// - `PRICER_WARM_SCENARIO_CACHE`: `true` or `false`
    /// - `PRICER_LOG_LEVEL`
    pub fn with_env_override(mut self) -> Self {
        if let Ok(code) = std::env::var("PRICER_REPORTING_CURRENCY") {
            match Currency::of(&code) {
                Ok(currency) => {
                    self.reporting_rules = vec![ReportingRuleConfig::Fixed { currency }];
                }
                Err(err) => {
                    tracing::debug!(%err, "ignoring PRICER_REPORTING_CURRENCY");
                }
            }
        }

        if let Ok(warm) = std::env::var("PRICER_WARM_SCENARIO_CACHE") {
            self.warm_scenario_cache = warm.parse().unwrap_or(self.warm_scenario_cache);
        }

        if let Ok(log_level) = std::env::var("PRICER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        // A fixed rule always answers, so nothing after it is ever consulted.
        if let Some(position) = self
            .reporting_rules
            .iter()
            .position(|rule| matches!(rule, ReportingRuleConfig::Fixed { .. }))
        {
            let unreachable = self.reporting_rules.len() - position - 1;
            if unreachable > 0 {
                errors.push(format!(
                    "{} reporting rule(s) after the fixed rule at position {} are unreachable",
                    unreachable, position
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// The configured rules composed in order.
    ///
    /// # Errors
    ///
    /// `ConfigError::Rule` if any configured rule is not implemented.
    pub fn reporting_rules(&self) -> Result<ReportingRules, ConfigError> {
        let rules = self
            .reporting_rules
            .iter()
            .map(ReportingRuleConfig::to_rule)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ReportingRules::of(rules))
    }

    /// Load configuration from file and validate
    pub fn load_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// A configured rule cannot be built
    #[error(transparent)]
    Rule(#[from] ReportingRuleError),
}
