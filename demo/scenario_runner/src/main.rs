//! Scenario Runner Demo CLI
//!
//! Prices a small bond book under parallel shifts of the issuer curves,
//! reading every scenario through one memoised legal-entity view.
//!
//! ```text
//! scenario-runner [path/to/calculation_rules.toml]
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pricer_core::market_data::{CurveId, MarketDataValue, NodalCurve, ScenarioMarketData};
use pricer_core::types::{Currency, LegalEntityGroup, RepoGroup, StandardId};
use pricer_engine::config::CalculationRulesConfig;
use pricer_engine::reporting::{CalculationTarget, ReportingRule};
use pricer_measure::bond::{DefaultLegalEntityDiscountingLookup, LegalEntityDiscountingScenarioMarketData};
use pricer_measure::ScenarioMarketDataView;
use rayon::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Parallel shifts applied to the issuer curves, in basis points.
const SHIFTS_BP: [f64; 7] = [-150.0, -100.0, -50.0, 0.0, 50.0, 100.0, 150.0];

/// A zero-coupon bond holding.
#[derive(Debug)]
struct BondPosition {
    issuer: StandardId,
    currency: Currency,
    notional: f64,
    maturity: f64,
}

impl CalculationTarget for BondPosition {
    fn target_type(&self) -> &str {
        "BondPosition"
    }
}

fn issuer(name: &str) -> Result<StandardId> {
    StandardId::of("LEI", name).with_context(|| format!("invalid issuer id '{}'", name))
}

fn lookup() -> Result<DefaultLegalEntityDiscountingLookup> {
    let govt = issuer("GOVT1")?;
    let corp = issuer("CORP1")?;
    Ok(DefaultLegalEntityDiscountingLookup::new()
        .with_repo_group(govt.clone(), RepoGroup::new("GOVT1 BOND"))
        .with_repo_curve(RepoGroup::new("GOVT1 BOND"), Currency::USD, CurveId::new("USD-Repo"))
        .with_issuer_group(govt, LegalEntityGroup::new("GOVT1"))
        .with_issuer_curve(LegalEntityGroup::new("GOVT1"), Currency::USD, CurveId::new("GOVT1-USD"))
        .with_issuer_group(corp, LegalEntityGroup::new("CORP1"))
        .with_issuer_curve(LegalEntityGroup::new("CORP1"), Currency::USD, CurveId::new("CORP1-USD")))
}

/// Base curves with each issuer curve shifted per scenario; the repo curve
/// is shared by every scenario.
fn market_data(valuation_date: NaiveDate) -> Result<ScenarioMarketData> {
    let tenors = vec![0.5, 1.0, 2.0, 5.0, 10.0, 30.0];
    let govt = NodalCurve::new(tenors.clone(), vec![0.0410, 0.0400, 0.0385, 0.0380, 0.0395, 0.0420])?;
    let corp = NodalCurve::new(tenors.clone(), vec![0.0520, 0.0515, 0.0505, 0.0510, 0.0530, 0.0560])?;
    let repo = NodalCurve::new(tenors, vec![0.0430, 0.0425, 0.0415, 0.0410, 0.0410, 0.0410])?;

    let shifted = |curve: &NodalCurve| -> Result<Vec<MarketDataValue>> {
        let curves = SHIFTS_BP
            .par_iter()
            .map(|bp| curve.shifted(bp * 1e-4).map(MarketDataValue::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(curves)
    };

    let market_data = ScenarioMarketData::builder(SHIFTS_BP.len(), valuation_date)
        .add_scenario_values(CurveId::new("GOVT1-USD"), shifted(&govt)?)
        .add_scenario_values(CurveId::new("CORP1-USD"), shifted(&corp)?)
        .add_value(CurveId::new("USD-Repo"), repo)
        .build()?;
    Ok(market_data)
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => CalculationRulesConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CalculationRulesConfig::load_or_default(),
    }
    .with_env_override();
    config.validate()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(format!("scenario_runner={}", config.log_level).parse()?))
        .init();

    tracing::info!("Scenario Runner Starting...");

    let rules = config.reporting_rules()?;
    tracing::info!(?rules, "Reporting rules loaded");

    let valuation_date = NaiveDate::from_ymd_opt(2024, 6, 28).context("invalid valuation date")?;
    let market_data = Arc::new(market_data(valuation_date)?);
    let view = LegalEntityDiscountingScenarioMarketData::of(Arc::new(lookup()?), market_data);

    if config.warm_scenario_cache {
        pricer_measure::scenario::warm_all(&view)?;
        tracing::info!(scenarios = view.cached_count(), "Scenario cache warmed");
    }

    let book = vec![
        BondPosition {
            issuer: issuer("GOVT1")?,
            currency: Currency::USD,
            notional: 10_000_000.0,
            maturity: 7.0,
        },
        BondPosition {
            issuer: issuer("CORP1")?,
            currency: Currency::USD,
            notional: 5_000_000.0,
            maturity: 3.5,
        },
    ];

    for position in &book {
        let reporting = rules.reporting_currency(position).unwrap_or(position.currency);
        println!(
            "{} {} {:.1}y, reported in {}",
            position.target_type(),
            position.issuer,
            position.maturity,
            reporting
        );
        for (index, shift) in SHIFTS_BP.iter().enumerate() {
            let provider = view.scenario(index)?.discounting_provider();
            let df = provider
                .issuer_curve(&position.issuer, position.currency)?
                .discount_factor(position.maturity)?;
            println!("  {:>+7.0}bp  PV {:>15.2}", shift, position.notional * df);
        }
    }

    tracing::info!(resolved = view.cached_count(), "Scenario Runner Done");
    Ok(())
}
