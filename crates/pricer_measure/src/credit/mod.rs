//! Credit rates: discount curves, survival curves and recovery rates.
//!
//! - [`CreditRatesMarketDataLookup`]: resolves a [`CreditRatesProvider`]
//! - [`DefaultCreditRatesLookup`]: id-mapping implementation
//! - [`CreditRatesMarketData`]: single-snapshot view, provider precomputed
//! - [`CreditRatesScenarioMarketData`]: per-scenario memoised views

mod lookup;
mod provider;
mod view;

pub use lookup::{CreditRatesMarketDataLookup, DefaultCreditRatesLookup};
pub use provider::CreditRatesProvider;
pub use view::{CreditRatesMarketData, CreditRatesScenarioMarketData};
