//! # Pricer Measure (L2: Market Data Views)
//!
//! Binds lookups to market data and memoises the result per scenario.
//!
//! This crate provides:
//! - The [`MarketDataView`] and [`ScenarioMarketDataView`] contracts
//! - A lock-free, fixed-size per-scenario memo ([`scenario::ScenarioViewCache`])
//! - Credit, swaption and legal-entity lookups with their views
//! - Rayon-based warm-up of every scenario (`parallel` feature)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pricer_measure (L2)           │
//! ├─────────────────────────────────────────┤
//! │  view/      - MarketDataView contracts  │
//! │  scenario/  - ScenarioViewCache,        │
//! │               CachedScenarioMarketData  │
//! │  credit/    - CreditRatesProvider       │
//! │  swaption/  - SwaptionVolatilities      │
//! │  bond/      - LegalEntityDiscounting    │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)             │
//! │  Snapshots, scenario sets, curves       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use pricer_core::market_data::{CurveId, MarketDataValue, NodalCurve, ScenarioMarketData};
//! use pricer_core::types::{Currency, LegalEntityGroup, StandardId};
//! use pricer_measure::bond::{
//!     DefaultLegalEntityDiscountingLookup, LegalEntityDiscountingScenarioMarketData,
//! };
//! use pricer_measure::ScenarioMarketDataView;
//!
//! let issuer = StandardId::of("LEI", "GOVT1").unwrap();
//! let lookup = Arc::new(
//!     DefaultLegalEntityDiscountingLookup::new()
//!         .with_issuer_group(issuer.clone(), LegalEntityGroup::new("GOVT1"))
//!         .with_issuer_curve(LegalEntityGroup::new("GOVT1"), Currency::USD, CurveId::new("GOVT1-USD")),
//! );
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
//! let curves = [0.040, 0.041, 0.039]
//!     .iter()
//!     .map(|r| MarketDataValue::from(NodalCurve::constant(*r).unwrap()))
//!     .collect();
//! let market_data = ScenarioMarketData::builder(3, date)
//!     .add_scenario_values(CurveId::new("GOVT1-USD"), curves)
//!     .build()
//!     .unwrap();
//!
//! let view = LegalEntityDiscountingScenarioMarketData::of(lookup, Arc::new(market_data));
//! let down = view.scenario(2).unwrap();
//! let rate = down
//!     .discounting_provider()
//!     .issuer_curve(&issuer, Currency::USD)
//!     .unwrap()
//!     .zero_rate(1.0)
//!     .unwrap();
//! assert_eq!(rate, 0.039);
//! assert!(view.scenario(3).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Rayon-backed [`scenario::resolve_all`] and [`scenario::warm_all`]
//! - `serde` (default): Serialise lookups and views; deserialised views are rebuilt
//!   through their constructor

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bond;
pub mod credit;
pub mod scenario;
pub mod swaption;
pub mod view;

pub use scenario::CachedScenarioMarketData;
pub use view::{MarketDataView, ScenarioMarketDataView};
