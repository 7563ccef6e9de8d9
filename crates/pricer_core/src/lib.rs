//! # pricer_core: Market Data Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace. It owns the raw inputs
//! every calculation reads, and nothing that interprets them:
//! - Currency and identifier types (`types`)
//! - Market data ids and values (`market_data::id`, `market_data::value`)
//! - Single-state snapshots: `MarketDataSnapshot` (`market_data::snapshot`)
//! - Multi-scenario sets: `ScenarioMarketData`, `MarketDataBox` (`market_data::scenario`)
//! - Nodal curves and the discount / survival objects built on them (`market_data::curves`)
//! - Error types: `MarketDataError`, `ScenarioIndexError`, `CurrencyError`
//!
//! Lookups and views that resolve domain objects from these snapshots live in
//! `pricer_measure` (Layer 2).
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pricer_core::market_data::{CurveId, MarketDataId, MarketDataSnapshot, NodalCurve};
//! use pricer_core::types::Currency;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
//! let usd_disc = CurveId::new("USD-Disc");
//!
//! let snapshot = MarketDataSnapshot::builder(date)
//!     .add_curve(usd_disc.clone(), NodalCurve::new(vec![1.0, 5.0], vec![0.04, 0.045]).unwrap())
//!     .build();
//!
//! let curve = snapshot.curve(&MarketDataId::Curve(usd_disc)).unwrap();
//! assert_eq!(curve.y_value(1.0), 0.04);
//! assert_eq!(Currency::USD.code(), "USD");
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for currencies, ids, snapshots and curves

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
