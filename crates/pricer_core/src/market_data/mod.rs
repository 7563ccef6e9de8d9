//! Market data containers for pricing and risk.
//!
//! Calculations never read raw observations directly; a lookup in
//! `pricer_measure` resolves domain objects from the containers here.
//!
//! # Components
//!
//! - [`id`]: Keys of observations ([`MarketDataId`], [`CurveId`])
//! - [`value`]: Observations ([`MarketDataValue`])
//! - [`snapshot`]: One valuation state ([`MarketDataSnapshot`])
//! - [`scenario`]: N parallel valuation states ([`ScenarioMarketData`], [`MarketDataBox`])
//! - [`curves`]: Nodal curves and discount / survival curves built on them
//! - [`error`]: Market data error types ([`MarketDataError`], [`ScenarioIndexError`])
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::market_data::{MarketDataId, MarketDataSnapshot, ScenarioMarketData};
//! use pricer_core::types::StandardId;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
//! let quote = StandardId::of("OG-Ticker", "SPOT").unwrap();
//!
//! let base = MarketDataSnapshot::builder(date).add_quote(quote.clone(), 100.0).build();
//! let up = MarketDataSnapshot::builder(date).add_quote(quote.clone(), 110.0).build();
//!
//! let scenarios = ScenarioMarketData::from_scenarios(vec![base, up]).unwrap();
//! let spot = scenarios.scenario(1).unwrap().quote(&MarketDataId::Quote(quote)).unwrap();
//! assert_eq!(spot, 110.0);
//! ```

pub mod curves;
pub mod error;
pub mod id;
pub mod scenario;
pub mod snapshot;
pub mod value;

// Re-export commonly used types
pub use curves::{DiscountCurve, NodalCurve, SurvivalCurve};
pub use error::{MarketDataError, ScenarioIndexError};
pub use id::{CurveId, MarketDataId};
pub use scenario::{MarketDataBox, ScenarioMarketData, ScenarioMarketDataBuilder};
pub use snapshot::{MarketDataSnapshot, MarketDataSnapshotBuilder};
pub use value::MarketDataValue;
