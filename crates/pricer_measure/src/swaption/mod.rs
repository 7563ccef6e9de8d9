//! Swaption volatilities by rate index.

mod lookup;
mod view;
mod volatilities;

pub use lookup::{DefaultSwaptionLookup, SwaptionMarketDataLookup};
pub use view::{SwaptionMarketData, SwaptionScenarioMarketData};
pub use volatilities::SwaptionVolatilities;
