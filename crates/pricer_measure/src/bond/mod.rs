//! Bond discounting by legal entity.
//!
//! Repo and issuer curves are selected through group assignments, so many
//! legal entities can share one curve.

mod lookup;
mod provider;
mod view;

pub use lookup::{DefaultLegalEntityDiscountingLookup, LegalEntityDiscountingMarketDataLookup};
pub use provider::LegalEntityDiscountingProvider;
pub use view::{LegalEntityDiscountingMarketData, LegalEntityDiscountingScenarioMarketData};
