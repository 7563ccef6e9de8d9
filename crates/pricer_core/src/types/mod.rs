//! Core financial identifier types.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes
//! - `ids`: Strongly-typed identifiers for legal entities, groups and indices
//! - `error`: Errors from currency and identifier parsing
//!
//! # Re-exports
//!
//! - [`Currency`] from `currency`
//! - [`StandardId`], [`RepoGroup`], [`LegalEntityGroup`], [`IndexId`] from `ids`
//! - [`CurrencyError`], [`IdentifierError`] from `error`

pub mod currency;
pub mod error;
pub mod ids;

pub use currency::Currency;
pub use error::{CurrencyError, IdentifierError};
pub use ids::{IndexId, LegalEntityGroup, RepoGroup, StandardId};
