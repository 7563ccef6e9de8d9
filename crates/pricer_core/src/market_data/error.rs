//! Market data error types.
//!
//! [`MarketDataError`] is the single error type shared by snapshots, lookups
//! and views. Lookup failures reach the caller as the exact value the lookup
//! produced; nothing between the lookup and the caller re-wraps them.

use super::id::MarketDataId;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `Configuration`: Invalid arguments when building a snapshot, lookup or view
/// - `ScenarioIndexOutOfRange`: Scenario index outside `[0, count)`
/// - `MissingMarketData`: An id the lookup needs is not in the snapshot
/// - `WrongValueType`: The id is present but holds another kind of value
/// - `MissingMapping`: The lookup has no id configured for the requested key
/// - `InvalidCurve`: Curve nodes rejected at construction
/// - `InvalidTime`: Negative year fraction passed to a curve query
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::ScenarioIndexOutOfRange { index: 3, count: 3 };
/// assert_eq!(format!("{}", err), "Scenario index 3 out of range for 3 scenarios");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Invalid construction arguments.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Scenario index outside the valid range.
    #[error("Scenario index {index} out of range for {count} scenarios")]
    ScenarioIndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of scenarios available
        count: usize,
    },

    /// Requested market data is not present.
    #[error("Market data not found: {id}")]
    MissingMarketData {
        /// The missing id
        id: MarketDataId,
    },

    /// Market data is present but of the wrong kind.
    #[error("Market data {id} is not a {expected}")]
    WrongValueType {
        /// The id that was read
        id: MarketDataId,
        /// The kind of value the caller expected
        expected: &'static str,
    },

    /// The lookup has no market data id for the requested key.
    #[error("No {kind} configured for {key}")]
    MissingMapping {
        /// What kind of mapping was consulted (e.g. "discount curve")
        kind: &'static str,
        /// The key that had no entry
        key: String,
    },

    /// Curve nodes are invalid.
    #[error("Invalid curve: {0}")]
    InvalidCurve(String),

    /// Negative year fraction.
    #[error("Invalid time: t = {t}")]
    InvalidTime {
        /// The rejected year fraction
        t: f64,
    },
}

impl MarketDataError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a missing-mapping error for any displayable key
    pub fn missing_mapping(kind: &'static str, key: impl std::fmt::Display) -> Self {
        Self::MissingMapping {
            kind,
            key: key.to_string(),
        }
    }
}

/// A scenario index outside `[0, count)`.
///
/// Raised by the scenario containers before any state is read or written.
/// Converts into [`MarketDataError::ScenarioIndexOutOfRange`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Scenario index {index} out of range for {count} scenarios")]
pub struct ScenarioIndexError {
    /// The requested index
    pub index: usize,
    /// Number of scenarios available
    pub count: usize,
}

impl ScenarioIndexError {
    /// Checks `index` against `count`.
    #[inline]
    pub fn check(index: usize, count: usize) -> Result<(), Self> {
        if index < count {
            Ok(())
        } else {
            Err(Self { index, count })
        }
    }
}

impl From<ScenarioIndexError> for MarketDataError {
    fn from(err: ScenarioIndexError) -> Self {
        MarketDataError::ScenarioIndexOutOfRange {
            index: err.index,
            count: err.count,
        }
    }
}
