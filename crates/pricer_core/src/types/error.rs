//! Error types for currency and identifier parsing.

use thiserror::Error;

/// Currency-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::CurrencyError;
///
/// let err = CurrencyError::InvalidCode("US".to_string());
/// assert_eq!(format!("{}", err), "Invalid currency code: 'US'");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Code is not three ASCII letters.
    #[error("Invalid currency code: '{0}'")]
    InvalidCode(String),
}

/// Identifier parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Scheme or value was empty.
    #[error("Identifier {part} must not be empty")]
    Empty {
        /// Which part was empty ("scheme" or "value")
        part: &'static str,
    },

    /// Text did not have the `scheme~value` shape.
    #[error("Invalid identifier format: '{0}', expected 'scheme~value'")]
    Format(String),
}
