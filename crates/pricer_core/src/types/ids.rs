//! Identifier types for market entities.
//!
//! Newtypes keep legal entities, curve groups and indices apart at compile
//! time. [`StandardId`] is the two-part `scheme~value` identifier used for
//! legal entities and quotes; the group and index names are plain strings.

use std::fmt;
use std::str::FromStr;

use super::error::IdentifierError;

/// Declares a string-backed identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier from its name.
            #[inline]
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Returns the name as a string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

pub(crate) use string_id;

string_id!(
    /// Group of securities sharing one repo curve.
    ///
    /// ```
    /// use pricer_core::types::RepoGroup;
    ///
    /// let group = RepoGroup::new("GOVT1 BOND");
    /// assert_eq!(group.as_str(), "GOVT1 BOND");
    /// ```
    RepoGroup
);

string_id!(
    /// Group of issuers sharing one issuer curve.
    LegalEntityGroup
);

string_id!(
    /// Name of a rate index, such as `USD-LIBOR-3M`.
    IndexId
);

/// Two-part identifier: a scheme naming the identifier space and a value
/// unique within it.
///
/// # Examples
///
/// ```
/// use pricer_core::types::StandardId;
///
/// let id = StandardId::of("OG-Ticker", "GOVT1").unwrap();
/// assert_eq!(id.to_string(), "OG-Ticker~GOVT1");
///
/// let parsed: StandardId = "OG-Ticker~GOVT1".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct StandardId {
    scheme: String,
    value: String,
}

impl StandardId {
    /// Separator between scheme and value in the text form.
    pub const SEPARATOR: char = '~';

    /// Creates an identifier from a non-empty scheme and value.
    pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> Result<Self, IdentifierError> {
        let scheme = scheme.into();
        let value = value.into();
        if scheme.is_empty() {
            return Err(IdentifierError::Empty { part: "scheme" });
        }
        if value.is_empty() {
            return Err(IdentifierError::Empty { part: "value" });
        }
        Ok(Self { scheme, value })
    }

    /// Returns the scheme.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.scheme, Self::SEPARATOR, self.value)
    }
}

impl FromStr for StandardId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(Self::SEPARATOR) {
            Some((scheme, value)) => StandardId::of(scheme, value),
            None => Err(IdentifierError::Format(s.to_string())),
        }
    }
}

impl TryFrom<String> for StandardId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StandardId> for String {
    fn from(id: StandardId) -> Self {
        id.to_string()
    }
}
