//! Market data identifiers.

use std::fmt;
use std::str::FromStr;

use crate::types::ids::string_id;
use crate::types::StandardId;

use super::error::MarketDataError;

string_id!(
    /// Name of a curve held in a snapshot, such as `USD-Disc`.
    ///
    /// ```
    /// use pricer_core::market_data::CurveId;
    ///
    /// assert_eq!(CurveId::new("USD-Disc").as_str(), "USD-Disc");
    /// ```
    CurveId
);

/// Key of a single observation in a market data snapshot.
///
/// The text form is `curve:<name>` or `quote:<scheme>~<value>`; it is also
/// the serialised form, so snapshots serialise as plain string-keyed maps.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{CurveId, MarketDataId};
///
/// let id = MarketDataId::curve("EUR-Disc");
/// assert_eq!(id, MarketDataId::Curve(CurveId::new("EUR-Disc")));
/// assert_eq!(id.to_string(), "curve:EUR-Disc");
///
/// let parsed: MarketDataId = "quote:LEI~ISSUER-A".parse().unwrap();
/// assert!(matches!(parsed, MarketDataId::Quote(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum MarketDataId {
    /// A curve
    Curve(CurveId),
    /// A scalar quote
    Quote(StandardId),
}

impl MarketDataId {
    /// Shorthand for `MarketDataId::Curve(CurveId::new(name))`.
    pub fn curve(name: impl Into<String>) -> Self {
        MarketDataId::Curve(CurveId::new(name))
    }
}

impl From<CurveId> for MarketDataId {
    fn from(id: CurveId) -> Self {
        MarketDataId::Curve(id)
    }
}

impl From<StandardId> for MarketDataId {
    fn from(id: StandardId) -> Self {
        MarketDataId::Quote(id)
    }
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataId::Curve(id) => write!(f, "curve:{}", id),
            MarketDataId::Quote(id) => write!(f, "quote:{}", id),
        }
    }
}

impl FromStr for MarketDataId {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("curve", name)) if !name.is_empty() => Ok(MarketDataId::curve(name)),
            Some(("quote", id)) => id
                .parse::<StandardId>()
                .map(MarketDataId::Quote)
                .map_err(|e| MarketDataError::configuration(e.to_string())),
            _ => Err(MarketDataError::configuration(format!(
                "unrecognised market data id '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for MarketDataId {
    type Error = MarketDataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarketDataId> for String {
    fn from(id: MarketDataId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_agree() {
        let ids = [
            MarketDataId::curve("USD-Disc"),
            MarketDataId::Quote(StandardId::of("LEI", "ABC").unwrap()),
        ];
        for id in ids {
            let parsed: MarketDataId = id.to_string().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(matches!(
            "surface:X".parse::<MarketDataId>(),
            Err(MarketDataError::Configuration(_))
        ));
        assert!("curve:".parse::<MarketDataId>().is_err());
        assert!("quote:missing-separator".parse::<MarketDataId>().is_err());
    }

    #[test]
    fn test_conversions() {
        let curve: MarketDataId = CurveId::new("C").into();
        assert_eq!(curve, MarketDataId::curve("C"));
        let quote: MarketDataId = StandardId::of("S", "V").unwrap().into();
        assert_eq!(quote.to_string(), "quote:S~V");
    }
}
