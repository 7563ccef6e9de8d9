//! Market data values held in snapshots.

use std::sync::Arc;

use super::curves::NodalCurve;

/// A single market observation.
///
/// Curves are held behind `Arc` so projecting a scenario out of a
/// [`ScenarioMarketData`](super::ScenarioMarketData) shares, rather than
/// copies, the node vectors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarketDataValue {
    /// Scalar quote (price, rate, recovery rate, ...)
    Quote(f64),
    /// Nodal curve
    Curve(Arc<NodalCurve>),
}

impl MarketDataValue {
    /// Human-readable kind, used in `WrongValueType` errors.
    pub fn kind(&self) -> &'static str {
        match self {
            MarketDataValue::Quote(_) => "quote",
            MarketDataValue::Curve(_) => "curve",
        }
    }

    /// The quote, if this is one.
    pub fn as_quote(&self) -> Option<f64> {
        match self {
            MarketDataValue::Quote(v) => Some(*v),
            _ => None,
        }
    }

    /// The curve, if this is one.
    pub fn as_curve(&self) -> Option<&Arc<NodalCurve>> {
        match self {
            MarketDataValue::Curve(c) => Some(c),
            _ => None,
        }
    }
}

impl From<f64> for MarketDataValue {
    fn from(value: f64) -> Self {
        MarketDataValue::Quote(value)
    }
}

impl From<NodalCurve> for MarketDataValue {
    fn from(curve: NodalCurve) -> Self {
        MarketDataValue::Curve(Arc::new(curve))
    }
}

impl From<Arc<NodalCurve>> for MarketDataValue {
    fn from(curve: Arc<NodalCurve>) -> Self {
        MarketDataValue::Curve(curve)
    }
}
