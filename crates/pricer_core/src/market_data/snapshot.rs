//! Single-state market data snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use super::curves::NodalCurve;
use super::error::MarketDataError;
use super::id::{CurveId, MarketDataId};
use super::value::MarketDataValue;
use crate::types::StandardId;

/// Immutable market observations for one valuation state.
///
/// A snapshot is built once through [`MarketDataSnapshotBuilder`] and never
/// changes afterwards; share it between views with `Arc`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{MarketDataError, MarketDataId, MarketDataSnapshot};
/// use pricer_core::types::StandardId;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let recovery = StandardId::of("RR", "ISSUER-A").unwrap();
///
/// let snapshot = MarketDataSnapshot::builder(date)
///     .add_quote(recovery.clone(), 0.4)
///     .build();
///
/// assert_eq!(snapshot.valuation_date(), date);
/// assert_eq!(snapshot.quote(&MarketDataId::Quote(recovery)).unwrap(), 0.4);
/// assert!(matches!(
///     snapshot.quote(&MarketDataId::curve("missing")),
///     Err(MarketDataError::MissingMarketData { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketDataSnapshot {
    valuation_date: NaiveDate,
    values: HashMap<MarketDataId, MarketDataValue>,
}

impl MarketDataSnapshot {
    /// Snapshot from a complete value map.
    pub fn new(valuation_date: NaiveDate, values: HashMap<MarketDataId, MarketDataValue>) -> Self {
        Self {
            valuation_date,
            values,
        }
    }

    /// Start building a snapshot for `valuation_date`.
    pub fn builder(valuation_date: NaiveDate) -> MarketDataSnapshotBuilder {
        MarketDataSnapshotBuilder {
            valuation_date,
            values: HashMap::new(),
        }
    }

    /// The valuation date.
    #[inline]
    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    /// Whether `id` is present.
    #[inline]
    pub fn contains(&self, id: &MarketDataId) -> bool {
        self.values.contains_key(id)
    }

    /// Ids of every value held.
    pub fn ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.values.keys()
    }

    /// Number of values held.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the snapshot holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value for `id`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::MissingMarketData` if absent.
    pub fn value(&self, id: &MarketDataId) -> Result<&MarketDataValue, MarketDataError> {
        self.values
            .get(id)
            .ok_or_else(|| MarketDataError::MissingMarketData { id: id.clone() })
    }

    /// The quote for `id`.
    pub fn quote(&self, id: &MarketDataId) -> Result<f64, MarketDataError> {
        let value = self.value(id)?;
        value.as_quote().ok_or_else(|| MarketDataError::WrongValueType {
            id: id.clone(),
            expected: "quote",
        })
    }

    /// The curve for `id`.
    pub fn curve(&self, id: &MarketDataId) -> Result<&Arc<NodalCurve>, MarketDataError> {
        let value = self.value(id)?;
        value.as_curve().ok_or_else(|| MarketDataError::WrongValueType {
            id: id.clone(),
            expected: "curve",
        })
    }

    pub(crate) fn into_values(self) -> HashMap<MarketDataId, MarketDataValue> {
        self.values
    }
}

/// Builder for [`MarketDataSnapshot`].
#[derive(Debug, Clone)]
pub struct MarketDataSnapshotBuilder {
    valuation_date: NaiveDate,
    values: HashMap<MarketDataId, MarketDataValue>,
}

impl MarketDataSnapshotBuilder {
    /// Add or replace a value.
    pub fn add_value(mut self, id: impl Into<MarketDataId>, value: impl Into<MarketDataValue>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    /// Add or replace a curve.
    pub fn add_curve(self, id: CurveId, curve: impl Into<MarketDataValue>) -> Self {
        self.add_value(id, curve)
    }

    /// Add or replace a quote.
    pub fn add_quote(self, id: StandardId, quote: f64) -> Self {
        self.add_value(id, quote)
    }

    /// Finish the snapshot.
    pub fn build(self) -> MarketDataSnapshot {
        MarketDataSnapshot::new(self.valuation_date, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn snapshot() -> MarketDataSnapshot {
        MarketDataSnapshot::builder(date())
            .add_curve(CurveId::new("USD-Disc"), NodalCurve::constant(0.05).unwrap())
            .add_quote(StandardId::of("RR", "A").unwrap(), 0.4)
            .build()
    }

    #[test]
    fn test_lookup_by_id() {
        let s = snapshot();
        assert_eq!(s.len(), 2);
        assert!(s.contains(&MarketDataId::curve("USD-Disc")));
        let curve = s.curve(&MarketDataId::curve("USD-Disc")).unwrap();
        assert_eq!(curve.y_value(1.0), 0.05);
    }

    #[test]
    fn test_missing_id() {
        let s = snapshot();
        let id = MarketDataId::curve("EUR-Disc");
        assert_eq!(
            s.value(&id),
            Err(MarketDataError::MissingMarketData { id: id.clone() })
        );
    }

    #[test]
    fn test_wrong_value_type() {
        let s = snapshot();
        let id = MarketDataId::curve("USD-Disc");
        assert_eq!(
            s.quote(&id),
            Err(MarketDataError::WrongValueType {
                id,
                expected: "quote"
            })
        );
    }

    #[test]
    fn test_builder_replaces_existing() {
        let s = MarketDataSnapshot::builder(date())
            .add_quote(StandardId::of("Q", "1").unwrap(), 1.0)
            .add_quote(StandardId::of("Q", "1").unwrap(), 2.0)
            .build();
        assert_eq!(s.len(), 1);
        assert_eq!(
            s.quote(&StandardId::of("Q", "1").unwrap().into()).unwrap(),
            2.0
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let s = snapshot();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("curve:USD-Disc"));
        let back: MarketDataSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
