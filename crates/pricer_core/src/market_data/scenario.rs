//! Market data for many parallel scenarios.
//!
//! This module provides:
//! - [`MarketDataBox`]: A value shared by all scenarios, or one per scenario
//! - [`ScenarioMarketData`]: N scenarios of market data with single-scenario projection
//!
//! Stress and bump-and-revalue runs usually move a handful of curves and
//! leave everything else untouched, so unmoved values are held once as
//! [`MarketDataBox::Single`] rather than copied N times.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::error::{MarketDataError, ScenarioIndexError};
use super::id::MarketDataId;
use super::snapshot::MarketDataSnapshot;
use super::value::MarketDataValue;

/// A value that is either common to every scenario or given per scenario.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::MarketDataBox;
///
/// let shared = MarketDataBox::Single(0.4);
/// assert_eq!(shared.value(7), Some(&0.4));
/// assert_eq!(shared.scenario_count(), None);
///
/// let per_scenario = MarketDataBox::Scenarios(vec![0.3, 0.5]);
/// assert_eq!(per_scenario.value(1), Some(&0.5));
/// assert_eq!(per_scenario.value(2), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarketDataBox<T> {
    /// One value used by every scenario
    Single(T),
    /// One value per scenario, in scenario order
    Scenarios(Vec<T>),
}

impl<T> MarketDataBox<T> {
    /// Number of scenarios this box was built for; `None` for a single value.
    pub fn scenario_count(&self) -> Option<usize> {
        match self {
            MarketDataBox::Single(_) => None,
            MarketDataBox::Scenarios(values) => Some(values.len()),
        }
    }

    /// Whether this holds one shared value.
    pub fn is_single(&self) -> bool {
        matches!(self, MarketDataBox::Single(_))
    }

    /// The value seen by scenario `index`.
    pub fn value(&self, index: usize) -> Option<&T> {
        match self {
            MarketDataBox::Single(value) => Some(value),
            MarketDataBox::Scenarios(values) => values.get(index),
        }
    }
}

/// Market data for N scenarios.
///
/// Every [`MarketDataBox::Scenarios`] entry holds exactly
/// `scenario_count()` values; this is checked once at construction so
/// projecting a scenario never fails for a valid index.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::market_data::{
///     MarketDataBox, MarketDataId, NodalCurve, ScenarioMarketData,
/// };
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let base = NodalCurve::constant(0.03).unwrap();
///
/// let scenarios = ScenarioMarketData::builder(3, date)
///     .add_scenario_values(
///         MarketDataId::curve("USD-Disc"),
///         vec![base.clone().into(), base.shifted(0.001).unwrap().into(), base.shifted(-0.001).unwrap().into()],
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(scenarios.scenario_count(), 3);
/// let bumped = scenarios.scenario(1).unwrap();
/// let rate = bumped.curve(&MarketDataId::curve("USD-Disc")).unwrap().y_value(1.0);
/// assert!((rate - 0.031).abs() < 1e-12);
/// assert!(scenarios.scenario(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ScenarioMarketDataRepr"))]
pub struct ScenarioMarketData {
    scenario_count: usize,
    valuation_date: MarketDataBox<NaiveDate>,
    values: HashMap<MarketDataId, MarketDataBox<MarketDataValue>>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ScenarioMarketDataRepr {
    scenario_count: usize,
    valuation_date: MarketDataBox<NaiveDate>,
    values: HashMap<MarketDataId, MarketDataBox<MarketDataValue>>,
}

#[cfg(feature = "serde")]
impl TryFrom<ScenarioMarketDataRepr> for ScenarioMarketData {
    type Error = MarketDataError;

    fn try_from(repr: ScenarioMarketDataRepr) -> Result<Self, Self::Error> {
        ScenarioMarketData::new(repr.scenario_count, repr.valuation_date, repr.values)
    }
}

impl ScenarioMarketData {
    /// Scenario market data from boxed values.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Configuration` if any per-scenario box, including the
    /// valuation date, does not hold exactly `scenario_count` values.
    pub fn new(
        scenario_count: usize,
        valuation_date: MarketDataBox<NaiveDate>,
        values: HashMap<MarketDataId, MarketDataBox<MarketDataValue>>,
    ) -> Result<Self, MarketDataError> {
        check_box_len("valuation date", &valuation_date, scenario_count)?;
        for (id, value) in &values {
            check_box_len(&id.to_string(), value, scenario_count)?;
        }
        Ok(Self {
            scenario_count,
            valuation_date,
            values,
        })
    }

    /// Start building scenario market data with a common valuation date.
    pub fn builder(scenario_count: usize, valuation_date: NaiveDate) -> ScenarioMarketDataBuilder {
        ScenarioMarketDataBuilder {
            scenario_count,
            valuation_date: MarketDataBox::Single(valuation_date),
            values: HashMap::new(),
        }
    }

    /// One scenario wrapping a single snapshot.
    pub fn single(snapshot: MarketDataSnapshot) -> Self {
        let valuation_date = MarketDataBox::Single(snapshot.valuation_date());
        let values = snapshot
            .into_values()
            .into_iter()
            .map(|(id, value)| (id, MarketDataBox::Single(value)))
            .collect();
        Self {
            scenario_count: 1,
            valuation_date,
            values,
        }
    }

    /// Scenarios from independent snapshots, in order.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Configuration` if the snapshots do not all hold the
    /// same set of ids.
    pub fn from_scenarios(snapshots: Vec<MarketDataSnapshot>) -> Result<Self, MarketDataError> {
        let scenario_count = snapshots.len();
        let dates = snapshots.iter().map(|s| s.valuation_date()).collect();

        let mut maps: Vec<HashMap<MarketDataId, MarketDataValue>> =
            snapshots.into_iter().map(|s| s.into_values()).collect();

        let ids: Vec<MarketDataId> = match maps.first() {
            Some(first) => first.keys().cloned().collect(),
            None => Vec::new(),
        };
        for (i, map) in maps.iter().enumerate().skip(1) {
            if map.len() != ids.len() || !ids.iter().all(|id| map.contains_key(id)) {
                return Err(MarketDataError::configuration(format!(
                    "scenario {} does not hold the same market data ids as scenario 0",
                    i
                )));
            }
        }

        let mut values = HashMap::with_capacity(ids.len());
        for id in ids {
            let per_scenario = maps
                .iter_mut()
                .filter_map(|map| map.remove(&id))
                .collect::<Vec<_>>();
            values.insert(id, MarketDataBox::Scenarios(per_scenario));
        }

        Self::new(scenario_count, MarketDataBox::Scenarios(dates), values)
    }

    /// Number of scenarios.
    #[inline]
    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    /// Valuation date, possibly different per scenario.
    #[inline]
    pub fn valuation_date(&self) -> &MarketDataBox<NaiveDate> {
        &self.valuation_date
    }

    /// Ids of every value held.
    pub fn ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.values.keys()
    }

    /// The boxed value for `id`.
    pub fn value(&self, id: &MarketDataId) -> Result<&MarketDataBox<MarketDataValue>, MarketDataError> {
        self.values
            .get(id)
            .ok_or_else(|| MarketDataError::MissingMarketData { id: id.clone() })
    }

    /// Project scenario `index` into a single snapshot.
    ///
    /// Curve values are shared with this set, not copied.
    ///
    /// # Errors
    ///
    /// `MarketDataError::ScenarioIndexOutOfRange` unless `index < scenario_count()`.
    pub fn scenario(&self, index: usize) -> Result<MarketDataSnapshot, MarketDataError> {
        let out_of_range = ScenarioIndexError {
            index,
            count: self.scenario_count,
        };
        ScenarioIndexError::check(index, self.scenario_count)?;

        let valuation_date = *self.valuation_date.value(index).ok_or(out_of_range)?;
        let values = self
            .values
            .iter()
            .map(|(id, value)| {
                value
                    .value(index)
                    .map(|v| (id.clone(), v.clone()))
                    .ok_or(out_of_range)
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(MarketDataSnapshot::new(valuation_date, values))
    }
}

fn check_box_len<T>(name: &str, value: &MarketDataBox<T>, scenario_count: usize) -> Result<(), MarketDataError> {
    match value.scenario_count() {
        Some(n) if n != scenario_count => Err(MarketDataError::configuration(format!(
            "{} has {} scenario values, expected {}",
            name, n, scenario_count
        ))),
        _ => Ok(()),
    }
}

/// Builder for [`ScenarioMarketData`].
#[derive(Debug, Clone)]
pub struct ScenarioMarketDataBuilder {
    scenario_count: usize,
    valuation_date: MarketDataBox<NaiveDate>,
    values: HashMap<MarketDataId, MarketDataBox<MarketDataValue>>,
}

impl ScenarioMarketDataBuilder {
    /// Use a different valuation date per scenario.
    pub fn valuation_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.valuation_date = MarketDataBox::Scenarios(dates);
        self
    }

    /// Add a value shared by every scenario.
    pub fn add_value(mut self, id: impl Into<MarketDataId>, value: impl Into<MarketDataValue>) -> Self {
        self.values
            .insert(id.into(), MarketDataBox::Single(value.into()));
        self
    }

    /// Add one value per scenario.
    pub fn add_scenario_values(mut self, id: impl Into<MarketDataId>, values: Vec<MarketDataValue>) -> Self {
        self.values
            .insert(id.into(), MarketDataBox::Scenarios(values));
        self
    }

    /// Validate and finish.
    pub fn build(self) -> Result<ScenarioMarketData, MarketDataError> {
        ScenarioMarketData::new(self.scenario_count, self.valuation_date, self.values)
    }
}
