//! Nodal curve: linear interpolation between nodes, flat extrapolation.

use crate::market_data::error::MarketDataError;

/// Curve defined by `(x, y)` nodes.
///
/// Values between nodes are linearly interpolated; outside the node range
/// the first or last node value is used. The x-values are year fractions
/// for every curve kind in this crate (zero rates, hazard rates, volatilities).
///
/// # Invariants
///
/// - At least one node
/// - `x` strictly increasing
/// - All values finite
///
/// # Example
///
/// ```
/// use pricer_core::market_data::NodalCurve;
///
/// let curve = NodalCurve::new(vec![1.0, 2.0], vec![0.02, 0.04]).unwrap();
/// assert_eq!(curve.y_value(0.5), 0.02);
/// assert!((curve.y_value(1.5) - 0.03).abs() < 1e-12);
/// assert_eq!(curve.y_value(10.0), 0.04);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NodalCurveRepr"))]
pub struct NodalCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct NodalCurveRepr {
    x: Vec<f64>,
    y: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<NodalCurveRepr> for NodalCurve {
    type Error = MarketDataError;

    fn try_from(repr: NodalCurveRepr) -> Result<Self, Self::Error> {
        NodalCurve::new(repr.x, repr.y)
    }
}

impl NodalCurve {
    /// Construct a curve from node x-values and y-values.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidCurve` if there are no nodes, the lengths
    /// differ, x is not strictly increasing, or any value is not finite.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, MarketDataError> {
        if x.is_empty() {
            return Err(MarketDataError::InvalidCurve("no nodes".to_string()));
        }
        if x.len() != y.len() {
            return Err(MarketDataError::InvalidCurve(format!(
                "{} x-values but {} y-values",
                x.len(),
                y.len()
            )));
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(MarketDataError::InvalidCurve(
                "non-finite node value".to_string(),
            ));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MarketDataError::InvalidCurve(format!(
                "x-values not strictly increasing at node {}",
                i + 1
            )));
        }
        Ok(Self { x, y })
    }

    /// Single-node curve with the same value everywhere.
    pub fn constant(value: f64) -> Result<Self, MarketDataError> {
        Self::new(vec![0.0], vec![value])
    }

    /// Node x-values.
    #[inline]
    pub fn x_values(&self) -> &[f64] {
        &self.x
    }

    /// Node y-values.
    #[inline]
    pub fn y_values(&self) -> &[f64] {
        &self.y
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false; a curve has at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Curve value at `x`.
    ///
    /// NaN maps to the first node.
    pub fn y_value(&self, x: f64) -> f64 {
        let last = self.x.len() - 1;
        if x.is_nan() || x <= self.x[0] {
            return self.y[0];
        }
        if x >= self.x[last] {
            return self.y[last];
        }
        // First node strictly greater than x; in 1..=last here.
        let hi = self.x.partition_point(|&node| node <= x);
        let lo = hi - 1;
        let w = (x - self.x[lo]) / (self.x[hi] - self.x[lo]);
        self.y[lo] + w * (self.y[hi] - self.y[lo])
    }

    /// Copy of this curve with every y-value shifted by `amount`.
    ///
    /// Used to build parallel-shift stress scenarios.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidCurve` if a shifted value is not finite.
    pub fn shifted(&self, amount: f64) -> Result<Self, MarketDataError> {
        Self::new(self.x.clone(), self.y.iter().map(|v| v + amount).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve() -> NodalCurve {
        NodalCurve::new(vec![1.0, 2.0, 5.0], vec![0.01, 0.02, 0.05]).unwrap()
    }

    #[test]
    fn test_interpolates_between_nodes() {
        let c = curve();
        assert_relative_eq!(c.y_value(1.5), 0.015, epsilon = 1e-12);
        assert_relative_eq!(c.y_value(3.5), 0.035, epsilon = 1e-12);
    }

    #[test]
    fn test_hits_nodes_exactly() {
        let c = curve();
        assert_eq!(c.y_value(1.0), 0.01);
        assert_eq!(c.y_value(2.0), 0.02);
        assert_eq!(c.y_value(5.0), 0.05);
    }

    #[test]
    fn test_flat_extrapolation() {
        let c = curve();
        assert_eq!(c.y_value(0.0), 0.01);
        assert_eq!(c.y_value(30.0), 0.05);
    }

    #[test]
    fn test_constant() {
        let c = NodalCurve::constant(0.4).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.y_value(-1.0), 0.4);
        assert_eq!(c.y_value(100.0), 0.4);
    }

    #[test]
    fn test_rejects_invalid_nodes() {
        assert!(NodalCurve::new(vec![], vec![]).is_err());
        assert!(NodalCurve::new(vec![1.0, 2.0], vec![0.1]).is_err());
        assert!(NodalCurve::new(vec![1.0, 1.0], vec![0.1, 0.2]).is_err());
        assert!(NodalCurve::new(vec![2.0, 1.0], vec![0.1, 0.2]).is_err());
        assert!(NodalCurve::new(vec![1.0], vec![f64::NAN]).is_err());
    }

    #[test]
    fn test_shifted() {
        let c = curve().shifted(0.001).unwrap();
        assert_eq!(c.x_values(), curve().x_values());
        assert_relative_eq!(c.y_value(2.0), 0.021, epsilon = 1e-12);
    }

    #[test]
    fn test_shifted_rejects_non_finite() {
        assert!(matches!(curve().shifted(f64::NAN), Err(MarketDataError::InvalidCurve(_))));
        assert!(matches!(curve().shifted(f64::INFINITY), Err(MarketDataError::InvalidCurve(_))));
        let big = NodalCurve::constant(f64::MAX).unwrap();
        assert!(big.shifted(f64::MAX).is_err());
    }

    #[test]
    fn test_non_finite_abscissa() {
        let c = curve();
        assert_eq!(c.y_value(f64::NAN), 0.01);
        assert_eq!(c.y_value(f64::NEG_INFINITY), 0.01);
        assert_eq!(c.y_value(f64::INFINITY), 0.05);
        assert_eq!(NodalCurve::constant(0.4).unwrap().y_value(f64::NAN), 0.4);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialisation_validates_nodes() {
        let ok: NodalCurve = serde_json::from_str(r#"{"x":[1.0,2.0],"y":[0.1,0.2]}"#).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(serde_json::from_str::<NodalCurve>(r#"{"x":[2.0,1.0],"y":[0.1,0.2]}"#).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_value_bounded_by_nodes(
                ys in proptest::collection::vec(-1.0f64..1.0, 1..8),
                x in -5.0f64..20.0,
            ) {
                let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
                let c = NodalCurve::new(xs, ys.clone()).unwrap();
                let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let v = c.y_value(x);
                prop_assert!(v >= min - 1e-12 && v <= max + 1e-12);
            }
        }
    }
}
