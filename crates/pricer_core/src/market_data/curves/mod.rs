//! Curve primitives read from market data snapshots.
//!
//! This module provides:
//! - [`NodalCurve`]: Linearly interpolated `(x, y)` nodes, the raw stored form
//! - [`DiscountCurve`]: Discount factors from a zero-rate nodal curve
//! - [`SurvivalCurve`]: Survival probabilities from a hazard-rate nodal curve
//!
//! Curves arrive already built; constructing them from instrument quotes is
//! a calibration concern outside this crate.

mod discount;
mod nodal;
mod survival;

pub use discount::DiscountCurve;
pub use nodal::NodalCurve;
pub use survival::SurvivalCurve;
