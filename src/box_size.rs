use crate::{PnfError, Price};

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

/// Price quantization unit of a Point-and-Figure chart.
///
/// Wraps a positive, finite `f64`. Construction is fallible: zero, negative,
/// infinite and NaN values are rejected with [`PnfError::InvalidBoxSize`].
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct BoxSize(f64);

/// Upper bound (exclusive) of each auto tier and the box size it selects.
/// Prices at or above the last bound use [`TOP_TIER`].
const TIERS: [(Price, f64); 5] = [
    (5.0, 0.25),
    (20.0, 0.5),
    (100.0, 1.0),
    (200.0, 2.0),
    (500.0, 4.0),
];
const TOP_TIER: f64 = 5.0;

impl BoxSize {
    /// Creates a box size.
    ///
    /// # Errors
    ///
    /// Returns [`PnfError::InvalidBoxSize`] if `value` is not positive and
    /// finite.
    pub fn new(value: f64) -> Result<Self, PnfError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(PnfError::InvalidBoxSize { box_size: value })
        }
    }

    /// Box size from the breakpoint table for a given average price.
    ///
    /// | average price | box size |
    /// |---|---|
    /// | `p < 5` | 0.25 |
    /// | `5 ≤ p < 20` | 0.50 |
    /// | `20 ≤ p < 100` | 1 |
    /// | `100 ≤ p < 200` | 2 |
    /// | `200 ≤ p < 500` | 4 |
    /// | `p ≥ 500` | 5 |
    ///
    /// NaN falls through to the top tier.
    #[must_use]
    pub fn for_price(average: Price) -> Self {
        let size = TIERS
            .iter()
            .find(|(bound, _)| average < *bound)
            .map_or(TOP_TIER, |(_, size)| *size);

        Self(size)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Decimal places used for price labels: whole numbers for boxes of
    /// at least 1, cents otherwise.
    #[must_use]
    pub fn decimals(self) -> usize {
        if self.0 >= 1.0 { 0 } else { 2 }
    }
}

impl PartialEq for BoxSize {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for BoxSize {}

impl Hash for BoxSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for BoxSize {
    type Error = PnfError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BoxSize> for f64 {
    fn from(size: BoxSize) -> Self {
        size.0
    }
}

impl Display for BoxSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Picks the chart's box size.
///
/// A present `fixed` value overrides the table and is returned unchanged;
/// otherwise [`BoxSize::for_price`] is applied to `average`.
///
/// # Errors
///
/// Returns [`PnfError::InvalidBoxSize`] if `fixed` is present but not
/// positive and finite. A zero override is an error, not a request for the
/// automatic size.
///
/// # Example
///
/// ```
/// use quantedge_pnf::select_box_size;
///
/// assert_eq!(select_box_size(42.0, None).unwrap().value(), 1.0);
/// assert_eq!(select_box_size(42.0, Some(0.1)).unwrap().value(), 0.1);
/// assert!(select_box_size(42.0, Some(0.0)).is_err());
/// ```
pub fn select_box_size(average: Price, fixed: Option<f64>) -> Result<BoxSize, PnfError> {
    match fixed {
        Some(value) => BoxSize::new(value),
        None => Ok(BoxSize::for_price(average)),
    }
}
