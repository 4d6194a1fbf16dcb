// src/test_util.rs

use crate::{HighLow, Price};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

#[derive(Clone, Copy, Debug)]
pub struct Bar {
    pub high: f64,
    pub low: f64,
}

impl Bar {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    pub fn with_low(mut self, low: f64) -> Self {
        self.low = low;
        self
    }
}

/// Convenience: bar with high and low at the same price.
pub fn bar(price: f64) -> Bar {
    Bar::new(price, price)
}

/// Bars from `(high, low)` pairs.
pub fn bars(points: &[(f64, f64)]) -> Vec<Bar> {
    points.iter().map(|&(high, low)| Bar::new(high, low)).collect()
}

/// Bars from parallel high and low columns.
pub fn hl(highs: &[f64], lows: &[f64]) -> Vec<Bar> {
    assert_eq!(highs.len(), lows.len(), "highs and lows differ in length");
    highs
        .iter()
        .zip(lows)
        .map(|(&high, &low)| Bar::new(high, low))
        .collect()
}

impl HighLow for Bar {
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
}
