use crate::{PnfError, Price};

use std::fmt::Display;

/// High/low bar data used as input to the column engine.
///
/// Implement this on your own kline/candle type to avoid per-bar
/// conversion. The engine is timestamp-agnostic: it only consumes the
/// high and low values, in slice order.
///
/// # Example
///
/// ```
/// use quantedge_pnf::{HighLow, Price};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl HighLow for MyKline {
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
/// }
/// ```
pub trait HighLow {
    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    ///
    /// `high >= low` is assumed but not checked unless the chart is built
    /// in strict mode.
    fn low(&self) -> Price;
}

/// A single `(high, low)` observation.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    pub high: Price,
    pub low: Price,
}

impl PriceBar {
    #[must_use]
    pub fn new(high: Price, low: Price) -> Self {
        Self { high, low }
    }

    /// Bar where high and low are the same price.
    #[must_use]
    pub fn flat(price: Price) -> Self {
        Self::new(price, price)
    }
}

impl Display for PriceBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PriceBar(h={}, l={})", self.high, self.low)
    }
}

impl HighLow for PriceBar {
    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }
}

/// Tuples are read as `(high, low)`.
impl HighLow for (Price, Price) {
    #[inline]
    fn high(&self) -> Price {
        self.0
    }

    #[inline]
    fn low(&self) -> Price {
        self.1
    }
}

impl<T: HighLow + ?Sized> HighLow for &T {
    #[inline]
    fn high(&self) -> Price {
        (**self).high()
    }

    #[inline]
    fn low(&self) -> Price {
        (**self).low()
    }
}

/// Average price level of a series: `(mean(highs) + mean(lows)) / 2`.
///
/// This is the input to automatic box-size selection. Non-finite prices are
/// skipped, so each mean runs over its own finite values. When one side has
/// no finite value the other mean stands alone.
///
/// # Errors
///
/// - [`PnfError::EmptyInput`] when `bars` is empty.
/// - [`PnfError::MalformedBar`] for the first bar when no price in the
///   series is finite.
///
/// # Example
///
/// ```
/// use quantedge_pnf::average_price;
///
/// let bars = [(12.0, 8.0), (14.0, 10.0)];
/// assert_eq!(average_price(&bars), Ok(11.0));
///
/// let gappy = [(12.0, 8.0), (f64::NAN, 10.0)];
/// assert_eq!(average_price(&gappy), Ok(10.5));
/// ```
pub fn average_price<B: HighLow>(bars: &[B]) -> Result<Price, PnfError> {
    let first = bars.first().ok_or(PnfError::EmptyInput)?;

    let (highs, lows) = bars.iter().fold(
        (FiniteMean::default(), FiniteMean::default()),
        |(highs, lows), bar| (highs.push(bar.high()), lows.push(bar.low())),
    );

    match (highs.mean(), lows.mean()) {
        (Some(high), Some(low)) => Ok(f64::midpoint(high, low)),
        (Some(mean), None) | (None, Some(mean)) => Ok(mean),
        (None, None) => Err(PnfError::MalformedBar {
            index: 0,
            high: first.high(),
            low: first.low(),
        }),
    }
}

#[derive(Default, Clone, Copy)]
struct FiniteMean {
    sum: f64,
    count: usize,
}

impl FiniteMean {
    fn push(mut self, price: Price) -> Self {
        if price.is_finite() {
            self.sum += price;
            self.count += 1;
        }
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(self) -> Option<Price> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}
