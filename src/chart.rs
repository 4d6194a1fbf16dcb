use crate::{
    BoxSize, ChartSeries, HighLow, PnfConfig, PnfError, Price, PriceRange, Reversal,
    average_price, select_box_size,
};

use std::fmt::Display;

/// A complete Point-and-Figure chart: the column series plus everything a
/// renderer needs to lay it out.
///
/// Built from scratch on every call. Changing the symbol, box size or
/// reversal means building a new chart from the full series.
///
/// # Example
///
/// ```
/// use quantedge_pnf::{Chart, PnfConfig};
///
/// let bars = [(10.0, 10.0), (11.0, 11.0), (12.0, 12.0), (12.0, 9.0)];
///
/// let chart = Chart::build(&bars, &PnfConfig::fixed(1.0, 3).unwrap()).unwrap();
///
/// assert_eq!(chart.series().len(), 2);
/// assert_eq!(chart.range().min_price(), 9.0);
/// assert_eq!(chart.range().max_price(), 12.0);
/// assert_eq!(chart.range().rows(), 5);
/// ```
#[derive(PartialEq, Clone, Debug)]
pub struct Chart {
    average_price: Price,
    series: ChartSeries,
    range: PriceRange,
}

impl Chart {
    /// Selects the box size, runs the column engine and reduces the range.
    ///
    /// With [`BoxSizing::Auto`](crate::BoxSizing::Auto) the box size comes
    /// from the series' [`average_price`].
    ///
    /// # Errors
    ///
    /// - [`PnfError::EmptyInput`] when `bars` is empty.
    /// - [`PnfError::MalformedBar`] in strict mode for a bad bar, when the
    ///   first bar has no usable price, or when no price in the series is
    ///   finite.
    pub fn build<B: HighLow>(bars: &[B], config: &PnfConfig) -> Result<Self, PnfError> {
        let average_price = average_price(bars)?;
        let box_size = select_box_size(
            average_price,
            config.box_sizing().fixed().map(BoxSize::value),
        )?;

        let series = if config.strict() {
            ChartSeries::build_strict(bars, box_size, config.reversal())?
        } else {
            ChartSeries::build(bars, box_size, config.reversal())?
        };
        let range = series.range();

        log::debug!(
            "built {} from {} bars: average {average_price:.4}, range {range}",
            series,
            bars.len()
        );

        Ok(Self {
            average_price,
            series,
            range,
        })
    }

    /// `(mean(highs) + mean(lows)) / 2` of the input series.
    #[inline]
    #[must_use]
    pub fn average_price(&self) -> Price {
        self.average_price
    }

    #[inline]
    #[must_use]
    pub fn box_size(&self) -> BoxSize {
        self.series.box_size()
    }

    #[inline]
    #[must_use]
    pub fn reversal(&self) -> Reversal {
        self.series.reversal()
    }

    #[inline]
    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    #[inline]
    #[must_use]
    pub fn range(&self) -> &PriceRange {
        &self.range
    }

    /// Grid row for a last-trade annotation at `price`.
    ///
    /// See [`PriceRange::row_of`].
    #[must_use]
    pub fn row_of(&self, price: Price) -> i64 {
        self.range.row_of(price)
    }
}

impl Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.series, self.range)
    }
}
