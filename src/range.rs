use crate::{
    BoxSize, Column, Price,
    quantize::{index_of, level},
};

use std::fmt::Display;

/// Price bounds spanned by a [`ChartSeries`](crate::ChartSeries), used to
/// size a display grid.
///
/// Both bounds are multiples of the box size. `rows` counts every level from
/// `min_price` to `max_price` plus one padding row above the maximum.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceRange {
    min_price: Price,
    max_price: Price,
    rows: usize,
    box_size: BoxSize,
}

impl PriceRange {
    /// Reduces non-empty `columns` to their overall bounds.
    pub(crate) fn reduce(columns: &[Column], box_size: BoxSize) -> Self {
        let (low, high) = columns
            .iter()
            .flat_map(Column::levels)
            .map(|price| index_of(*price, box_size))
            .fold((i64::MAX, i64::MIN), |(low, high), index| {
                (low.min(index), high.max(index))
            });

        debug_assert!(low <= high, "range of an empty series");

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rows = (high - low) as usize + 2;

        Self {
            min_price: level(low, box_size),
            max_price: level(high, box_size),
            rows,
            box_size,
        }
    }

    #[inline]
    #[must_use]
    pub fn min_price(&self) -> Price {
        self.min_price
    }

    #[inline]
    #[must_use]
    pub fn max_price(&self) -> Price {
        self.max_price
    }

    /// `(max_price - min_price) / box_size + 2`.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn box_size(&self) -> BoxSize {
        self.box_size
    }

    /// Price label of grid row `row`, counted up from `min_price`.
    #[must_use]
    pub fn price_at(&self, row: usize) -> Price {
        #[allow(clippy::cast_possible_wrap)]
        let offset = row as i64;
        level(index_of(self.min_price, self.box_size) + offset, self.box_size)
    }

    /// Grid row of an arbitrary price after quantization.
    ///
    /// Negative or `>= rows` when the price lies outside the chart, as a
    /// last-trade marker may.
    #[must_use]
    pub fn row_of(&self, price: Price) -> i64 {
        index_of(price, self.box_size).saturating_sub(index_of(self.min_price, self.box_size))
    }

    /// Whether `price` quantizes onto a level inside `[min_price, max_price]`.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        let row = self.row_of(price);
        #[allow(clippy::cast_possible_wrap)]
        let top = self.rows as i64 - 2;
        (0..=top).contains(&row)
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let decimals = self.box_size.decimals();
        write!(
            f,
            "[{:.decimals$}, {:.decimals$}] x{} rows",
            self.min_price, self.max_price, self.rows
        )
    }
}
