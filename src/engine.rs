use crate::{
    BoxSize, Column, Direction, HighLow, Marker, PnfError, Price, PriceRange, Reversal,
    quantize::{checked_index, level},
};

use std::{fmt::Display, mem};

/// Ordered sequence of Point-and-Figure columns, oldest first.
///
/// Built in one pass over a full high/low series. Adjacent columns always
/// alternate direction and the series is never empty.
///
/// # Example
///
/// ```
/// use quantedge_pnf::{BoxSize, ChartSeries, Direction, Reversal};
///
/// let highs = [10.0, 11.0, 12.0, 12.0];
/// let lows = [10.0, 11.0, 12.0, 9.0];
/// let bars: Vec<_> = highs.into_iter().zip(lows).collect();
///
/// let series = ChartSeries::build(
///     &bars,
///     BoxSize::new(1.0).unwrap(),
///     Reversal::new(3).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.columns()[0].levels(), &[10.0, 11.0, 12.0]);
/// assert_eq!(series.columns()[1].levels(), &[11.0, 10.0, 9.0]);
/// assert_eq!(series.columns()[1].direction(), Some(Direction::Down));
/// ```
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSeries {
    columns: Vec<Column>,
    box_size: BoxSize,
    reversal: Reversal,
}

impl ChartSeries {
    /// Runs the column engine over `bars`.
    ///
    /// The first bar seeds the chart at the quantized greater of its high and
    /// low. Every later bar either extends the current column, reverses into
    /// a new one, or contributes nothing. Extension is always tested before
    /// reversal, and while no trend exists an upward breakout is tested
    /// before a downward one.
    ///
    /// Non-finite prices are treated as absent: a bar whose high is NaN can
    /// still extend or reverse through its low. So are prices more than
    /// `2^53` boxes from zero, where levels can no longer be told apart.
    ///
    /// # Errors
    ///
    /// - [`PnfError::EmptyInput`] when `bars` is empty.
    /// - [`PnfError::MalformedBar`] when the first bar has no usable price.
    pub fn build<B: HighLow>(
        bars: &[B],
        box_size: BoxSize,
        reversal: Reversal,
    ) -> Result<Self, PnfError> {
        let (seed, rest) = bars.split_first().ok_or(PnfError::EmptyInput)?;
        let state = Engine::seed(seed, box_size, reversal)?;

        let columns = rest
            .iter()
            .fold(state, |engine, bar| engine.step(bar))
            .finish();

        Ok(Self {
            columns,
            box_size,
            reversal,
        })
    }

    /// Like [`build`](ChartSeries::build), but first rejects any bar with
    /// `high < low` or a price the permissive build would treat as absent.
    ///
    /// # Errors
    ///
    /// - [`PnfError::EmptyInput`] when `bars` is empty.
    /// - [`PnfError::MalformedBar`] for the first offending bar.
    pub fn build_strict<B: HighLow>(
        bars: &[B],
        box_size: BoxSize,
        reversal: Reversal,
    ) -> Result<Self, PnfError> {
        let malformed = bars
            .iter()
            .enumerate()
            .find(|(_, bar)| is_malformed(*bar, box_size));

        if let Some((index, bar)) = malformed {
            return Err(PnfError::MalformedBar {
                index,
                high: bar.high(),
                low: bar.low(),
            });
        }

        Self::build(bars, box_size, reversal)
    }

    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; the seed column exists even when price never moves.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn box_size(&self) -> BoxSize {
        self.box_size
    }

    #[inline]
    #[must_use]
    pub fn reversal(&self) -> Reversal {
        self.reversal
    }

    /// The column currently being extended.
    #[must_use]
    pub fn current(&self) -> &Column {
        &self.columns[self.columns.len() - 1]
    }

    /// Overall price bounds of every plotted level.
    #[must_use]
    pub fn range(&self) -> PriceRange {
        PriceRange::reduce(&self.columns, self.box_size)
    }

    /// Columns paired with the marker a renderer draws for them.
    pub fn markers(&self, flip: bool) -> impl Iterator<Item = (&Column, Marker)> {
        self.columns
            .iter()
            .enumerate()
            .map(move |(index, column)| (column, Marker::for_column(index, flip)))
    }
}

impl Display for ChartSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PnF({}x{}, {} columns)",
            self.box_size,
            self.reversal,
            self.columns.len()
        )
    }
}

fn is_malformed(bar: &impl HighLow, box_size: BoxSize) -> bool {
    let (high, low) = (bar.high(), bar.low());
    plottable(high, box_size).is_none() || plottable(low, box_size).is_none() || high < low
}

/// `price` if the engine can place it on a box index, else `None`.
fn plottable(price: Price, box_size: BoxSize) -> Option<Price> {
    checked_index(price, box_size).map(|_| price)
}

/// Column state machine, threaded by value through a fold over the bars.
/// Completed columns are appended and never modified.
struct Engine {
    box_size: BoxSize,
    reversal: i64,
    direction: Option<Direction>,
    /// Box index of the most recently plotted level.
    last: i64,
    current: Vec<Price>,
    completed: Vec<Column>,
}

impl Engine {
    fn seed(bar: &impl HighLow, box_size: BoxSize, reversal: Reversal) -> Result<Self, PnfError> {
        let start = match (plottable(bar.high(), box_size), plottable(bar.low(), box_size)) {
            (Some(high), Some(low)) => {
                if high > low {
                    high
                } else {
                    low
                }
            }
            (Some(price), None) | (None, Some(price)) => price,
            (None, None) => {
                return Err(PnfError::MalformedBar {
                    index: 0,
                    high: bar.high(),
                    low: bar.low(),
                });
            }
        };

        let last = checked_index(start, box_size).ok_or(PnfError::MalformedBar {
            index: 0,
            high: bar.high(),
            low: bar.low(),
        })?;

        Ok(Self {
            box_size,
            reversal: i64::from(reversal.boxes()),
            direction: None,
            last,
            current: vec![level(last, box_size)],
            completed: Vec::new(),
        })
    }

    fn step(mut self, bar: &impl HighLow) -> Self {
        let high = plottable(bar.high(), self.box_size);
        let low = plottable(bar.low(), self.box_size);

        match self.direction {
            None => {
                if let Some(trend) = [Direction::Up, Direction::Down]
                    .into_iter()
                    .find(|trend| self.breaks(*trend, 1, high, low))
                {
                    self.direction = Some(trend);
                    self.extend(trend, high, low);
                }
            }
            Some(trend) => {
                if self.breaks(trend, 1, high, low) {
                    self.extend(trend, high, low);
                } else if self.breaks(trend.opposite(), self.reversal, high, low) {
                    self.reverse();
                    self.extend(trend.opposite(), high, low);
                }
            }
        }

        self
    }

    /// Whether the bar reaches `boxes` boxes beyond the last level in
    /// direction `trend`.
    fn breaks(
        &self,
        trend: Direction,
        boxes: i64,
        high: Option<Price>,
        low: Option<Price>,
    ) -> bool {
        let (price, target) = match trend {
            Direction::Up => (high, self.last.checked_add(boxes)),
            Direction::Down => (low, self.last.checked_sub(boxes)),
        };

        let Some((price, target)) = price.zip(target) else {
            return false;
        };
        let threshold = level(target, self.box_size);

        match trend {
            Direction::Up => price >= threshold,
            Direction::Down => price <= threshold,
        }
    }

    fn extend(&mut self, trend: Direction, high: Option<Price>, low: Option<Price>) {
        let step = match trend {
            Direction::Up => 1,
            Direction::Down => -1,
        };

        while self.breaks(trend, 1, high, low) {
            self.last += step;
            self.current.push(level(self.last, self.box_size));
        }
    }

    fn reverse(&mut self) {
        let levels = mem::take(&mut self.current);

        log::trace!(
            "reversal after {} boxes from {}",
            levels.len(),
            level(self.last, self.box_size)
        );

        self.completed.push(Column::new(self.direction, levels));
        self.direction = self.direction.map(Direction::opposite);
    }

    fn finish(mut self) -> Vec<Column> {
        self.completed.push(Column::new(self.direction, self.current));
        self.completed
    }
}
