use crate::Price;

use std::fmt::Display;

/// Trend of a column.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Rising column of X boxes.
    Up,
    /// Falling column of O boxes.
    Down,
}

impl Direction {
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One contiguous run of same-direction boxes.
///
/// Levels are in formation order: strictly increasing for an
/// [`Up`](Direction::Up) column, strictly decreasing for a
/// [`Down`](Direction::Down) one, each one box apart. A column is never
/// empty.
///
/// `direction` is `None` only for the seed column of a series whose price
/// never moved a full box away from the first bar.
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    direction: Option<Direction>,
    levels: Vec<Price>,
}

impl Column {
    pub(crate) fn new(direction: Option<Direction>, levels: Vec<Price>) -> Self {
        debug_assert!(!levels.is_empty(), "column must have at least one level");
        Self { direction, levels }
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn levels(&self) -> &[Price] {
        &self.levels
    }

    /// First plotted level.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Price {
        self.levels[0]
    }

    /// Most recently plotted level.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Price {
        self.levels[self.levels.len() - 1]
    }

    /// Number of boxes in the column.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; columns are created with at least one box.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn high(&self) -> Price {
        self.first().max(self.last())
    }

    #[must_use]
    pub fn low(&self) -> Price {
        self.first().min(self.last())
    }

    /// Whether the column holds a box at `price`.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.levels.iter().any(|level| *level == price)
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyph = match self.direction {
            Some(Direction::Up) => "X",
            Some(Direction::Down) => "O",
            None => "-",
        };
        write!(f, "{glyph}[{}..{}; {}]", self.first(), self.last(), self.len())
    }
}

/// Glyph a renderer draws for a column's boxes.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Marker {
    X,
    O,
}

impl Marker {
    /// Marker by column parity: even columns draw `O`, odd columns `X`.
    /// `flip` swaps the two.
    ///
    /// Only parity is considered, never the column's direction.
    #[must_use]
    pub fn for_column(index: usize, flip: bool) -> Self {
        if (index % 2 == 0) == flip {
            Self::X
        } else {
            Self::O
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
