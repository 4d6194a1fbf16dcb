use crate::{BoxSize, PnfError};

use std::{fmt::Display, num::NonZero};

const DEFAULT_REVERSAL: NonZero<u32> = NonZero::new(3).unwrap();

/// Number of boxes price must move against the current column before a new
/// column starts.
///
/// Wraps a non-zero `u32`. Defaults to `3`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reversal(NonZero<u32>);

impl Reversal {
    /// Creates a reversal size.
    ///
    /// # Errors
    ///
    /// Returns [`PnfError::InvalidReversal`] if `boxes` is zero.
    pub fn new(boxes: u32) -> Result<Self, PnfError> {
        NonZero::new(boxes)
            .map(Self)
            .ok_or(PnfError::InvalidReversal { reversal: boxes })
    }

    #[inline]
    #[must_use]
    pub fn boxes(self) -> u32 {
        self.0.get()
    }
}

impl Default for Reversal {
    fn default() -> Self {
        Self(DEFAULT_REVERSAL)
    }
}

impl Display for Reversal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the box size of a chart is chosen.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum BoxSizing {
    /// Derived from the series' average price via [`BoxSize::for_price`].
    #[default]
    Auto,
    /// Caller-fixed box size.
    Fixed(BoxSize),
}

impl BoxSizing {
    #[must_use]
    pub fn fixed(&self) -> Option<BoxSize> {
        match self {
            Self::Auto => None,
            Self::Fixed(size) => Some(*size),
        }
    }
}

impl Display for BoxSizing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Fixed(size) => write!(f, "Fixed({size})"),
        }
    }
}

/// Configuration for building a [`Chart`](crate::Chart).
///
/// An immutable value passed into every build; nothing is read from global
/// state. Cheap to copy, compare and hash.
///
/// # Example
///
/// ```
/// use quantedge_pnf::PnfConfig;
///
/// let config = PnfConfig::builder()
///     .box_size(0.5)
///     .reversal(2)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.reversal().boxes(), 2);
/// assert_eq!(config.to_string(), "PnfConfig(Fixed(0.5), 2)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub struct PnfConfig {
    box_sizing: BoxSizing,
    reversal: Reversal,
    strict: bool,
}

impl PnfConfig {
    /// Returns a new builder with default values.
    #[must_use]
    pub fn builder() -> PnfConfigBuilder {
        PnfConfigBuilder::new()
    }

    /// Auto box size with the given reversal.
    ///
    /// # Errors
    ///
    /// Returns [`PnfError::InvalidReversal`] if `reversal` is zero.
    pub fn auto(reversal: u32) -> Result<Self, PnfError> {
        Self::builder().reversal(reversal).build()
    }

    /// Fixed box size with the given reversal.
    ///
    /// # Errors
    ///
    /// Returns [`PnfError::InvalidBoxSize`] or [`PnfError::InvalidReversal`]
    /// for out-of-range parameters.
    pub fn fixed(box_size: f64, reversal: u32) -> Result<Self, PnfError> {
        Self::builder()
            .box_size(box_size)
            .reversal(reversal)
            .build()
    }

    #[inline]
    #[must_use]
    pub fn box_sizing(&self) -> BoxSizing {
        self.box_sizing
    }

    #[inline]
    #[must_use]
    pub fn reversal(&self) -> Reversal {
        self.reversal
    }

    /// Whether bars with `high < low` or non-finite prices are rejected.
    #[inline]
    #[must_use]
    pub fn strict(&self) -> bool {
        self.strict
    }
}

impl Display for PnfConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PnfConfig({}, {}", self.box_sizing, self.reversal)?;
        if self.strict {
            write!(f, ", strict")?;
        }
        write!(f, ")")
    }
}

/// Builder for [`PnfConfig`].
///
/// Defaults: automatic box size, reversal of 3, permissive bar handling.
/// Values are validated in [`build`](PnfConfigBuilder::build).
#[derive(Clone, Copy, Debug)]
pub struct PnfConfigBuilder {
    box_size: Option<f64>,
    reversal: u32,
    strict: bool,
}

impl PnfConfigBuilder {
    fn new() -> Self {
        Self {
            box_size: None,
            reversal: Reversal::default().boxes(),
            strict: false,
        }
    }

    /// Fixes the box size. Zero or negative values fail at build time.
    #[inline]
    #[must_use]
    pub fn box_size(mut self, box_size: f64) -> Self {
        self.box_size.replace(box_size);
        self
    }

    /// Reverts to automatic box size selection.
    #[inline]
    #[must_use]
    pub fn auto_box_size(mut self) -> Self {
        self.box_size = None;
        self
    }

    #[inline]
    #[must_use]
    pub fn reversal(mut self, boxes: u32) -> Self {
        self.reversal = boxes;
        self
    }

    #[inline]
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`PnfError::InvalidBoxSize`] for a fixed box size that is not
    /// positive and finite, and [`PnfError::InvalidReversal`] for a zero
    /// reversal.
    pub fn build(self) -> Result<PnfConfig, PnfError> {
        let box_sizing = match self.box_size {
            Some(size) => BoxSizing::Fixed(BoxSize::new(size)?),
            None => BoxSizing::Auto,
        };

        Ok(PnfConfig {
            box_sizing,
            reversal: Reversal::new(self.reversal)?,
            strict: self.strict,
        })
    }
}
