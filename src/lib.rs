//! Point-and-Figure charts for Rust.
//!
//! Turns a series of high/low bars into alternating columns of rising (X)
//! and falling (O) boxes, quantized to a box size and gated by a reversal
//! threshold. Bars are any type implementing [`HighLow`].
//!
//! [`Chart::build`] is the usual entry point: it picks a box size (see
//! [`select_box_size`]), runs the column engine ([`ChartSeries::build`])
//! and derives the [`PriceRange`] a renderer lays its grid out on. Every
//! build is a pure function of its input bars and [`PnfConfig`].
//!
//! ```
//! use quantedge_pnf::{Chart, Direction, PnfConfig, PriceBar};
//!
//! let bars = [
//!     PriceBar::new(48.2, 47.5),
//!     PriceBar::new(51.4, 48.0),
//!     PriceBar::new(50.0, 47.1),
//! ];
//!
//! let chart = Chart::build(&bars, &PnfConfig::default()).unwrap();
//!
//! assert_eq!(chart.box_size().value(), 1.0);
//! let columns = chart.series().columns();
//! assert_eq!(columns[0].levels(), &[48.0, 49.0, 50.0, 51.0]);
//! assert_eq!(columns[1].levels(), &[50.0, 49.0, 48.0]);
//! assert_eq!(columns[1].direction(), Some(Direction::Down));
//! ```

mod bar;
mod box_size;
mod chart;
mod column;
mod config;
mod engine;
mod error;
mod quantize;
mod range;

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

pub use crate::bar::{HighLow, PriceBar, average_price};
pub use crate::box_size::{BoxSize, select_box_size};
pub use crate::config::{BoxSizing, PnfConfig, PnfConfigBuilder, Reversal};
pub use crate::error::PnfError;
pub use crate::quantize::quantize;

pub use crate::chart::Chart;
pub use crate::column::{Column, Direction, Marker};
pub use crate::engine::ChartSeries;
pub use crate::range::PriceRange;

#[cfg(test)]
mod test_util;
