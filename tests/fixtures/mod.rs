#![allow(dead_code)]

use quantedge_pnf::{Column, Direction, HighLow, Price};
use serde::{Deserialize, de::DeserializeOwned};

/// Daily bar parsed from the reference CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl HighLow for RefBar {
    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }
}

/// Expected column summary.
#[derive(Debug, Deserialize)]
pub struct RefColumn {
    pub column: usize,
    pub direction: RefDirection,
    pub first: f64,
    pub last: f64,
    pub boxes: usize,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RefDirection {
    Up,
    Down,
    None,
}

impl From<Option<Direction>> for RefDirection {
    fn from(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Up) => Self::Up,
            Some(Direction::Down) => Self::Down,
            None => Self::None,
        }
    }
}

const BARS_PATH: &str = "tests/fixtures/data/bars-1d.csv";

/// Load the reference daily bars.
pub fn load_reference_bars() -> Vec<RefBar> {
    load_records(BARS_PATH, "invalid bar record")
}

/// Load expected columns for one box size / reversal combination.
pub fn load_ref_columns(path: &str) -> Vec<RefColumn> {
    load_records(path, "invalid reference column record")
}

/// Assert a built column matches its reference summary.
#[allow(clippy::float_cmp)]
pub fn assert_column_matches(index: usize, actual: &Column, expected: &RefColumn) {
    assert_eq!(expected.column, index, "reference file out of order");
    assert_eq!(
        RefDirection::from(actual.direction()),
        expected.direction,
        "direction of column {index}"
    );
    assert_eq!(actual.first(), expected.first, "first level of column {index}");
    assert_eq!(actual.last(), expected.last, "last level of column {index}");
    assert_eq!(actual.len(), expected.boxes, "box count of column {index}");
}

/// Generate a reference match test for one chart configuration.
///
/// Usage: `reference_test!(box_1_rev_3, PnfConfig::fixed(1.0, 3).unwrap(), "tests/fixtures/data/pnf-1-3.csv");`
#[allow(unused_macros)]
macro_rules! reference_test {
    ($name:ident, $config:expr, $ref_path:expr) => {
        mod $name {
            use super::fixtures::*;
            use quantedge_pnf::*;

            #[test]
            fn matches_reference() {
                let bars = load_reference_bars();
                let reference = load_ref_columns($ref_path);
                let chart = Chart::build(&bars, &$config)
                    .unwrap_or_else(|e| panic!("{} failed: {e}", stringify!($name)));

                let columns = chart.series().columns();
                assert_eq!(
                    columns.len(),
                    reference.len(),
                    "{} column count",
                    stringify!($name)
                );

                for (i, (column, expected)) in columns.iter().zip(&reference).enumerate() {
                    assert_column_matches(i, column, expected);
                }
            }

            #[test]
            fn rebuild_is_identical() {
                let bars = load_reference_bars();
                let config = $config;
                assert_eq!(Chart::build(&bars, &config), Chart::build(&bars, &config));
            }
        }
    };
}

#[allow(unused_imports)]
pub(crate) use reference_test;

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
