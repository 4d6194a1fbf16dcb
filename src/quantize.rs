use crate::{BoxSize, Price};

/// Rounds `x` to the nearest multiple of `base`.
///
/// Ties go to the even multiple (`2.5 → 2`, `3.5 → 4` with a box of 1).
///
/// # Example
///
/// ```
/// use quantedge_pnf::{BoxSize, quantize};
///
/// let base = BoxSize::new(0.5).unwrap();
/// assert_eq!(quantize(10.3, base), 10.5);
/// assert_eq!(quantize(10.2, base), 10.0);
/// ```
#[inline]
#[must_use]
pub fn quantize(x: Price, base: BoxSize) -> Price {
    base.value() * (x / base.value()).round_ties_even()
}

/// Index of the box `x` quantizes to, so that `level(index_of(x))` equals
/// `quantize(x)` for finite input.
///
/// Levels are kept as integer box counts inside the engine so every plotted
/// price is an exact multiple of the box size, whatever its binary
/// representation.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn index_of(x: Price, base: BoxSize) -> i64 {
    (x / base.value()).round_ties_even() as i64
}

/// Largest box index the engine plots. Past `2^53` an `f64` no longer holds
/// every integer, so neighbouring levels would collapse.
pub(crate) const MAX_INDEX: i64 = 1 << 53;

/// [`index_of`] for prices the engine can plot: `None` when `x` is not
/// finite or lies more than [`MAX_INDEX`] boxes from zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn checked_index(x: Price, base: BoxSize) -> Option<i64> {
    let boxes = (x / base.value()).round_ties_even();
    (boxes.abs() <= MAX_INDEX as f64).then(|| boxes as i64)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn level(index: i64, base: BoxSize) -> Price {
    base.value() * index as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn boxed(size: f64) -> BoxSize {
        BoxSize::new(size).unwrap()
    }

    #[test]
    fn rounds_to_nearest_multiple() {
        assert_eq!(quantize(10.4, boxed(1.0)), 10.0);
        assert_eq!(quantize(10.6, boxed(1.0)), 11.0);
        assert_eq!(quantize(10.13, boxed(0.25)), 10.25);
        assert_eq!(quantize(203.0, boxed(4.0)), 204.0);
    }

    #[test]
    fn exact_multiple_unchanged() {
        assert_eq!(quantize(12.0, boxed(1.0)), 12.0);
        assert_eq!(quantize(7.75, boxed(0.25)), 7.75);
    }

    #[test]
    fn ties_go_to_even() {
        assert_eq!(quantize(2.5, boxed(1.0)), 2.0);
        assert_eq!(quantize(3.5, boxed(1.0)), 4.0);
        // 0.375 / 0.25 = 1.5 → 2
        assert_eq!(quantize(0.375, boxed(0.25)), 0.5);
        // 0.625 / 0.25 = 2.5 → 2
        assert_eq!(quantize(0.625, boxed(0.25)), 0.5);
    }

    #[test]
    fn negative_ties_go_to_even() {
        assert_eq!(quantize(-2.5, boxed(1.0)), -2.0);
        assert_eq!(quantize(-3.5, boxed(1.0)), -4.0);
    }

    #[test]
    fn index_matches_quantize() {
        for price in [0.0, 9.99, 10.125, 47.3, 99.5, 100.5, 512.0] {
            for size in [0.25, 0.5, 1.0, 2.0, 4.0, 5.0] {
                let base = boxed(size);
                assert_eq!(level(index_of(price, base), base), quantize(price, base));
            }
        }
    }

    #[test]
    fn levels_are_exact_multiples() {
        let base = boxed(0.1);
        // Accumulating 0.1 drifts; indexing does not.
        assert_eq!(level(3, base), 0.1 * 3.0);
        assert_eq!(index_of(level(123, base), base), 123);
    }

    mod checked {
        use super::*;

        #[test]
        fn agrees_with_index_of_in_range() {
            let base = boxed(0.25);
            for price in [-40.1, 0.0, 10.125, 512.0] {
                assert_eq!(checked_index(price, base), Some(index_of(price, base)));
            }
        }

        #[test]
        fn rejects_non_finite() {
            let base = boxed(1.0);
            assert_eq!(checked_index(f64::NAN, base), None);
            assert_eq!(checked_index(f64::INFINITY, base), None);
            assert_eq!(checked_index(f64::NEG_INFINITY, base), None);
        }

        #[test]
        fn rejects_beyond_max_index() {
            let base = boxed(1.0);
            assert_eq!(checked_index(1e20, base), None);
            assert_eq!(checked_index(-1e20, base), None);
            assert_eq!(checked_index(9_007_199_254_740_992.0, base), Some(MAX_INDEX));
        }

        #[test]
        fn bound_scales_with_box_size() {
            // 1e20 / 1e5 = 1e15 boxes
            assert_eq!(checked_index(1e20, boxed(1e5)), Some(1_000_000_000_000_000));
        }
    }
}
