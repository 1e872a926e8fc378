//! Coordinate domain for the index.
//!
//! The tree is written once over a generic coordinate type. [`Coord`] is the
//! minimal capability set it needs: ordering, the two sentinels used to seed an
//! inverted box, and a lossy widening to `f64` used only for box centers and
//! Hilbert normalization (so integer centers never overflow).

use core::fmt::Debug;

/// Numeric coordinate usable by [`HilbertRTree`](crate::HilbertRTree).
///
/// Implemented for `i8`, `i16`, `i32`, `i64`, `f32` and `f64`.
pub trait Coord: Copy + PartialOrd + Debug {
    /// Smallest representable value (`-MAX` for floats).
    const MIN_VALUE: Self;

    /// Largest representable value.
    const MAX_VALUE: Self;

    /// Smaller of the two values.
    fn min_of(a: Self, b: Self) -> Self;

    /// Larger of the two values.
    fn max_of(a: Self, b: Self) -> Self;

    /// Widen to `f64` for center and normalization arithmetic.
    fn to_f64(self) -> f64;

    /// Whether the value is finite. Always `true` for integers.
    #[inline(always)]
    fn is_finite(self) -> bool {
        true
    }
}

macro_rules! impl_coord_int {
    ($($t:ty),*) => {$(
        impl Coord for $t {
            const MIN_VALUE: Self = <$t>::MIN;
            const MAX_VALUE: Self = <$t>::MAX;

            #[inline(always)]
            fn min_of(a: Self, b: Self) -> Self {
                core::cmp::min(a, b)
            }

            #[inline(always)]
            fn max_of(a: Self, b: Self) -> Self {
                core::cmp::max(a, b)
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! impl_coord_float {
    ($($t:ty),*) => {$(
        impl Coord for $t {
            const MIN_VALUE: Self = <$t>::MIN;
            const MAX_VALUE: Self = <$t>::MAX;

            // NaN propagates, so a parent above a NaN box is never pruned.
            #[inline(always)]
            fn min_of(a: Self, b: Self) -> Self {
                if a.is_nan() || b.is_nan() { <$t>::NAN } else { a.min(b) }
            }

            #[inline(always)]
            fn max_of(a: Self, b: Self) -> Self {
                if a.is_nan() || b.is_nan() { <$t>::NAN } else { a.max(b) }
            }

            #[inline(always)]
            #[allow(trivial_numeric_casts, reason = "f64 -> f64 in one of the expansions")]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }
        }
    )*};
}

impl_coord_int!(i8, i16, i32, i64);
impl_coord_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::Coord;

    #[test]
    fn sentinels_match_primitive_limits() {
        assert_eq!(<i8 as Coord>::MIN_VALUE, i8::MIN, "i8 min sentinel");
        assert_eq!(<i8 as Coord>::MAX_VALUE, i8::MAX, "i8 max sentinel");
        assert_eq!(<i16 as Coord>::MIN_VALUE, i16::MIN, "i16 min sentinel");
        assert_eq!(<i32 as Coord>::MAX_VALUE, i32::MAX, "i32 max sentinel");
        assert_eq!(<i64 as Coord>::MIN_VALUE, i64::MIN, "i64 min sentinel");
        assert_eq!(<f32 as Coord>::MIN_VALUE, -f32::MAX, "f32 min sentinel is -MAX");
        assert_eq!(<f64 as Coord>::MAX_VALUE, f64::MAX, "f64 max sentinel");
    }

    #[test]
    fn min_max_propagate_nan() {
        assert!(f64::min_of(f64::NAN, 1.0).is_nan(), "NaN wins min");
        assert!(f64::max_of(2.0, f64::NAN).is_nan(), "NaN wins max");
        assert!(f32::min_of(1.0, f32::NAN).is_nan(), "NaN wins min on either side");
        assert_eq!(f32::max_of(1.0, 3.0), 3.0, "regular values unaffected");
    }

    #[test]
    fn finiteness() {
        assert!(i32::MAX.is_finite(), "integers are always finite");
        assert!(!f32::INFINITY.is_finite(), "inf is not finite");
        assert!(!<f64 as Coord>::is_finite(f64::NAN), "NaN is not finite");
        assert_eq!((-7_i8).to_f64(), -7.0, "widening keeps the value");
    }
}
